/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Output of a multiple object download
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DownloadObjectsOutput {
    pub(crate) objects_listed: u64,
    pub(crate) archives_matched: u64,
    pub(crate) objects_downloaded: u64,
    pub(crate) missing_keys: Vec<String>,
    pub(crate) total_bytes_transferred: u64,
}

impl DownloadObjectsOutput {
    /// Creates a new builder-style object to manufacture [`DownloadObjectsOutput`]
    pub fn builder() -> DownloadObjectsOutputBuilder {
        DownloadObjectsOutputBuilder::default()
    }

    /// Number of objects returned by the listing, matched or not
    pub fn objects_listed(&self) -> u64 {
        self.objects_listed
    }

    /// Number of objects the filter selected. This is the "processed" count.
    pub fn archives_matched(&self) -> u64 {
        self.archives_matched
    }

    /// Number of objects written to disk
    pub fn objects_downloaded(&self) -> u64 {
        self.objects_downloaded
    }

    /// Keys that were listed but no longer existed when downloaded
    pub fn missing_keys(&self) -> &[String] {
        &self.missing_keys
    }

    /// Total bytes written to disk
    pub fn total_bytes_transferred(&self) -> u64 {
        self.total_bytes_transferred
    }
}

/// Running totals of a multiple object download
#[non_exhaustive]
#[derive(Debug, Clone, Default)]
pub struct DownloadObjectsOutputBuilder {
    pub(crate) objects_listed: u64,
    pub(crate) archives_matched: u64,
    pub(crate) objects_downloaded: u64,
    pub(crate) missing_keys: Vec<String>,
    pub(crate) total_bytes_transferred: u64,
}

impl DownloadObjectsOutputBuilder {
    pub(crate) fn inc_listed(&mut self, count: usize) {
        self.objects_listed += count as u64;
    }

    pub(crate) fn inc_matched(&mut self) {
        self.archives_matched += 1;
    }

    pub(crate) fn record_download(&mut self, bytes_transferred: u64) {
        self.objects_downloaded += 1;
        self.total_bytes_transferred += bytes_transferred;
    }

    pub(crate) fn record_missing(&mut self, key: impl Into<String>) {
        self.missing_keys.push(key.into());
    }

    /// Consumes the builder and constructs a [`DownloadObjectsOutput`]
    pub fn build(self) -> DownloadObjectsOutput {
        DownloadObjectsOutput {
            objects_listed: self.objects_listed,
            archives_matched: self.archives_matched,
            objects_downloaded: self.objects_downloaded,
            missing_keys: self.missing_keys,
            total_bytes_transferred: self.total_bytes_transferred,
        }
    }
}
