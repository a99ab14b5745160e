/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Error;
use crate::manifest::ManifestStats;
use crate::operation::download::{Download, DownloadInput};
use crate::operation::DEFAULT_DESTINATION;
use crate::DEFAULT_MANIFEST_KEY;

/// Fluent builder for downloading and summarizing the bucket manifest
#[derive(Debug)]
pub struct FetchManifestFluentBuilder {
    handle: Arc<crate::client::Handle>,
    key: Option<String>,
    destination: Option<PathBuf>,
}

impl FetchManifestFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            key: None,
            destination: None,
        }
    }

    /// Download the manifest and parse it.
    ///
    /// The manifest is not subject to any download filter. Unlike the bulk download, a missing
    /// manifest is an error.
    #[tracing::instrument(skip_all, level = "debug", name = "fetch-manifest")]
    pub async fn send(self) -> Result<ManifestStats, Error> {
        let input = DownloadInput {
            key: self.key.unwrap_or_else(|| DEFAULT_MANIFEST_KEY.to_owned()),
            destination: self
                .destination
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION)),
        };

        let output = Download::orchestrate(self.handle, input).await?;
        let stats = ManifestStats::from_path(output.path()).await?;
        tracing::debug!(
            files = stats.file_count(),
            bytes = stats.total_bytes(),
            "parsed manifest"
        );
        Ok(stats)
    }

    /// Key of the manifest object.
    ///
    /// Default is `pdf/arXiv_pdf_manifest.xml`.
    pub fn key(mut self, input: impl Into<String>) -> Self {
        self.key = Some(input.into());
        self
    }

    /// Key of the manifest object
    pub fn set_key(mut self, input: Option<String>) -> Self {
        self.key = input;
        self
    }

    /// Key of the manifest object
    pub fn get_key(&self) -> &Option<String> {
        &self.key
    }

    /// Directory the manifest key path is resolved against
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.destination = Some(input.into());
        self
    }

    /// Directory the manifest key path is resolved against
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.destination = input;
        self
    }

    /// Directory the manifest key path is resolved against
    pub fn get_destination(&self) -> &Option<PathBuf> {
        &self.destination
    }
}
