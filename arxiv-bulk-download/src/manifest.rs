/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::Path;

use crate::error::{self, Error};
use crate::GIBIBYTE;

/// Root element of the PDF manifest
pub const MANIFEST_ROOT_TAG: &str = "arXivPDF";

const TIMESTAMP_TAG: &str = "timestamp";
const FILE_TAG: &str = "file";
const SIZE_TAG: &str = "size";

/// Aggregate statistics of the bucket manifest.
///
/// The manifest looks like:
///
/// ```xml
/// <arXivPDF>
///   <file>
///     <filename>pdf/arXiv_pdf_0001_001.tar</filename>
///     <size>226202489</size>
///     <timestamp>2010-12-23 00:13:59</timestamp>
///   </file>
///   <timestamp>Mon Jun 29 02:01:22 2020</timestamp>
/// </arXivPDF>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestStats {
    timestamp: String,
    file_count: u64,
    total_bytes: u64,
}

impl ManifestStats {
    /// Parse manifest XML.
    ///
    /// The timestamp is the root's own `timestamp` child; per-file timestamps are ignored.
    /// Every `file` element counts as one entry and every `size` element is added to the total.
    pub fn parse(text: &str) -> Result<Self, Error> {
        let doc = roxmltree::Document::parse(text)?;
        let root = doc.root_element();
        if !root.has_tag_name(MANIFEST_ROOT_TAG) {
            return Err(error::manifest_parse(format!(
                "expected root element `{MANIFEST_ROOT_TAG}`, found `{}`",
                root.tag_name().name()
            )));
        }

        let timestamp = root
            .children()
            .find(|node| node.has_tag_name(TIMESTAMP_TAG))
            .ok_or_else(|| {
                error::manifest_parse(format!(
                    "`{MANIFEST_ROOT_TAG}` has no `{TIMESTAMP_TAG}` element"
                ))
            })?
            .text()
            .ok_or_else(|| error::manifest_parse(format!("`{TIMESTAMP_TAG}` is empty")))?
            .to_owned();

        let file_count = root
            .descendants()
            .filter(|node| node.has_tag_name(FILE_TAG))
            .count() as u64;

        let mut total_bytes: u64 = 0;
        for node in root.descendants().filter(|node| node.has_tag_name(SIZE_TAG)) {
            let text = node.text().unwrap_or_default().trim();
            let size: u64 = text.parse().map_err(|err| {
                error::manifest_parse(format!("invalid `{SIZE_TAG}` value `{text}`: {err}"))
            })?;
            total_bytes = total_bytes
                .checked_add(size)
                .ok_or_else(|| error::manifest_parse("total size overflows u64"))?;
        }

        Ok(ManifestStats {
            timestamp,
            file_count,
            total_bytes,
        })
    }

    /// Read and parse a manifest from disk
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = tokio::fs::read_to_string(path.as_ref()).await?;
        Self::parse(&text)
    }

    /// When the manifest was last edited, verbatim
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Number of archive entries listed
    pub fn file_count(&self) -> u64 {
        self.file_count
    }

    /// Sum of all listed sizes in bytes
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Sum of all listed sizes in GiB
    pub fn total_gib(&self) -> f64 {
        self.total_bytes as f64 / GIBIBYTE as f64
    }
}
