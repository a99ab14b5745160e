/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

/// Output from downloading a single object
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadOutput {
    pub(crate) key: String,
    pub(crate) path: PathBuf,
    pub(crate) bytes_transferred: u64,
}

impl DownloadOutput {
    /// Key of the downloaded object
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Local path the object was written to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of bytes written
    pub fn bytes_transferred(&self) -> u64 {
        self.bytes_transferred
    }
}
