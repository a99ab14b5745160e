/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use aws_smithy_types::error::operation::BuildError;

use crate::operation::DEFAULT_DESTINATION;

/// Input type for downloading a single object
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DownloadInput {
    /// Key of the object to download
    pub key: String,

    /// Directory the key path is resolved against
    pub destination: PathBuf,
}

impl DownloadInput {
    /// Creates a new builder-style object to manufacture [`DownloadInput`](crate::operation::download::DownloadInput).
    pub fn builder() -> DownloadInputBuilder {
        DownloadInputBuilder::default()
    }

    /// Key of the object to download
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Directory the key path is resolved against
    pub fn destination(&self) -> &Path {
        &self.destination
    }
}

/// A builder for [`DownloadInput`](crate::operation::download::DownloadInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct DownloadInputBuilder {
    pub(crate) key: Option<String>,
    pub(crate) destination: Option<PathBuf>,
}

impl DownloadInputBuilder {
    /// Key of the object to download.
    ///
    /// NOTE: A key is required.
    pub fn key(mut self, input: impl Into<String>) -> Self {
        self.key = Some(input.into());
        self
    }

    /// Key of the object to download.
    pub fn set_key(mut self, input: Option<String>) -> Self {
        self.key = input;
        self
    }

    /// Key of the object to download.
    pub fn get_key(&self) -> &Option<String> {
        &self.key
    }

    /// Directory the key path is resolved against.
    ///
    /// Default is the current working directory.
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.destination = Some(input.into());
        self
    }

    /// Directory the key path is resolved against.
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.destination = input;
        self
    }

    /// Directory the key path is resolved against.
    pub fn get_destination(&self) -> &Option<PathBuf> {
        &self.destination
    }

    /// Consumes the builder and constructs a [`DownloadInput`](crate::operation::download::DownloadInput).
    pub fn build(self) -> Result<DownloadInput, BuildError> {
        let key = match self.key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(BuildError::missing_field("key", "A key is required")),
        };

        Ok(DownloadInput {
            key,
            destination: self
                .destination
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION)),
        })
    }
}
