/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::{Path, PathBuf};

use aws_smithy_types::error::operation::BuildError;

use crate::operation::DEFAULT_DESTINATION;
use crate::types::{DownloadFilter, ObjectDescriptor};
use crate::DEFAULT_KEY_PREFIX;

/// Input type for downloading multiple objects
#[non_exhaustive]
#[derive(Clone, Debug)]
pub struct DownloadObjectsInput {
    /// Only keys beginning with this prefix are listed
    pub key_prefix: String,

    /// The destination directory to which files should be downloaded
    pub destination: PathBuf,

    /// Selects which listed objects are downloaded
    pub filter: DownloadFilter,

    /// List and filter without downloading anything
    pub dry_run: bool,
}

impl DownloadObjectsInput {
    /// Creates a new builder-style object to manufacture [`DownloadObjectsInput`](crate::operation::download_objects::DownloadObjectsInput).
    pub fn builder() -> DownloadObjectsInputBuilder {
        DownloadObjectsInputBuilder::default()
    }

    /// Only keys beginning with this prefix are listed
    pub fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    /// The destination directory to which files should be downloaded
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Selects which listed objects are downloaded
    pub fn filter(&self) -> &DownloadFilter {
        &self.filter
    }

    /// List and filter without downloading anything
    pub fn dry_run(&self) -> bool {
        self.dry_run
    }
}

/// A builder for [`DownloadObjectsInput`](crate::operation::download_objects::DownloadObjectsInput).
#[non_exhaustive]
#[derive(Clone, Debug, Default)]
pub struct DownloadObjectsInputBuilder {
    pub(crate) key_prefix: Option<String>,
    pub(crate) destination: Option<PathBuf>,
    pub(crate) filter: Option<DownloadFilter>,
    pub(crate) dry_run: bool,
}

impl DownloadObjectsInputBuilder {
    /// Limit the listing to keys that begin with the given prefix.
    ///
    /// Default is `pdf/`.
    pub fn key_prefix(mut self, input: impl Into<String>) -> Self {
        self.key_prefix = Some(input.into());
        self
    }

    /// Limit the listing to keys that begin with the given prefix.
    pub fn set_key_prefix(mut self, input: Option<String>) -> Self {
        self.key_prefix = input;
        self
    }

    /// Limit the listing to keys that begin with the given prefix.
    pub fn get_key_prefix(&self) -> &Option<String> {
        &self.key_prefix
    }

    /// Set the destination directory to which files should be downloaded.
    ///
    /// Default is the current working directory.
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.destination = Some(input.into());
        self
    }

    /// Set the destination directory to which files should be downloaded
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.destination = input;
        self
    }

    /// The destination directory to which files should be downloaded
    pub fn get_destination(&self) -> &Option<PathBuf> {
        &self.destination
    }

    /// Choose which listed objects are downloaded.
    ///
    /// Default selects keys ending in `.tar`.
    pub fn filter(
        mut self,
        input: impl Fn(&ObjectDescriptor) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.filter = Some(DownloadFilter::from(input));
        self
    }

    /// Choose which listed objects are downloaded.
    pub fn set_filter(mut self, input: Option<DownloadFilter>) -> Self {
        self.filter = input;
        self
    }

    /// Choose which listed objects are downloaded.
    pub fn get_filter(&self) -> &Option<DownloadFilter> {
        &self.filter
    }

    /// List and filter without downloading anything
    pub fn dry_run(mut self, input: bool) -> Self {
        self.dry_run = input;
        self
    }

    /// List and filter without downloading anything
    pub fn get_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Consumes the builder and constructs a [`DownloadObjectsInput`](crate::operation::download_objects::DownloadObjectsInput).
    pub fn build(self) -> Result<DownloadObjectsInput, BuildError> {
        Ok(DownloadObjectsInput {
            key_prefix: self
                .key_prefix
                .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_owned()),
            destination: self
                .destination
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DESTINATION)),
            filter: self.filter.unwrap_or_default(),
            dry_run: self.dry_run,
        })
    }
}
