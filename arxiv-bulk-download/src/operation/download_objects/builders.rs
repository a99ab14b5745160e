/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::Error;
use crate::types::{DownloadFilter, ObjectDescriptor};

use super::{DownloadObjectsInputBuilder, DownloadObjectsOutput};

/// Fluent builder for constructing a multiple object download
#[derive(Debug)]
pub struct DownloadObjectsFluentBuilder {
    handle: Arc<crate::client::Handle>,
    inner: DownloadObjectsInputBuilder,
}

impl DownloadObjectsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            inner: ::std::default::Default::default(),
        }
    }

    /// List, filter, and download every matching object, one at a time
    pub async fn send(self) -> Result<DownloadObjectsOutput, Error> {
        let input = self.inner.build()?;
        crate::operation::download_objects::DownloadObjects::orchestrate(self.handle, input).await
    }

    /// Limit the listing to keys that begin with the given prefix
    pub fn key_prefix(mut self, input: impl Into<String>) -> Self {
        self.inner = self.inner.key_prefix(input);
        self
    }

    /// Limit the listing to keys that begin with the given prefix
    pub fn set_key_prefix(mut self, input: Option<String>) -> Self {
        self.inner = self.inner.set_key_prefix(input);
        self
    }

    /// Limit the listing to keys that begin with the given prefix
    pub fn get_key_prefix(&self) -> &Option<String> {
        self.inner.get_key_prefix()
    }

    /// Set the destination directory to which files should be downloaded
    pub fn destination(mut self, input: impl Into<PathBuf>) -> Self {
        self.inner = self.inner.destination(input);
        self
    }

    /// Set the destination directory to which files should be downloaded
    pub fn set_destination(mut self, input: Option<PathBuf>) -> Self {
        self.inner = self.inner.set_destination(input);
        self
    }

    /// The destination directory to which files should be downloaded
    pub fn get_destination(&self) -> &Option<PathBuf> {
        self.inner.get_destination()
    }

    /// Filter unwanted objects from being downloaded
    pub fn filter(
        mut self,
        input: impl Fn(&ObjectDescriptor) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.inner = self.inner.filter(input);
        self
    }

    /// Filter unwanted objects from being downloaded
    pub fn set_filter(mut self, input: Option<DownloadFilter>) -> Self {
        self.inner = self.inner.set_filter(input);
        self
    }

    /// Filter unwanted objects from being downloaded
    pub fn get_filter(&self) -> &Option<DownloadFilter> {
        self.inner.get_filter()
    }

    /// List and filter without downloading anything
    pub fn dry_run(mut self, input: bool) -> Self {
        self.inner = self.inner.dry_run(input);
        self
    }

    /// List and filter without downloading anything
    pub fn get_dry_run(&self) -> bool {
        self.inner.get_dry_run()
    }
}

impl crate::operation::download_objects::input::DownloadObjectsInputBuilder {
    /// Download multiple objects with this input using the given client.
    pub async fn send_with(self, client: &crate::Client) -> Result<DownloadObjectsOutput, Error> {
        let mut fluent_builder = client.download_objects();
        fluent_builder.inner = self;
        fluent_builder.send().await
    }
}
