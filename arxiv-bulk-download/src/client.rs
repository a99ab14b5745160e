/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::Config;
use std::sync::Arc;

/// Authenticated session against the bucket.
///
/// Created once and passed to every operation. Cloning is cheap and shares the same
/// underlying S3 client.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) handle: Arc<Handle>,
}

/// Whatever is needed to carry out operations
#[derive(Debug)]
pub(crate) struct Handle {
    pub(crate) config: crate::Config,
}

impl Handle {
    /// The S3 client to use for SDK operations
    pub(crate) fn client(&self) -> &aws_sdk_s3::Client {
        self.config.client()
    }

    /// The bucket every operation runs against
    pub(crate) fn bucket(&self) -> &str {
        self.config.bucket()
    }
}

impl Client {
    /// Creates a new client from a config.
    pub fn new(config: Config) -> Client {
        let handle = Arc::new(Handle { config });
        Client { handle }
    }

    /// Returns the client's configuration
    pub fn config(&self) -> &Config {
        &self.handle.config
    }

    /// Download a single object to a local path mirroring its key.
    ///
    /// Constructs a fluent builder for the
    /// [`Download`](crate::operation::download::builders::DownloadFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// async fn get_one(
    ///     client: &arxiv_bulk_download::Client,
    /// ) -> Result<(), arxiv_bulk_download::error::Error> {
    ///     let output = client
    ///         .download()
    ///         .key("pdf/arXiv_pdf_0001_001.tar")
    ///         .destination("/data/arxiv")
    ///         .send()
    ///         .await?;
    ///     println!("wrote {}", output.path().display());
    ///     Ok(())
    /// }
    /// ```
    pub fn download(&self) -> crate::operation::download::builders::DownloadFluentBuilder {
        crate::operation::download::builders::DownloadFluentBuilder::new(self.handle.clone())
    }

    /// List every object under a prefix, one page at a time.
    ///
    /// Constructs a fluent builder for the
    /// [`ListObjects`](crate::operation::list_objects::ListObjectsFluentBuilder) operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// async fn count(
    ///     client: &arxiv_bulk_download::Client,
    /// ) -> Result<usize, arxiv_bulk_download::error::Error> {
    ///     let mut pages = client.list_objects().key_prefix("pdf/").into_paginator();
    ///     let mut total = 0;
    ///     while let Some(page) = pages.next_page().await {
    ///         total += page?.len();
    ///     }
    ///     Ok(total)
    /// }
    /// ```
    pub fn list_objects(&self) -> crate::operation::list_objects::ListObjectsFluentBuilder {
        crate::operation::list_objects::ListObjectsFluentBuilder::new(self.handle.clone())
    }

    /// Download every matching object under a prefix, sequentially and in listing order.
    ///
    /// Only objects accepted by the filter (default: keys ending in `.tar`) are downloaded.
    /// Missing objects are logged and skipped; any other failure stops the transfer.
    ///
    /// Constructs a fluent builder for the
    /// [`DownloadObjects`](crate::operation::download_objects::builders::DownloadObjectsFluentBuilder) operation.
    pub fn download_objects(
        &self,
    ) -> crate::operation::download_objects::builders::DownloadObjectsFluentBuilder {
        crate::operation::download_objects::builders::DownloadObjectsFluentBuilder::new(
            self.handle.clone(),
        )
    }

    /// Download the bucket manifest and summarize it.
    ///
    /// Constructs a fluent builder for the
    /// [`FetchManifest`](crate::operation::fetch_manifest::FetchManifestFluentBuilder) operation.
    pub fn fetch_manifest(&self) -> crate::operation::fetch_manifest::FetchManifestFluentBuilder {
        crate::operation::fetch_manifest::FetchManifestFluentBuilder::new(self.handle.clone())
    }
}
