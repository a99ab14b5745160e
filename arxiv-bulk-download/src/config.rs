/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::error::{self, Error};
use crate::DEFAULT_BUCKET;

/// Credentials loaded from a local INI file
pub mod credentials;

/// Configuration loading from credentials
pub mod loader;

/// Configuration for a [`Client`](crate::client::Client)
#[derive(Debug, Clone)]
pub struct Config {
    bucket: String,
    client: aws_sdk_s3::client::Client,
}

impl Config {
    /// Create a new `Config` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The bucket every operation runs against
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The Amazon S3 client instance that will be used to send requests to S3.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [Config]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    bucket: Option<String>,
    client: Option<aws_sdk_s3::Client>,
}

impl Builder {
    /// Set the bucket to download from.
    ///
    /// Default is the `arxiv` bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Set the bucket to download from.
    pub fn set_bucket(mut self, bucket: Option<String>) -> Self {
        self.bucket = bucket;
        self
    }

    /// Set an explicit S3 client to use.
    ///
    /// NOTE: A client is required.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Consumes the builder and constructs a [`Config`](crate::config::Config)
    pub fn build(self) -> Result<Config, Error> {
        let client = self
            .client
            .ok_or_else(|| error::invalid_input("an S3 client must be set"))?;
        let bucket = self.bucket.unwrap_or_else(|| DEFAULT_BUCKET.to_owned());
        if bucket.is_empty() {
            return Err(error::invalid_input("bucket name must not be empty"));
        }

        Ok(Config { bucket, client })
    }
}
