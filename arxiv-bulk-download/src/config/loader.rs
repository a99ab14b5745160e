/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_types::region::Region;
use aws_types::SdkConfig;

use crate::config::credentials::Credentials;
use crate::config::Builder;
use crate::error::Error;
use crate::{Config, DEFAULT_REGION};

/// Provider name attached to the static credentials
const CREDENTIALS_PROVIDER_NAME: &str = "arxiv-bulk-download-config-file";

/// Load a [`Config`] from explicit credentials.
#[derive(Debug)]
pub struct ConfigLoader {
    builder: Builder,
    credentials: Credentials,
    region: Option<String>,
    endpoint_url: Option<String>,
}

impl ConfigLoader {
    /// Create a loader that signs every request with `credentials`
    pub fn new(credentials: Credentials) -> Self {
        Self {
            builder: Builder::default(),
            credentials,
            region: None,
            endpoint_url: None,
        }
    }

    /// Set the bucket to download from.
    ///
    /// Default is the `arxiv` bucket.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.builder = self.builder.bucket(bucket);
        self
    }

    /// Set the region the bucket lives in.
    ///
    /// Default is `us-east-1`, where the arXiv bucket is hosted.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Send requests to an S3 compatible endpoint instead of Amazon S3.
    ///
    /// Path style addressing is used when an endpoint is set.
    pub fn endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    /// Set the endpoint override, if any
    pub fn set_endpoint_url(mut self, endpoint_url: Option<String>) -> Self {
        self.endpoint_url = endpoint_url;
        self
    }

    /// Load the configuration and build the underlying S3 client.
    ///
    /// Requests are never retried.
    pub async fn load(self) -> Result<Config, Error> {
        let region = self.region.unwrap_or_else(|| DEFAULT_REGION.to_owned());
        tracing::debug!(region = %region, "building S3 client");

        let credentials = aws_sdk_s3::config::Credentials::new(
            self.credentials.access_key(),
            self.credentials.secret_key(),
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled());

        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let shared_config: SdkConfig = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared_config)
            .force_path_style(self.endpoint_url.is_some())
            .build();
        let s3_client = aws_sdk_s3::Client::from_conf(s3_config);

        self.builder.client(s3_client).build()
    }
}
