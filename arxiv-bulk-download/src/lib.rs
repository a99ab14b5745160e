/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/* Automatically managed default lints */
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
/* End of automatically managed default lints */
#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

//! Bulk download of the requester-pays arXiv bucket on Amazon S3.
//!
//! The crate drives a single sequential pipeline: load credentials, fetch and summarize the
//! bucket manifest, then list every object under a prefix and download the ones that look like
//! archives.
//!
//! # Examples
//!
//! ```no_run
//! # async fn example() -> Result<(), arxiv_bulk_download::error::Error> {
//! use arxiv_bulk_download::config::credentials::Credentials;
//!
//! let credentials = Credentials::from_file("config.ini")?;
//! let config = arxiv_bulk_download::from_credentials(credentials)
//!     .bucket("arxiv")
//!     .load()
//!     .await?;
//! let client = arxiv_bulk_download::Client::new(config);
//!
//! let stats = client
//!     .fetch_manifest()
//!     .key("pdf/arXiv_pdf_manifest.xml")
//!     .destination(".")
//!     .send()
//!     .await?;
//! println!("bucket contains {} tars", stats.file_count());
//!
//! let output = client
//!     .download_objects()
//!     .key_prefix("pdf/")
//!     .destination(".")
//!     .send()
//!     .await?;
//! println!("processed {} tars", output.archives_matched());
//! # Ok(())
//! # }
//! ```

/// One gibibyte in bytes
pub const GIBIBYTE: u64 = 1024 * 1024 * 1024;

/// Bucket holding the arXiv bulk data
pub const DEFAULT_BUCKET: &str = "arxiv";

/// Region the arXiv bucket lives in
pub const DEFAULT_REGION: &str = "us-east-1";

/// Key prefix of the PDF archives
pub const DEFAULT_KEY_PREFIX: &str = "pdf/";

/// Suffix identifying archive objects
pub const DEFAULT_ARCHIVE_SUFFIX: &str = ".tar";

/// Key of the PDF manifest
pub const DEFAULT_MANIFEST_KEY: &str = "pdf/arXiv_pdf_manifest.xml";

/// Error types emitted by `arxiv-bulk-download`
pub mod error;

/// Common types used by `arxiv-bulk-download`
pub mod types;

/// Bucket manifest parsing
pub mod manifest;

/// Client handle shared by every operation
pub mod client;

/// Client operations
pub mod operation;

/// Client and credential configuration
pub mod config;

pub use self::client::Client;
use self::config::credentials::Credentials;
use self::config::loader::ConfigLoader;
pub use self::config::Config;

/// Create a config loader that authenticates with the given credentials
pub fn from_credentials(credentials: Credentials) -> ConfigLoader {
    ConfigLoader::new(credentials)
}
