/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
/// Request type for downloading a single object
pub use input::{DownloadInput, DownloadInputBuilder};

mod output;
/// Response type for downloading a single object
pub use output::DownloadOutput;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::RequestPayer;
use path_clean::PathClean;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{self, Error};

/// Operation struct for single object download
#[derive(Clone, Default, Debug)]
pub(crate) struct Download;

impl Download {
    /// Download a single object into the path mirroring its key under the destination root.
    ///
    /// A missing object is returned as [`ErrorKind::NotFound`](crate::error::ErrorKind::NotFound);
    /// the caller decides whether that is fatal.
    #[tracing::instrument(skip_all, level = "debug", name = "download", fields(key = input.key()))]
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: DownloadInput,
    ) -> Result<DownloadOutput, Error> {
        let key = input.key();
        let key_path = local_key_path(input.destination(), key)?;
        let bucket = handle.bucket();

        tracing::info!(
            "Downloading s3://{bucket}/{key} to {}...",
            key_path.display()
        );

        if let Some(parent_dir) = key_path.parent() {
            ensure_dir(parent_dir).await?;
        }

        let resp = handle
            .client()
            .get_object()
            .bucket(bucket)
            .key(key)
            .request_payer(RequestPayer::Requester)
            .send()
            .await
            .map_err(error::download_failed)?;

        let bytes_transferred = match write_body(resp.body, &key_path).await {
            Ok(written) => written,
            Err(err) => {
                // don't leave a truncated object behind
                if let Err(rm_err) = fs::remove_file(&key_path).await {
                    tracing::debug!("unable to remove partial file {:?}: {rm_err}", key_path);
                }
                return Err(err);
            }
        };

        tracing::debug!("finished downloading {key} ({bytes_transferred} bytes)");

        Ok(DownloadOutput {
            key: key.to_owned(),
            path: key_path,
            bytes_transferred,
        })
    }
}

async fn write_body(mut body: ByteStream, path: &Path) -> Result<u64, Error> {
    let mut dest = fs::File::create(path).await?;
    let mut written: u64 = 0;
    while let Some(chunk) = body.try_next().await? {
        dest.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    dest.flush().await?;
    Ok(written)
}

/// Make sure `dir` exists, creating it (and any parents) only when absent.
///
/// Calling this on an existing directory is a no-op.
pub(crate) async fn ensure_dir(dir: &Path) -> Result<(), Error> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }

    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(error::invalid_input(format!(
            "{} exists and is not a directory",
            dir.display()
        ))),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("creating directory {:?}", dir);
            fs::create_dir_all(dir).await?;
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Derive the local path for a given S3 key.
///
/// The key is used as-is relative to `root_dir`; keys that would resolve outside of it are
/// rejected.
pub(crate) fn local_key_path(root_dir: &Path, key: &str) -> Result<PathBuf, Error> {
    if key.is_empty() {
        return Err(error::invalid_input("object key must not be empty"));
    }
    if key.ends_with('/') {
        return Err(error::invalid_input(format!(
            "Unable to download key: '{key}', it names a folder rather than an object"
        )));
    }

    let relative_path = Path::new(key).clean();
    validate_path(&relative_path, key)?;

    Ok(root_dir.join(relative_path))
}

fn validate_path(relative_path: &Path, key: &str) -> Result<(), Error> {
    // validate the resolved key path doesn't resolve outside the destination directory
    if relative_path.is_absolute()
        || relative_path.starts_with("..")
        || relative_path == Path::new(".")
    {
        return Err(error::invalid_input(format!(
            "Unable to download key: '{key}', its relative path resolves outside the destination"
        )));
    }

    Ok(())
}
