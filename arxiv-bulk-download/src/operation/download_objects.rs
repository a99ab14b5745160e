/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Operation builders
pub mod builders;

mod input;
/// Input type for downloading multiple objects
pub use input::{DownloadObjectsInput, DownloadObjectsInputBuilder};
mod output;
/// Output type for downloading multiple objects
pub use output::{DownloadObjectsOutput, DownloadObjectsOutputBuilder};

use std::sync::Arc;

use crate::error::{Error, ErrorKind};
use crate::operation::download::{Download, DownloadInput};
use crate::operation::list_objects::ListObjectsPaginator;
use crate::types::ObjectDescriptor;

/// Operation struct for downloading multiple objects
#[derive(Clone, Default, Debug)]
pub(crate) struct DownloadObjects;

impl DownloadObjects {
    /// Walk the listing page by page and download every matching object in order.
    ///
    /// A missing object is logged and skipped. Any other failure ends the transfer.
    #[tracing::instrument(
        skip_all,
        level = "debug",
        name = "download-objects",
        fields(prefix = input.key_prefix())
    )]
    pub(crate) async fn orchestrate(
        handle: Arc<crate::client::Handle>,
        input: DownloadObjectsInput,
    ) -> Result<DownloadObjectsOutput, Error> {
        let mut paginator =
            ListObjectsPaginator::new(handle.clone(), Some(input.key_prefix().to_owned()));
        let mut totals = DownloadObjectsOutputBuilder::default();

        while let Some(page) = paginator.next_page().await {
            let page = page?;
            totals.inc_listed(page.len());

            for object in page {
                if !input.filter().matches(&object) {
                    tracing::debug!("skipping object due to filter: {:?}", object.key());
                    continue;
                }
                totals.inc_matched();

                if input.dry_run() {
                    tracing::info!("would download {}", object.key());
                    continue;
                }

                download_one(&handle, &input, object, &mut totals).await?;
            }
        }

        let output = totals.build();
        tracing::debug!(
            listed = output.objects_listed(),
            matched = output.archives_matched(),
            downloaded = output.objects_downloaded(),
            missing = output.missing_keys().len(),
            "finished downloading objects"
        );
        Ok(output)
    }
}

async fn download_one(
    handle: &Arc<crate::client::Handle>,
    input: &DownloadObjectsInput,
    object: ObjectDescriptor,
    totals: &mut DownloadObjectsOutputBuilder,
) -> Result<(), Error> {
    let download_input = DownloadInput {
        key: object.key,
        destination: input.destination().to_path_buf(),
    };
    let key = download_input.key.clone();

    match Download::orchestrate(handle.clone(), download_input).await {
        Ok(output) => {
            totals.record_download(output.bytes_transferred());
            Ok(())
        }
        Err(err) if err.kind() == &ErrorKind::NotFound => {
            tracing::warn!("ERROR: {key} does not exist in {} bucket", handle.bucket());
            totals.record_missing(key);
            Ok(())
        }
        Err(err) => Err(err),
    }
}
