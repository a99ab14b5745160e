/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */
use std::path::PathBuf;
use std::process::ExitCode;

use arxiv_bulk_download::config::credentials::Credentials;
use arxiv_bulk_download::error::Error;
use arxiv_bulk_download::types::DownloadFilter;
use arxiv_bulk_download::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use clap::Parser;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "arxiv-bulk-download")]
#[command(about = "Downloads the arXiv PDF archives from the requester-pays S3 bucket.")]
pub struct Args {
    /// INI file holding ACCESS_KEY and SECRET_KEY in its [DEFAULT] section
    #[arg(long, default_value = "config.ini")]
    config: PathBuf,

    /// Bucket to download from
    #[arg(long, default_value = arxiv_bulk_download::DEFAULT_BUCKET)]
    bucket: String,

    /// Region the bucket lives in
    #[arg(long, default_value = arxiv_bulk_download::DEFAULT_REGION)]
    region: String,

    /// Only objects whose key begins with this prefix are listed
    #[arg(long, default_value = arxiv_bulk_download::DEFAULT_KEY_PREFIX)]
    prefix: String,

    /// Only listed objects whose key ends with this suffix are downloaded
    #[arg(long, default_value = arxiv_bulk_download::DEFAULT_ARCHIVE_SUFFIX)]
    suffix: String,

    /// Key of the bucket manifest
    #[arg(long, default_value = arxiv_bulk_download::DEFAULT_MANIFEST_KEY)]
    manifest_key: String,

    /// Directory downloaded keys are written under
    #[arg(long, default_value = ".")]
    destination: PathBuf,

    /// Send requests to an S3 compatible endpoint instead of Amazon S3
    #[arg(long)]
    endpoint_url: Option<String>,

    /// List and filter objects without downloading them
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    dry_run: bool,

    /// Do not fetch or report the bucket manifest
    #[arg(long, default_value_t = false, action = clap::ArgAction::SetTrue)]
    skip_manifest: bool,
}

async fn run(args: Args) -> Result<(), Error> {
    let credentials = Credentials::from_file(&args.config)?;

    println!("Connecting to Amazon S3...");
    let config = arxiv_bulk_download::from_credentials(credentials)
        .bucket(args.bucket.as_str())
        .region(args.region.as_str())
        .set_endpoint_url(args.endpoint_url.clone())
        .load()
        .await?;
    let client = Client::new(config);

    if !args.skip_manifest {
        let stats = client
            .fetch_manifest()
            .key(args.manifest_key.as_str())
            .destination(args.destination.clone())
            .send()
            .await?;

        println!();
        println!("{} bucket metadata:", args.bucket);
        println!("Manifest was last edited on {}", stats.timestamp());
        println!("{} bucket contains {} tars", args.bucket, stats.file_count());
        println!("Total size: {} GiB", stats.total_gib());
        println!();
    }

    if args.dry_run {
        println!("Listing tars (dry run)...");
    } else {
        println!("Beginning tar download...");
    }

    let output = client
        .download_objects()
        .key_prefix(args.prefix.as_str())
        .destination(args.destination.clone())
        .set_filter(Some(DownloadFilter::key_suffix(args.suffix.as_str())))
        .dry_run(args.dry_run)
        .send()
        .await?;

    tracing::debug!(
        listed = output.objects_listed(),
        downloaded = output.objects_downloaded(),
        bytes = output.total_bytes_transferred(),
        "download complete"
    );
    if !output.missing_keys().is_empty() {
        tracing::warn!(
            "{} listed objects no longer exist in {} bucket",
            output.missing_keys().len(),
            args.bucket
        );
    }

    println!("Processed {} tars", output.archives_matched());
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("bulk download failed: {}", DisplayErrorContext(&err));
            ExitCode::FAILURE
        }
    }
}
