/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::task::Poll;

use arxiv_bulk_download::error::{BoxError, ErrorKind};
use arxiv_bulk_download::operation::download::DownloadInput;
use aws_sdk_s3::{operation::get_object::GetObjectOutput, primitives::ByteStream};
use aws_smithy_mocks_experimental::{mock, mock_client, Rule, RuleMode};
use aws_smithy_types::body::SdkBody;
use bytes::Bytes;
use test_common::{relative_path_names, MockBucket};

fn test_client(rules: &[Rule]) -> arxiv_bulk_download::Client {
    let client = mock_client!(aws_sdk_s3, RuleMode::MatchAny, rules);
    let config = arxiv_bulk_download::Config::builder()
        .bucket("test-bucket")
        .client(client)
        .build()
        .unwrap();
    arxiv_bulk_download::Client::new(config)
}

#[tokio::test]
async fn test_download_to_key_path() {
    let bucket = MockBucket::builder()
        .unlisted_key_with_contents("pdf/nested/arXiv_pdf_0001_001.tar", "tar bytes")
        .build();
    let client = test_client(bucket.rules().as_slice());
    let dest = tempfile::tempdir().unwrap();

    let output = client
        .download()
        .key("pdf/nested/arXiv_pdf_0001_001.tar")
        .destination(dest.path())
        .send()
        .await
        .unwrap();

    assert_eq!("pdf/nested/arXiv_pdf_0001_001.tar", output.key());
    assert_eq!(9, output.bytes_transferred());
    assert_eq!(
        dest.path().join("pdf/nested/arXiv_pdf_0001_001.tar"),
        output.path()
    );
    assert_eq!(b"tar bytes".to_vec(), std::fs::read(output.path()).unwrap());
}

#[tokio::test]
async fn test_download_overwrites_existing_file() {
    let bucket = MockBucket::builder()
        .unlisted_key_with_contents("pdf/a.tar", "fresh")
        .build();
    let client = test_client(bucket.rules().as_slice());
    let dest = tempfile::tempdir().unwrap();
    std::fs::create_dir(dest.path().join("pdf")).unwrap();
    std::fs::write(dest.path().join("pdf/a.tar"), b"stale and longer").unwrap();

    DownloadInput::builder()
        .key("pdf/a.tar")
        .destination(dest.path())
        .send_with(&client)
        .await
        .unwrap();

    assert_eq!(
        b"fresh".to_vec(),
        std::fs::read(dest.path().join("pdf/a.tar")).unwrap()
    );
}

#[tokio::test]
async fn test_missing_object_leaves_no_file() {
    let bucket = MockBucket::builder()
        .unlisted_missing_key("pdf/gone.tar")
        .build();
    let client = test_client(bucket.rules().as_slice());
    let dest = tempfile::tempdir().unwrap();

    let err = client
        .download()
        .key("pdf/gone.tar")
        .destination(dest.path())
        .send()
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    assert!(relative_path_names(dest.path()).unwrap().is_empty());
}

#[tokio::test]
async fn test_key_is_required() {
    let client = test_client(&[]);

    let err = client.download().send().await.unwrap_err();
    assert_eq!(&ErrorKind::InputInvalid, err.kind());
}

#[tokio::test]
async fn test_key_outside_destination_is_rejected() {
    let client = test_client(&[]);
    let dest = tempfile::tempdir().unwrap();

    let err = client
        .download()
        .key("../escape.tar")
        .destination(dest.path())
        .send()
        .await
        .unwrap_err();

    assert_eq!(&ErrorKind::InputInvalid, err.kind());
}

/// Body that yields `data` in one frame and then fails on every further read
#[derive(Debug)]
struct FailingBody {
    data: Option<Bytes>,
}

impl http_body_1x::Body for FailingBody {
    type Data = Bytes;
    type Error = BoxError;

    fn poll_frame(
        self: std::pin::Pin<&mut Self>,
        _cx: &mut std::task::Context<'_>,
    ) -> Poll<Option<Result<http_body_1x::Frame<Self::Data>, Self::Error>>> {
        let result = match self.get_mut().data.take() {
            Some(data) => Ok(http_body_1x::Frame::data(data)),
            None => Err(BoxError::from("simulated body read failure")),
        };
        Poll::Ready(Some(result))
    }
}

#[tokio::test]
async fn test_interrupted_body_leaves_no_file() {
    let get_rule = mock!(aws_sdk_s3::Client::get_object)
        .match_requests(|r| r.key() == Some("pdf/a.tar"))
        .then_output(|| {
            let body = FailingBody {
                data: Some(Bytes::from_static(b"first half of the archive")),
            };
            GetObjectOutput::builder()
                .body(ByteStream::new(SdkBody::from_body_1_x(body)))
                .content_length(1024)
                .build()
        });
    let client = test_client(&[get_rule]);
    let dest = tempfile::tempdir().unwrap();

    let err = client
        .download()
        .key("pdf/a.tar")
        .destination(dest.path())
        .send()
        .await
        .unwrap_err();

    assert_eq!(&ErrorKind::DownloadFailed, err.kind());
    assert!(!dest.path().join("pdf/a.tar").exists());
    assert!(relative_path_names(dest.path()).unwrap().is_empty());
}
