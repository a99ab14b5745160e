/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use arxiv_bulk_download::error::ErrorKind;
use aws_sdk_s3::operation::list_objects_v2::{ListObjectsV2Error, ListObjectsV2Output};
use aws_smithy_mocks_experimental::{mock, mock_client, Rule, RuleMode};
use aws_smithy_types::error::ErrorMetadata;
use test_common::MockBucket;

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
async fn test_pages_follow_continuation_tokens() {
    let bucket = MockBucket::builder()
        .list_only_key("pdf/b.tar")
        .list_only_key("pdf/a.tar")
        .page()
        .list_only_key("pdf/readme.txt")
        .page()
        .list_only_key("pdf/c.tar")
        .build();
    let client = test_client(bucket.rules().as_slice());

    let mut paginator = client.list_objects().key_prefix("pdf/").into_paginator();
    let mut pages = Vec::new();
    while let Some(page) = paginator.next_page().await {
        let keys: Vec<String> = page
            .unwrap()
            .into_iter()
            .map(|obj| obj.key().to_owned())
            .collect();
        pages.push(keys);
    }

    assert_eq!(3, paginator.pages_fetched());
    assert_eq!(
        vec![
            vec!["pdf/b.tar".to_owned(), "pdf/a.tar".to_owned()],
            vec!["pdf/readme.txt".to_owned()],
            vec!["pdf/c.tar".to_owned()],
        ],
        pages
    );

    // exhausted paginators stay exhausted
    assert!(paginator.next_page().await.is_none());
}

#[tokio::test]
async fn test_empty_listing_yields_one_empty_page() {
    let bucket = MockBucket::builder().build();
    let client = test_client(bucket.rules().as_slice());

    let mut paginator = client.list_objects().into_paginator();
    let page = paginator.next_page().await.unwrap().unwrap();
    assert!(page.is_empty());
    assert!(paginator.next_page().await.is_none());
}

#[tokio::test]
async fn test_rejected_credentials() {
    let list_rule = mock!(aws_sdk_s3::Client::list_objects_v2).then_error(|| {
        ListObjectsV2Error::generic(
            ErrorMetadata::builder()
                .code("InvalidAccessKeyId")
                .message("The AWS Access Key Id you provided does not exist in our records.")
                .build(),
        )
    });
    let client = test_client(&[list_rule]);

    let mut paginator = client.list_objects().into_paginator();
    let err = paginator.next_page().await.unwrap().unwrap_err();
    assert_eq!(&ErrorKind::Auth, err.kind());

    // a failed listing is not retried
    assert!(paginator.next_page().await.is_none());
    assert_eq!(0, paginator.pages_fetched());
}

#[tokio::test]
async fn test_listing_error() {
    let list_rule = mock!(aws_sdk_s3::Client::list_objects_v2).then_error(|| {
        ListObjectsV2Error::generic(ErrorMetadata::builder().code("NoSuchBucket").build())
    });
    let client = test_client(&[list_rule]);

    let mut paginator = client.list_objects().key_prefix("pdf/").into_paginator();
    let err = paginator.next_page().await.unwrap().unwrap_err();
    assert_eq!(&ErrorKind::ListingFailed, err.kind());
    assert!(paginator.next_page().await.is_none());
}

/// A page with an unusable entry ends the listing, even when the server reported more pages
#[tokio::test]
async fn test_invalid_page_ends_listing() {
    let first_page = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|r| r.continuation_token().is_none())
        .then_output(|| {
            ListObjectsV2Output::builder()
                .contents(aws_sdk_s3::types::Object::builder().size(3).build())
                .is_truncated(true)
                .next_continuation_token("token1")
                .build()
        });
    let second_page = mock!(aws_sdk_s3::Client::list_objects_v2)
        .match_requests(|r| r.continuation_token() == Some("token1"))
        .then_output(|| {
            ListObjectsV2Output::builder()
                .contents(aws_sdk_s3::types::Object::builder().key("pdf/a.tar").build())
                .build()
        });
    let client = test_client(&[first_page, second_page]);

    let mut paginator = client.list_objects().key_prefix("pdf/").into_paginator();
    let err = paginator.next_page().await.unwrap().unwrap_err();
    assert_eq!(&ErrorKind::InputInvalid, err.kind());

    assert!(paginator.next_page().await.is_none());
    assert_eq!(0, paginator.pages_fetched());
}
