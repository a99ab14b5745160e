/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::mem;
use std::sync::Arc;

use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::types::RequestPayer;

use crate::error::{self, Error};
use crate::types::{ObjectDescriptor, Page};

/// Fluent builder for listing objects under a prefix
#[derive(Debug)]
pub struct ListObjectsFluentBuilder {
    handle: Arc<crate::client::Handle>,
    key_prefix: Option<String>,
}

impl ListObjectsFluentBuilder {
    pub(crate) fn new(handle: Arc<crate::client::Handle>) -> Self {
        Self {
            handle,
            key_prefix: None,
        }
    }

    /// Limit the listing to keys that begin with the given prefix
    pub fn key_prefix(mut self, input: impl Into<String>) -> Self {
        self.key_prefix = Some(input.into());
        self
    }

    /// Limit the listing to keys that begin with the given prefix
    pub fn set_key_prefix(mut self, input: Option<String>) -> Self {
        self.key_prefix = input;
        self
    }

    /// Limit the listing to keys that begin with the given prefix
    pub fn get_key_prefix(&self) -> &Option<String> {
        &self.key_prefix
    }

    /// Create a paginator. No request is sent until the first page is requested.
    pub fn into_paginator(self) -> ListObjectsPaginator {
        ListObjectsPaginator::new(self.handle, self.key_prefix)
    }
}

/// Paginator for the `ListObjectsV2` operation.
///
/// Forward only: each call to [`next_page`](Self::next_page) sends exactly one request, and once
/// the listing is complete (or a request failed) no further requests are made.
#[derive(Debug)]
pub struct ListObjectsPaginator {
    handle: Arc<crate::client::Handle>,
    key_prefix: Option<String>,
    state: State,
    pages_fetched: usize,
}

#[derive(Debug, PartialEq)]
enum State {
    Paginating { next_token: Option<String> },
    Done,
}

impl State {
    fn next_state(self, output: &ListObjectsV2Output) -> State {
        let is_truncated =
            output.is_truncated().unwrap_or(false) && output.next_continuation_token().is_some();

        match self {
            // more results with this prefix
            State::Paginating { .. } if is_truncated => State::Paginating {
                next_token: output.next_continuation_token.to_owned(),
            },
            State::Paginating { .. } | State::Done => State::Done,
        }
    }
}

impl ListObjectsPaginator {
    pub(crate) fn new(handle: Arc<crate::client::Handle>, key_prefix: Option<String>) -> Self {
        Self {
            handle,
            key_prefix,
            state: State::Paginating { next_token: None },
            pages_fetched: 0,
        }
    }

    /// Fetch the next page of the listing.
    ///
    /// Returns `None` once the listing is complete. A failed request is returned once and ends
    /// the listing.
    pub async fn next_page(&mut self) -> Option<Result<Page, Error>> {
        let next_token = match &self.state {
            State::Done => return None,
            State::Paginating { next_token } => next_token.clone(),
        };

        let list_result = self
            .handle
            .client()
            .list_objects_v2()
            .bucket(self.handle.bucket())
            .set_prefix(self.key_prefix.clone())
            .set_continuation_token(next_token)
            .request_payer(RequestPayer::Requester)
            .send()
            .await;

        let prev_state = mem::replace(&mut self.state, State::Done);
        let output = match list_result {
            Ok(output) => output,
            Err(err) => return Some(Err(error::listing_failed(err))),
        };

        // a page that can't be converted ends the listing like a failed request
        let page = match page_from_output(&output) {
            Ok(page) => page,
            Err(err) => return Some(Err(err)),
        };

        self.state = prev_state.next_state(&output);
        self.pages_fetched += 1;
        tracing::debug!(
            page = self.pages_fetched,
            objects = page.len(),
            "received listing page"
        );

        Some(Ok(page))
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }
}

fn page_from_output(output: &ListObjectsV2Output) -> Result<Page, Error> {
    let objects = output
        .contents()
        .iter()
        .map(ObjectDescriptor::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(objects))
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::{operation::list_objects_v2::ListObjectsV2Output, types::Object};

    use super::{page_from_output, State};

    #[test]
    fn test_next_state() {
        let start = State::Paginating { next_token: None };

        let output1 = list_resp(Some("token1"), vec!["pdf/k1.tar", "pdf/k2.txt"]);
        let output2 = list_resp(Some("token2"), vec!["pdf/k3.tar"]);
        let output3 = list_resp(None, vec!["pdf/k4.tar"]);

        let state2 = start.next_state(&output1);
        assert_eq!(
            state2,
            State::Paginating {
                next_token: Some("token1".to_owned()),
            }
        );

        let state3 = state2.next_state(&output2);
        assert_eq!(
            state3,
            State::Paginating {
                next_token: Some("token2".to_owned()),
            }
        );

        let state4 = state3.next_state(&output3);
        assert_eq!(state4, State::Done);
        assert_eq!(State::Done, state4.next_state(&output1));
    }

    #[test]
    fn test_truncated_without_token_is_done() {
        let output = ListObjectsV2Output::builder().is_truncated(true).build();
        let state = State::Paginating { next_token: None }.next_state(&output);
        assert_eq!(State::Done, state);
    }

    #[test]
    fn test_page_preserves_server_order() {
        let output = list_resp(None, vec!["pdf/b.tar", "pdf/a.tar", "pdf/readme.txt"]);
        let page = page_from_output(&output).unwrap();
        let keys: Vec<&str> = page.objects().iter().map(|o| o.key()).collect();
        assert_eq!(vec!["pdf/b.tar", "pdf/a.tar", "pdf/readme.txt"], keys);
    }

    #[test]
    fn test_empty_page() {
        let output = ListObjectsV2Output::builder().build();
        let page = page_from_output(&output).unwrap();
        assert!(page.is_empty());
    }

    fn list_resp(next_token: Option<&'static str>, keys: Vec<&'static str>) -> ListObjectsV2Output {
        let contents = keys
            .iter()
            .map(|k| Object::builder().key(*k).size(1).build())
            .collect();
        ListObjectsV2Output::builder()
            .is_truncated(next_token.is_some())
            .set_next_continuation_token(next_token.map(str::to_owned))
            .prefix("pdf/")
            .set_contents(Some(contents))
            .build()
    }
}
