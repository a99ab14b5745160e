/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::{io, iter, path::Path, sync::Arc};

use aws_sdk_s3::{
    operation::{
        get_object::{GetObjectError, GetObjectOutput},
        list_objects_v2::ListObjectsV2Output,
    },
    primitives::ByteStream,
    types::{error::NoSuchKey, RequestPayer},
};
use aws_smithy_mocks_experimental::{mock, Rule};
use aws_smithy_runtime_api::{client::orchestrator::HttpResponse, http::StatusCode};
use bytes::Bytes;
use walkdir::WalkDir;

/// What `GetObject` does for a mock object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GetBehavior {
    /// Return the object contents
    Found,
    /// Return `NoSuchKey`, as if the object was deleted after being listed
    Missing,
    /// Return a 500 response
    ServerError,
    /// Listed only; there is no `GetObject` rule at all
    ListOnly,
}

#[derive(Debug, Clone)]
struct MockObject {
    object: aws_sdk_s3::types::Object,
    contents: Bytes,
    behavior: GetBehavior,
}

impl MockObject {
    fn new(key: impl Into<String>, data: impl Into<Bytes>, behavior: GetBehavior) -> Self {
        let contents: Bytes = data.into();
        let object = aws_sdk_s3::types::Object::builder()
            .key(key.into())
            .size(contents.len() as i64)
            .build();
        Self {
            object,
            contents,
            behavior,
        }
    }

    fn new_random(key: impl Into<String>, size: usize, behavior: GetBehavior) -> Self {
        let data: String = iter::repeat_with(fastrand::alphanumeric)
            .take(size)
            .collect();
        Self::new(key, data, behavior)
    }

    fn key(&self) -> &str {
        self.object.key().unwrap_or_default()
    }

    fn get_object_output(&self) -> GetObjectOutput {
        GetObjectOutput::builder()
            .body(ByteStream::from(self.contents.clone()))
            .content_length(self.contents.len() as i64)
            .build()
    }
}

fn server_error_http_resp() -> HttpResponse {
    HttpResponse::new(StatusCode::try_from(500).unwrap(), Bytes::new().into())
}

/// `GetObject` rule for a single object. Requests must be requester-pays to match.
fn get_object_rule(mobj: &MockObject) -> Option<Rule> {
    let share1 = Arc::new(mobj.clone());
    let share2 = share1.clone();
    let rule = mock!(aws_sdk_s3::Client::get_object).match_requests(move |r| {
        r.key() == share1.object.key() && r.request_payer() == Some(&RequestPayer::Requester)
    });

    match mobj.behavior {
        GetBehavior::Found => Some(rule.then_output(move || share2.get_object_output())),
        GetBehavior::Missing => {
            Some(rule.then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build())))
        }
        GetBehavior::ServerError => Some(rule.then_http_response(server_error_http_resp)),
        GetBehavior::ListOnly => None,
    }
}

/// Mock bucket serving a paginated listing and the objects in it.
///
/// Every page is served by its own `ListObjectsV2` rule keyed on the continuation token of the
/// request. Page `n` is reached with token `token{n}`; the first page is requested without one.
#[derive(Debug)]
pub struct MockBucket {
    pages: Vec<Vec<MockObject>>,
    extra_objects: Vec<MockObject>,
}

impl MockBucket {
    /// Create a new builder
    pub fn builder() -> MockBucketBuilder {
        MockBucketBuilder::default()
    }

    /// Return the mock rules representing this bucket: one `ListObjectsV2` rule per page and one
    /// `GetObject` rule per object that can be fetched.
    pub fn rules(&self) -> Vec<Rule> {
        let page_count = self.pages.len();
        let mut rules: Vec<Rule> = Vec::new();

        for (idx, page) in self.pages.iter().enumerate() {
            let contents = page.iter().map(|m| m.object.clone()).collect();
            let is_last = idx + 1 == page_count;
            let list_output = ListObjectsV2Output::builder()
                .set_contents(Some(contents))
                .is_truncated(!is_last)
                .set_next_continuation_token((!is_last).then(|| page_token(idx + 1)))
                .build();

            let expected_token = (idx > 0).then(|| page_token(idx));
            let rule = mock!(aws_sdk_s3::Client::list_objects_v2)
                .match_requests(move |r| {
                    r.continuation_token() == expected_token.as_deref()
                        && r.request_payer() == Some(&RequestPayer::Requester)
                })
                .then_output(move || list_output.clone());
            rules.push(rule);
        }

        rules.extend(
            self.pages
                .iter()
                .flatten()
                .chain(self.extra_objects.iter())
                .filter_map(get_object_rule),
        );
        rules
    }

    /// Keys of every listed object, in listing order
    pub fn listed_keys(&self) -> Vec<String> {
        self.pages
            .iter()
            .flatten()
            .map(|m| m.key().to_owned())
            .collect()
    }
}

fn page_token(page_idx: usize) -> String {
    format!("token{page_idx}")
}

/// Builder for [`MockBucket`]
#[derive(Debug, Default)]
pub struct MockBucketBuilder {
    pages: Vec<Vec<MockObject>>,
    extra_objects: Vec<MockObject>,
}

impl MockBucketBuilder {
    fn current_page(&mut self) -> &mut Vec<MockObject> {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Start a new listing page. Keys added afterwards land on it.
    pub fn page(mut self) -> Self {
        if self.pages.last().map(|p| !p.is_empty()).unwrap_or(false) {
            self.pages.push(Vec::new());
        }
        self
    }

    /// Add a listed key with the given content size using random data
    pub fn key_with_size(mut self, key: impl Into<String>, size: usize) -> Self {
        self.current_page()
            .push(MockObject::new_random(key, size, GetBehavior::Found));
        self
    }

    /// Add a listed key with the given contents
    pub fn key_with_contents(mut self, key: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.current_page()
            .push(MockObject::new(key, data, GetBehavior::Found));
        self
    }

    /// Add a listed key that responds with `NoSuchKey` when fetched
    pub fn missing_key(mut self, key: impl Into<String>) -> Self {
        self.current_page()
            .push(MockObject::new_random(key, 10, GetBehavior::Missing));
        self
    }

    /// Add a listed key that responds with a server error when fetched
    pub fn key_with_error(mut self, key: impl Into<String>) -> Self {
        self.current_page()
            .push(MockObject::new_random(key, 10, GetBehavior::ServerError));
        self
    }

    /// Add a listed key that has no `GetObject` rule; fetching it fails the test
    pub fn list_only_key(mut self, key: impl Into<String>) -> Self {
        self.current_page()
            .push(MockObject::new_random(key, 10, GetBehavior::ListOnly));
        self
    }

    /// Add an object that can be fetched but is never listed
    pub fn unlisted_key_with_contents(
        mut self,
        key: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        self.extra_objects
            .push(MockObject::new(key, data, GetBehavior::Found));
        self
    }

    /// Add an object that is never listed and responds with `NoSuchKey` when fetched
    pub fn unlisted_missing_key(mut self, key: impl Into<String>) -> Self {
        self.extra_objects
            .push(MockObject::new_random(key, 10, GetBehavior::Missing));
        self
    }

    /// Consume the builder and build a `MockBucket`
    pub fn build(mut self) -> MockBucket {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        MockBucket {
            pages: self.pages,
            extra_objects: self.extra_objects,
        }
    }
}

/// Walk the directory rooted at `dir` and gather all of the relative path filenames (sans
/// directory names), using `/` as the separator
pub fn relative_path_names(dir: &Path) -> Result<Vec<String>, io::Error> {
    let mut paths: Vec<String> = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(dir)
            .expect("prefix present")
            .components()
            .map(|c| c.as_os_str().to_str().expect("valid utf8 path"))
            .collect::<Vec<_>>()
            .join("/");
        paths.push(relative);
    }

    paths.sort();
    Ok(paths)
}
