/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;
use std::sync::Arc;

use crate::DEFAULT_ARCHIVE_SUFFIX;

/// Metadata for a single listed object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDescriptor {
    pub(crate) key: String,
    pub(crate) size: Option<i64>,
}

impl ObjectDescriptor {
    /// Create a new descriptor for the given key
    pub fn new(key: impl Into<String>, size: Option<i64>) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }

    /// The object key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The object size in bytes, when reported by the listing
    pub fn size(&self) -> Option<i64> {
        self.size
    }
}

impl TryFrom<&aws_sdk_s3::types::Object> for ObjectDescriptor {
    type Error = crate::error::Error;

    fn try_from(value: &aws_sdk_s3::types::Object) -> Result<Self, Self::Error> {
        let key = value
            .key()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| crate::error::invalid_input("listed object has no key"))?;
        Ok(ObjectDescriptor::new(key, value.size()))
    }
}

/// One page of a bucket listing, in the order returned by the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub(crate) objects: Vec<ObjectDescriptor>,
}

impl Page {
    /// Create a page from descriptors
    pub fn new(objects: Vec<ObjectDescriptor>) -> Self {
        Self { objects }
    }

    /// The objects on this page
    pub fn objects(&self) -> &[ObjectDescriptor] {
        &self.objects
    }

    /// Number of objects on this page
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns true if the page holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl IntoIterator for Page {
    type Item = ObjectDescriptor;
    type IntoIter = std::vec::IntoIter<ObjectDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

/// A filter for choosing which listed objects to download.
#[derive(Clone)]
pub struct DownloadFilter {
    pub(crate) predicate: Arc<dyn Fn(&ObjectDescriptor) -> bool + Send + Sync + 'static>,
}

impl DownloadFilter {
    /// Select objects whose key ends with `suffix`
    pub fn key_suffix(suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        Self::from(move |obj: &ObjectDescriptor| obj.key().ends_with(suffix.as_str()))
    }

    /// Returns true if `obj` should be downloaded
    pub fn matches(&self, obj: &ObjectDescriptor) -> bool {
        (self.predicate)(obj)
    }
}

impl fmt::Debug for DownloadFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = f.debug_struct("DownloadFilter");
        formatter.field("predicate", &"<closure>");
        formatter.finish()
    }
}

impl<F> From<F> for DownloadFilter
where
    F: Fn(&ObjectDescriptor) -> bool + Send + Sync + 'static,
{
    fn from(value: F) -> Self {
        DownloadFilter {
            predicate: Arc::new(value),
        }
    }
}

/// Archives only: keys ending in `.tar`
impl Default for DownloadFilter {
    fn default() -> Self {
        Self::key_suffix(DEFAULT_ARCHIVE_SUFFIX)
    }
}
