/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

/// Types for single object download operation
pub mod download;

/// Types for paginated object listing
pub mod list_objects;

/// Types for multiple object download operation
pub mod download_objects;

/// Types for fetching and summarizing the bucket manifest
pub mod fetch_manifest;

/// Destination used when none is given: the current working directory
pub(crate) const DEFAULT_DESTINATION: &str = ".";
