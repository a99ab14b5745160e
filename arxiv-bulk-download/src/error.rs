/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_smithy_runtime_api::http::Response;

/// A boxed error that is `Send` and `Sync`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by this library
///
/// NOTE: Use [`aws_sdk_s3::error::DisplayErrorContext`] or similar to display
/// the entire error cause/source chain.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: BoxError,
}

/// General categories of errors.
///
/// Only [`ErrorKind::NotFound`] is ever recovered from, and only while downloading many objects.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Configuration file missing, unreadable, or lacking required entries
    Config,

    /// The storage service rejected the credentials
    Auth,

    /// Listing the bucket failed
    ListingFailed,

    /// Object (or bucket) not found
    NotFound,

    /// Downloading a single object failed for a reason other than the object not existing
    DownloadFailed,

    /// The manifest was malformed or missing required fields
    ManifestParse,

    /// Operation input validation issues
    InputInvalid,

    /// Local I/O errors
    IOError,
}

impl Error {
    /// Creates a new [`Error`] from a known kind of error as well as an arbitrary error
    /// source.
    pub fn new<E>(kind: ErrorKind, err: E) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            kind,
            source: err.into(),
        }
    }

    /// Returns the corresponding [`ErrorKind`] for this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true if this error means the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::Config => write!(f, "configuration error"),
            ErrorKind::Auth => write!(f, "authentication failed"),
            ErrorKind::ListingFailed => write!(f, "failed to list objects"),
            ErrorKind::NotFound => write!(f, "resource not found"),
            ErrorKind::DownloadFailed => write!(f, "download failed"),
            ErrorKind::ManifestParse => write!(f, "failed to parse manifest"),
            ErrorKind::InputInvalid => write!(f, "invalid input"),
            ErrorKind::IOError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::new(ErrorKind::IOError, value)
    }
}

impl From<ini::Error> for Error {
    fn from(value: ini::Error) -> Self {
        Self::new(ErrorKind::Config, value)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(value: roxmltree::Error) -> Self {
        Self::new(ErrorKind::ManifestParse, value)
    }
}

impl From<aws_smithy_types::error::operation::BuildError> for Error {
    fn from(value: aws_smithy_types::error::operation::BuildError) -> Self {
        Self::new(ErrorKind::InputInvalid, value)
    }
}

impl From<aws_sdk_s3::primitives::ByteStreamError> for Error {
    fn from(value: aws_sdk_s3::primitives::ByteStreamError) -> Self {
        Self::new(ErrorKind::DownloadFailed, value)
    }
}

pub(crate) fn invalid_input<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::InputInvalid, err)
}

pub(crate) fn config_error<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::Config, err)
}

pub(crate) fn manifest_parse<E>(err: E) -> Error
where
    E: Into<BoxError>,
{
    Error::new(ErrorKind::ManifestParse, err)
}

/// Error codes S3 uses when the request signature or credentials are rejected
const AUTH_ERROR_CODES: &[&str] = &[
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "InvalidToken",
    "ExpiredToken",
];

/// Error codes S3 uses for missing keys. `HeadObject` style responses carry no body and
/// surface as the bare `NotFound` code.
const NOT_FOUND_ERROR_CODES: &[&str] = &["NoSuchKey", "NotFound"];

fn is_auth_failure<E, R>(err: &SdkError<E, R>) -> bool
where
    E: ProvideErrorMetadata,
{
    err.code()
        .map(|code| AUTH_ERROR_CODES.contains(&code))
        .unwrap_or(false)
}

/// Classify a failed `ListObjectsV2` request. Every listing failure is fatal.
pub(crate) fn listing_failed<E>(err: SdkError<E, Response>) -> Error
where
    E: std::error::Error + ProvideErrorMetadata + Send + Sync + 'static,
{
    let kind = if is_auth_failure(&err) {
        ErrorKind::Auth
    } else {
        ErrorKind::ListingFailed
    };
    Error::new(kind, err)
}

/// Classify a failed `GetObject` request.
///
/// Only a missing key maps to [`ErrorKind::NotFound`], matched on the modeled error, the error
/// code, or a 404 status without any error code. Anything else is an auth or download failure.
pub(crate) fn download_failed(err: SdkError<GetObjectError, Response>) -> Error {
    let modeled_not_found = err
        .as_service_error()
        .map(GetObjectError::is_no_such_key)
        .unwrap_or(false);
    let code_not_found = err
        .code()
        .map(|code| NOT_FOUND_ERROR_CODES.contains(&code))
        .unwrap_or(false);
    // a bare 404 only counts when the response carried no error code to go by
    let status_not_found = err.code().is_none()
        && err
            .raw_response()
            .map(|resp| resp.status().as_u16() == 404)
            .unwrap_or(false);

    let kind = if modeled_not_found || code_not_found || status_not_found {
        ErrorKind::NotFound
    } else if is_auth_failure(&err) {
        ErrorKind::Auth
    } else {
        ErrorKind::DownloadFailed
    };

    Error::new(kind, err)
}

#[cfg(test)]
mod tests {
    use super::*;

    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;
    use aws_smithy_types::error::ErrorMetadata;

    fn http_response(status: u16) -> Response {
        Response::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    fn service_error(code: &str, status: u16) -> SdkError<GetObjectError, Response> {
        let meta = ErrorMetadata::builder().code(code).build();
        SdkError::service_error(GetObjectError::generic(meta), http_response(status))
    }

    #[test]
    fn test_no_such_key_is_not_found() {
        let err = SdkError::service_error(
            GetObjectError::NoSuchKey(NoSuchKey::builder().build()),
            http_response(404),
        );
        assert_eq!(&ErrorKind::NotFound, download_failed(err).kind());
    }

    #[test]
    fn test_codeless_404_is_not_found() {
        let meta = ErrorMetadata::builder().build();
        let err = SdkError::service_error(GetObjectError::generic(meta), http_response(404));
        assert!(download_failed(err).is_not_found());
    }

    #[test]
    fn test_404_with_other_code_is_not_recoverable() {
        let err = download_failed(service_error("NoSuchBucket", 404));
        assert_eq!(&ErrorKind::DownloadFailed, err.kind());

        let err = download_failed(service_error("AccessDenied", 404));
        assert_eq!(&ErrorKind::DownloadFailed, err.kind());
    }

    #[test]
    fn test_not_found_code() {
        let err = service_error("NotFound", 404);
        assert!(download_failed(err).is_not_found());
    }

    #[test]
    fn test_access_denied_is_not_recoverable() {
        let err = service_error("AccessDenied", 403);
        let err = download_failed(err);
        assert_eq!(&ErrorKind::DownloadFailed, err.kind());
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_server_error_is_not_recoverable() {
        let err = service_error("InternalError", 500);
        assert_eq!(&ErrorKind::DownloadFailed, download_failed(err).kind());
    }

    #[test]
    fn test_invalid_credentials_are_auth_errors() {
        let err = service_error("InvalidAccessKeyId", 403);
        assert_eq!(&ErrorKind::Auth, download_failed(err).kind());
    }

    #[test]
    fn test_listing_never_reports_not_found() {
        let meta = ErrorMetadata::builder().code("NoSuchBucket").build();
        let err: SdkError<aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error, Response> =
            SdkError::service_error(
                aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error::generic(meta),
                http_response(404),
            );
        assert_eq!(&ErrorKind::ListingFailed, listing_failed(err).kind());
    }
}
