//
//  samplify
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Samplify Client
//!
//! This module provides the error taxonomy and the response envelope shared by
//! every endpoint method.
//!
//! # Overview
//!
//! - [`SamplifyError`] - The single error type returned by every client method
//! - [`ErrorKind`] - Coarse classification callers branch on (auth, API, transport)
//! - [`ApiError`] - A decoded error body from a resource endpoint
//! - [`ApiResponse`] - The `{ "data": ..., "meta": ..., "status": ... }` envelope
//! - Pagination metadata (re-exported from [`pagination`] submodule)
//!
//! # Example
//!
//! ```rust
//! use samplify::api::common::{ErrorKind, SamplifyError};
//!
//! fn should_retry(err: &SamplifyError) -> bool {
//!     match err.kind() {
//!         ErrorKind::Transport => true,
//!         ErrorKind::Authentication | ErrorKind::Api => false,
//!     }
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod pagination;

pub use pagination::*;

/// Coarse error classification.
///
/// | Kind | Raised when |
/// |------|-------------|
/// | `Authentication` | The auth endpoint rejected the credentials or could not be used |
/// | `Api` | A resource endpoint answered with a well-formed error body |
/// | `Transport` | The network failed, timed out, or a body could not be understood |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Api,
    Transport,
}

/// Unified error type for all Samplify client operations.
///
/// Every public client method returns either its decoded value or exactly one
/// of these variants. Use [`SamplifyError::kind`] to branch without matching
/// on individual variants.
///
/// # Example
///
/// ```rust
/// use samplify::api::common::{ErrorKind, SamplifyError};
///
/// let err = SamplifyError::UnexpectedResponse {
///     status: 502,
///     body: "<html>Bad Gateway</html>".to_string(),
/// };
///
/// assert_eq!(err.kind(), ErrorKind::Transport);
/// assert_eq!(err.status(), Some(502));
/// ```
#[derive(Error, Debug)]
pub enum SamplifyError {
    /// The auth endpoint answered with a non-success status.
    #[error("Authentication failed ({status}): {message}")]
    AuthRejected {
        /// HTTP status returned by the auth endpoint
        status: u16,
        /// Raw response body, or the status phrase when empty
        message: String,
    },

    /// The auth request never produced a response (connection failure, timeout).
    #[error("Authentication request failed: {0}")]
    AuthTransport(#[source] reqwest::Error),

    /// The auth endpoint returned 2xx but the token payload was not understood.
    #[error("Could not decode authentication response: {0}")]
    AuthDecode(#[source] serde_json::Error),

    /// The issued or seeded token cannot be used: it does not fit in an
    /// `Authorization` header, or its lifetime is out of range.
    #[error("Unusable access token: {reason}")]
    InvalidToken {
        /// What is wrong with the token
        reason: String,
    },

    /// A resource endpoint returned a decodable error body.
    #[error("{0}")]
    Api(ApiError),

    /// A resource endpoint returned a non-success status with a body that is
    /// not a recognizable error document.
    #[error("Unexpected response ({status}): {body}")]
    UnexpectedResponse {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// A success response body could not be decoded into the expected type.
    #[error("Could not decode response body (status {status}): {source}")]
    Decode {
        /// HTTP status code of the response
        status: u16,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// The request payload could not be encoded as JSON.
    #[error("Could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A network-level error occurred during a resource request.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl SamplifyError {
    /// Returns the coarse classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::AuthRejected { .. }
            | Self::AuthTransport(_)
            | Self::AuthDecode(_)
            | Self::InvalidToken { .. } => ErrorKind::Authentication,
            Self::Api(_) => ErrorKind::Api,
            Self::UnexpectedResponse { .. }
            | Self::Decode { .. }
            | Self::Encode(_)
            | Self::Network(_) => ErrorKind::Transport,
        }
    }

    /// Returns the HTTP status associated with the error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthRejected { status, .. }
            | Self::UnexpectedResponse { status, .. }
            | Self::Decode { status, .. } => Some(*status),
            Self::Api(err) => Some(err.status),
            Self::AuthTransport(e) | Self::Network(e) => e.status().map(|s| s.as_u16()),
            Self::AuthDecode(_) | Self::InvalidToken { .. } | Self::Encode(_) => None,
        }
    }

    /// Returns `true` when the error came from a timed-out request.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::AuthTransport(e) | Self::Network(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/// A well-formed error response from a resource endpoint.
///
/// Built from the wire document
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Request validation failed",
///   "requestId": "f3c1...",
///   "errors": [{ "field": "title", "code": "REQUIRED", "message": "must not be empty" }]
/// }
/// ```
///
/// plus the HTTP status of the response. A body missing `code` or `message`
/// is not considered an API error document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiError {
    /// HTTP status code of the response.
    pub status: u16,

    /// Machine-readable error code.
    pub code: String,

    /// Human-readable message.
    pub message: String,

    /// Upstream request identifier, when supplied.
    pub request_id: Option<String>,

    /// Field-level validation failures, possibly empty.
    pub field_errors: Vec<FieldError>,
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path of the offending field, when the server reports one.
    #[serde(default, alias = "path")]
    pub field: Option<String>,

    /// Machine-readable code for this failure.
    #[serde(default)]
    pub code: Option<String>,

    /// Human-readable explanation.
    pub message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(default)]
    request_id: Option<String>,
    #[serde(default)]
    errors: Vec<FieldError>,
}

impl ApiError {
    /// Decodes an error document, returning `None` when the body does not
    /// have the expected shape.
    pub fn from_body(status: u16, body: &str) -> Option<Self> {
        let parsed: ErrorBody = serde_json::from_str(body).ok()?;
        Some(Self {
            status,
            code: parsed.code,
            message: parsed.message,
            request_id: parsed.request_id,
            field_errors: parsed.errors,
        })
    }

    /// Returns `true` for a 404 response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "API error {} [{}]: {}", self.status, self.code, self.message)?;
        for err in &self.field_errors {
            match &err.field {
                Some(field) => write!(f, "; {}: {}", field, err.message)?,
                None => write!(f, "; {}", err.message)?,
            }
        }
        Ok(())
    }
}

/// Maps a non-success response to the matching [`SamplifyError`].
///
/// A decodable error document becomes [`SamplifyError::Api`]; anything else
/// becomes [`SamplifyError::UnexpectedResponse`] with the raw body.
pub fn error_from_response(status: u16, body: String) -> SamplifyError {
    match ApiError::from_body(status, &body) {
        Some(err) => SamplifyError::Api(err),
        None => SamplifyError::UnexpectedResponse { status, body },
    }
}

/// Response envelope used by every Samplify endpoint.
///
/// # Example
///
/// ```rust
/// use samplify::api::common::ApiResponse;
///
/// let json = r#"{"data": ["AUTOMOTIVE"], "status": {"message": "success", "errors": []}}"#;
/// let response: ApiResponse<Vec<String>> = serde_json::from_str(json).unwrap();
/// assert_eq!(response.data, vec!["AUTOMOTIVE".to_string()]);
/// assert!(response.meta.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// The response payload.
    pub data: T,

    /// Paging metadata, present on list endpoints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    /// Processing status reported by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
}

/// Processing status block of a response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseStatus {
    /// Status message, typically `"success"`.
    #[serde(default)]
    pub message: String,

    /// Non-fatal errors reported alongside the payload.
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_error_document() {
        let body = r#"{
            "code": "VALIDATION_ERROR",
            "message": "Request validation failed",
            "requestId": "req-1",
            "errors": [{"path": "title", "message": "must not be empty"}]
        }"#;
        let err = error_from_response(400, body.to_string());
        match err {
            SamplifyError::Api(api) => {
                assert_eq!(api.status, 400);
                assert_eq!(api.code, "VALIDATION_ERROR");
                assert_eq!(api.message, "Request validation failed");
                assert_eq!(api.request_id.as_deref(), Some("req-1"));
                assert_eq!(api.field_errors.len(), 1);
                assert_eq!(api.field_errors[0].field.as_deref(), Some("title"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[test]
    fn test_undecodable_error_body_keeps_status_and_body() {
        let err = error_from_response(502, "<html>Bad Gateway</html>".to_string());
        assert_eq!(err.kind(), ErrorKind::Transport);
        match err {
            SamplifyError::UnexpectedResponse { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body, "<html>Bad Gateway</html>");
            }
            other => panic!("expected unexpected response, got {other:?}"),
        }
    }

    #[test]
    fn test_json_without_code_is_not_an_api_error() {
        let err = error_from_response(500, r#"{"message": "boom"}"#.to_string());
        assert!(matches!(err, SamplifyError::UnexpectedResponse { status: 500, .. }));
    }

    #[test]
    fn test_error_kinds() {
        let auth = SamplifyError::AuthRejected {
            status: 401,
            message: "bad credentials".to_string(),
        };
        assert_eq!(auth.kind(), ErrorKind::Authentication);
        assert_eq!(auth.status(), Some(401));

        let api = SamplifyError::Api(ApiError {
            status: 404,
            code: "NOT_FOUND".to_string(),
            message: "project not found".to_string(),
            request_id: None,
            field_errors: Vec::new(),
        });
        assert_eq!(api.kind(), ErrorKind::Api);
        assert_eq!(
            api.to_string(),
            "API error 404 [NOT_FOUND]: project not found"
        );
    }
}
