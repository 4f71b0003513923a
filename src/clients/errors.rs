//! HTTP-specific error types for the ServiceNow API SDK.
//!
//! This module contains error types for HTTP operations, including response
//! errors, request validation failures and response decoding failures.
//!
//! # Error Handling
//!
//! The SDK uses specific error types for different failure scenarios:
//!
//! - [`ApiError`]: Non-2xx HTTP responses from the API
//! - [`InvalidHttpRequestError`]: When a request fails validation before sending
//! - [`HttpError`]: Unified error type encompassing all HTTP-related errors
//!
//! # Example
//!
//! ```rust,ignore
//! use servicenow_api::clients::{HttpClient, HttpRequest, HttpMethod, HttpError};
//!
//! match client.request(request).await {
//!     Ok(response) => println!("Status: {}", response.code),
//!     Err(HttpError::Response(e)) => {
//!         println!("API error {}: {}", e.status, e.message);
//!     }
//!     Err(HttpError::Network(e)) => println!("Network error: {e}"),
//!     Err(e) => println!("Other error: {e}"),
//! }
//! ```

use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Error returned when the API answers with a status outside `[200, 300)`.
///
/// ServiceNow usually reports failures as
/// `{"error": {"message": "...", "detail": "..."}, "status": "failure"}`.
/// When the body has that shape, `message` and `detail` are filled in.
/// Otherwise both are empty and only the status and raw body are kept.
///
/// # Example
///
/// ```rust
/// use servicenow_api::clients::ApiError;
///
/// let body = br#"{"error":{"message":"Not found","detail":"no such record"}}"#;
/// let error = ApiError::from_response(404, body.to_vec());
///
/// assert_eq!(error.status, 404);
/// assert_eq!(error.message, "Not found");
/// assert_eq!(error.detail, "no such record");
/// ```
#[derive(Clone, PartialEq, Eq, Error)]
pub struct ApiError {
    /// The HTTP status code of the response.
    pub status: u16,
    /// The top-level error message, empty when the body was not structured.
    pub message: String,
    /// The error detail, empty when absent.
    pub detail: String,
    /// The raw response body.
    pub raw: Vec<u8>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ApiError {
    /// Classifies a failed response.
    ///
    /// Parses the structured error envelope when present; falls back to an
    /// error carrying only the status and raw bytes.
    #[must_use]
    pub fn from_response(status: u16, raw: Vec<u8>) -> Self {
        let (message, detail) = serde_json::from_slice::<ErrorEnvelope>(&raw)
            .map(|envelope| {
                (
                    envelope.error.message.unwrap_or_default(),
                    envelope.error.detail.unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        Self {
            status,
            message,
            detail,
            raw,
        }
    }

    /// Returns the raw body as text, replacing invalid UTF-8.
    #[must_use]
    pub fn raw_text(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }

    /// Returns `true` for a 404 response.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.message.is_empty(), self.detail.is_empty()) {
            (_, false) => write!(
                f,
                "servicenow API error ({}): {} ({})",
                self.status, self.message, self.detail
            ),
            (false, true) => write!(f, "servicenow API error ({}): {}", self.status, self.message),
            (true, true) => write!(f, "servicenow API error ({})", self.status),
        }
    }
}

impl fmt::Debug for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiError")
            .field("status", &self.status)
            .field("message", &self.message)
            .field("detail", &self.detail)
            .field("raw", &String::from_utf8_lossy(&self.raw))
            .finish()
    }
}

/// Error returned when an HTTP request fails validation.
///
/// This error is raised before a request is sent.
///
/// # Example
///
/// ```rust
/// use servicenow_api::clients::InvalidHttpRequestError;
///
/// let error = InvalidHttpRequestError::MissingBody {
///     method: "post".to_string(),
/// };
///
/// assert_eq!(error.to_string(), "Cannot use post without specifying data.");
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// A POST, PUT or PATCH request was made without a body.
    #[error("Cannot use {method} without specifying data.")]
    MissingBody {
        /// The HTTP method that requires a body.
        method: String,
    },
}

/// Unified error type for all HTTP-related errors.
///
/// # Example
///
/// ```rust,ignore
/// use servicenow_api::HttpError;
///
/// match client.request(request).await {
///     Ok(response) => { /* handle success */ }
///     Err(HttpError::Response(e)) => { /* handle API error */ }
///     Err(HttpError::InvalidRequest(e)) => { /* handle validation error */ }
///     Err(HttpError::Network(e)) => { /* handle network error */ }
///     Err(HttpError::Encode(e) | HttpError::Decode(e)) => { /* handle JSON error */ }
/// }
/// ```
#[derive(Debug, Error)]
pub enum HttpError {
    /// A non-2xx response from the API.
    #[error(transparent)]
    Response(#[from] ApiError),

    /// Request validation failed.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),

    /// Network or connection error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body is not valid JSON for the expected shape.
    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl HttpError {
    /// Returns the API error when this is a non-2xx response.
    #[must_use]
    pub const fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Response(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_parses_structured_envelope() {
        let raw = br#"{"error":{"message":"Not found","detail":"no such record"},"status":"failure"}"#;
        let error = ApiError::from_response(404, raw.to_vec());

        assert_eq!(error.status, 404);
        assert_eq!(error.message, "Not found");
        assert_eq!(error.detail, "no such record");
        assert_eq!(error.raw, raw.to_vec());
        assert!(error.is_not_found());
    }

    #[test]
    fn test_api_error_message_without_detail() {
        let raw = br#"{"error":{"message":"User Not Authenticated"}}"#;
        let error = ApiError::from_response(401, raw.to_vec());

        assert_eq!(error.message, "User Not Authenticated");
        assert!(error.detail.is_empty());
        assert_eq!(
            error.to_string(),
            "servicenow API error (401): User Not Authenticated"
        );
    }

    #[test]
    fn test_api_error_falls_back_to_raw_on_non_json() {
        let raw = b"<html>Bad Gateway</html>";
        let error = ApiError::from_response(502, raw.to_vec());

        assert_eq!(error.status, 502);
        assert!(error.message.is_empty());
        assert!(error.detail.is_empty());
        assert_eq!(error.raw_text(), "<html>Bad Gateway</html>");
        assert_eq!(error.to_string(), "servicenow API error (502)");
    }

    #[test]
    fn test_api_error_falls_back_when_envelope_fields_empty() {
        let raw = br#"{"error":{"message":"","detail":""}}"#;
        let error = ApiError::from_response(500, raw.to_vec());

        assert!(error.message.is_empty());
        assert_eq!(error.raw, raw.to_vec());
    }

    #[test]
    fn test_api_error_falls_back_on_other_json_shapes() {
        let raw = br#"{"errors":["nope"]}"#;
        let error = ApiError::from_response(400, raw.to_vec());

        assert!(error.message.is_empty());
        assert_eq!(error.status, 400);
    }

    #[test]
    fn test_api_error_display_with_detail() {
        let error = ApiError {
            status: 403,
            message: "Forbidden".to_string(),
            detail: "ACL denied".to_string(),
            raw: Vec::new(),
        };
        assert_eq!(
            error.to_string(),
            "servicenow API error (403): Forbidden (ACL denied)"
        );
    }

    #[test]
    fn test_http_error_exposes_api_error() {
        let error = HttpError::from(ApiError::from_response(404, Vec::new()));
        assert_eq!(error.api_error().map(|e| e.status), Some(404));

        let error = HttpError::from(InvalidHttpRequestError::MissingBody {
            method: "put".to_string(),
        });
        assert!(error.api_error().is_none());
    }

    #[test]
    fn test_invalid_request_error_message() {
        let error = InvalidHttpRequestError::MissingBody {
            method: "patch".to_string(),
        };
        assert_eq!(error.to_string(), "Cannot use patch without specifying data.");
    }

    #[test]
    fn test_all_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &ApiError::from_response(500, Vec::new());
        let _: &dyn std::error::Error = &InvalidHttpRequestError::MissingBody {
            method: String::new(),
        };
        let _: &dyn std::error::Error =
            &HttpError::Response(ApiError::from_response(500, Vec::new()));
    }
}
