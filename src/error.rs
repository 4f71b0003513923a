//! Error types for the ServiceNow API SDK.
//!
//! This module contains error types used throughout the SDK for configuration
//! and validation errors.
//!
//! # Error Handling
//!
//! All configuration constructors return `Result<T, ConfigError>` to enable
//! fail-fast validation. Error messages are designed to be clear and actionable.
//!
//! # Example
//!
//! ```rust
//! use servicenow_api::{ConfigError, InstanceUrl};
//!
//! let result = InstanceUrl::new("dev12345.service-now.com");
//! assert!(matches!(result, Err(ConfigError::InvalidInstanceUrl { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// This enum represents all possible errors that can occur when creating
/// or validating configuration types. Each variant provides a clear,
/// actionable error message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Instance URL is invalid.
    #[error("Invalid instance URL '{url}'. The URL must include scheme and host, e.g. 'https://dev12345.service-now.com'.")]
    InvalidInstanceUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// User agent cannot be empty.
    #[error("User agent cannot be empty.")]
    EmptyUserAgent,

    /// A default header was given an empty name.
    #[error("Header name cannot be empty.")]
    EmptyHeaderName,

    /// A default header name or value contains characters HTTP does not allow.
    #[error("Invalid header '{name}'. Header names and values must be valid HTTP header text.")]
    InvalidHeader {
        /// The name of the rejected header.
        name: String,
    },

    /// Authentication credentials are incomplete.
    #[error("Invalid credentials: {reason}")]
    InvalidCredentials {
        /// The reason the credentials were rejected.
        reason: &'static str,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_instance_url_error_message() {
        let error = ConfigError::InvalidInstanceUrl {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("scheme and host"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "auth" };
        let message = error.to_string();
        assert!(message.contains("auth"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_invalid_header_names_the_header() {
        let error = ConfigError::InvalidHeader {
            name: "X-Bad\n".to_string(),
        };
        assert!(error.to_string().contains("X-Bad"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::EmptyUserAgent;
        let _: &dyn std::error::Error = &error;
    }
}
