//! HTTP basic authentication.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderValue, AUTHORIZATION};

use crate::auth::AuthStrategy;
use crate::error::ConfigError;

/// HTTP basic authentication using a ServiceNow user's credentials.
///
/// The `Authorization` header value is computed once on construction and
/// flagged as sensitive. The `Debug` implementation never prints the password.
///
/// # Example
///
/// ```rust
/// use servicenow_api::BasicAuth;
///
/// let auth = BasicAuth::new("admin", "secret").unwrap();
/// assert_eq!(auth.username(), "admin");
/// assert!(!format!("{auth:?}").contains("secret"));
/// ```
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    header: HeaderValue,
}

impl BasicAuth {
    /// Creates basic credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCredentials`] if either the username or
    /// the password is empty, or if they cannot be sent as a header.
    pub fn new(username: impl Into<String>, password: impl AsRef<str>) -> Result<Self, ConfigError> {
        let username = username.into();
        let password = password.as_ref();
        if username.is_empty() || password.is_empty() {
            return Err(ConfigError::InvalidCredentials {
                reason: "basic auth requires non-empty username and password",
            });
        }

        let encoded = STANDARD.encode(format!("{username}:{password}"));
        let mut header = HeaderValue::from_str(&format!("Basic {encoded}")).map_err(|_| {
            ConfigError::InvalidCredentials {
                reason: "basic auth credentials are not valid header text",
            }
        })?;
        header.set_sensitive(true);

        Ok(Self { username, header })
    }

    /// Returns the username.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl AuthStrategy for BasicAuth {
    fn apply(&self, request: &mut reqwest::Request) {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.header.clone());
    }
}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("password", &"*****")
            .finish()
    }
}
