//! OAuth bearer token authentication.

use std::fmt;

use reqwest::header::{HeaderValue, AUTHORIZATION};

use crate::auth::AuthStrategy;
use crate::error::ConfigError;

/// Bearer token authentication for instances configured with OAuth.
///
/// Obtaining and refreshing the token is left to the caller.
#[derive(Clone)]
pub struct BearerToken {
    header: HeaderValue,
}

impl BearerToken {
    /// Creates a bearer token strategy.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidCredentials`] if the token is blank or
    /// cannot be sent as a header.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ConfigError> {
        let token = token.as_ref().trim();
        if token.is_empty() {
            return Err(ConfigError::InvalidCredentials {
                reason: "bearer token cannot be empty",
            });
        }

        let mut header = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            ConfigError::InvalidCredentials {
                reason: "bearer token is not valid header text",
            }
        })?;
        header.set_sensitive(true);

        Ok(Self { header })
    }
}

impl AuthStrategy for BearerToken {
    fn apply(&self, request: &mut reqwest::Request) {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.header.clone());
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(*****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_token_sets_authorization_header() {
        let auth = BearerToken::new("abc123").unwrap();
        let mut req = reqwest::Request::new(
            reqwest::Method::GET,
            "https://dev.example.com/".parse().unwrap(),
        );

        auth.apply(&mut req);

        assert_eq!(req.headers().get(AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[test]
    fn test_bearer_token_rejects_blank() {
        assert!(matches!(
            BearerToken::new("  "),
            Err(ConfigError::InvalidCredentials { .. })
        ));
    }

    #[test]
    fn test_bearer_token_debug_masks_value() {
        let auth = BearerToken::new("abc123").unwrap();
        assert_eq!(format!("{auth:?}"), "BearerToken(*****)");
    }
}
