//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use reqwest::Url;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// A validated ServiceNow instance URL.
///
/// The URL must carry a scheme and a host. It is normalized on construction:
/// trailing slashes are removed from the path, and any query string or
/// fragment is dropped, so that API paths can be appended safely.
///
/// # Example
///
/// ```rust
/// use servicenow_api::InstanceUrl;
///
/// let url = InstanceUrl::new("https://dev12345.service-now.com/").unwrap();
/// assert_eq!(url.as_ref(), "https://dev12345.service-now.com");
/// assert_eq!(url.host_name(), Some("dev12345.service-now.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InstanceUrl {
    url: Url,
    normalized: String,
}

impl InstanceUrl {
    /// Creates a new validated instance URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInstanceUrl`] if the URL cannot be parsed
    /// or lacks a scheme or host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let raw = raw.trim();
        let invalid = || ConfigError::InvalidInstanceUrl {
            url: raw.to_string(),
        };

        let mut url = Url::parse(raw).map_err(|_| invalid())?;
        if url.cannot_be_a_base() || url.host_str().map_or(true, str::is_empty) {
            return Err(invalid());
        }

        let path = url.path().trim_end_matches('/').to_string();
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);

        let normalized = url.as_str().trim_end_matches('/').to_string();

        Ok(Self { url, normalized })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.url.host_str()
    }

    /// Returns the parsed URL.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl AsRef<str> for InstanceUrl {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}

impl Serialize for InstanceUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.normalized)
    }
}

impl<'de> Deserialize<'de> for InstanceUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}
