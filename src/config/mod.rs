//! Configuration types for the ServiceNow API SDK.
//!
//! This module provides the core configuration types used to initialize
//! and configure the SDK for API communication with a ServiceNow instance.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ServiceNowConfig`]: The main configuration struct holding all SDK settings
//! - [`ServiceNowConfigBuilder`]: A builder for constructing [`ServiceNowConfig`] instances
//! - [`InstanceUrl`]: A validated instance base URL
//!
//! # Example
//!
//! ```rust
//! use servicenow_api::{BasicAuth, InstanceUrl, ServiceNowConfig};
//!
//! let config = ServiceNowConfig::builder()
//!     .instance_url(InstanceUrl::new("https://dev12345.service-now.com").unwrap())
//!     .auth(BasicAuth::new("admin", "secret").unwrap())
//!     .build()
//!     .unwrap();
//! ```

mod newtypes;

pub use newtypes::InstanceUrl;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};

use crate::auth::AuthStrategy;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default timeout applied to the built-in HTTP executor.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the ServiceNow API SDK.
///
/// This struct holds everything fixed at construction time: the instance
/// URL, the authentication strategy, the user agent, default headers and
/// the timeout used by the built-in executor.
///
/// # Thread Safety
///
/// `ServiceNowConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
///
/// # Example
///
/// ```rust
/// use servicenow_api::{BearerToken, InstanceUrl, ServiceNowConfig};
///
/// let config = ServiceNowConfig::builder()
///     .instance_url(InstanceUrl::new("https://dev12345.service-now.com").unwrap())
///     .auth(BearerToken::new("token").unwrap())
///     .user_agent("my-integration/2.0")
///     .build()
///     .unwrap();
///
/// assert_eq!(config.user_agent(), "my-integration/2.0");
/// ```
#[derive(Clone, Debug)]
pub struct ServiceNowConfig {
    instance_url: InstanceUrl,
    auth: Arc<dyn AuthStrategy>,
    user_agent: HeaderValue,
    default_headers: HeaderMap,
    timeout: Duration,
}

impl ServiceNowConfig {
    /// Creates a new builder for constructing a `ServiceNowConfig`.
    #[must_use]
    pub fn builder() -> ServiceNowConfigBuilder {
        ServiceNowConfigBuilder::new()
    }

    /// Returns the instance URL.
    #[must_use]
    pub const fn instance_url(&self) -> &InstanceUrl {
        &self.instance_url
    }

    /// Returns the authentication strategy.
    #[must_use]
    pub fn auth(&self) -> Arc<dyn AuthStrategy> {
        Arc::clone(&self.auth)
    }

    /// Returns the user agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        self.user_agent.to_str().unwrap_or_default()
    }

    /// Returns the user agent as a header value.
    #[must_use]
    pub const fn user_agent_header(&self) -> &HeaderValue {
        &self.user_agent
    }

    /// Returns the default headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Returns the timeout for the built-in HTTP executor.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

// Verify ServiceNowConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ServiceNowConfig>();
};

/// Builder for constructing [`ServiceNowConfig`] instances.
///
/// Required fields are `instance_url` and `auth`.
///
/// # Defaults
///
/// - `user_agent`: `servicenow-api-rust/<version>`
/// - `default_headers`: `Accept: application/json`
/// - `timeout`: 30 seconds
#[derive(Debug, Default)]
pub struct ServiceNowConfigBuilder {
    instance_url: Option<InstanceUrl>,
    auth: Option<Arc<dyn AuthStrategy>>,
    user_agent: Option<String>,
    default_headers: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl ServiceNowConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the instance URL (required).
    #[must_use]
    pub fn instance_url(mut self, url: InstanceUrl) -> Self {
        self.instance_url = Some(url);
        self
    }

    /// Sets the authentication strategy (required).
    #[must_use]
    pub fn auth(mut self, auth: impl AuthStrategy + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    /// Sets an already shared authentication strategy.
    #[must_use]
    pub fn shared_auth(mut self, auth: Arc<dyn AuthStrategy>) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Overrides the user agent.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Adds a default header. Repeated names are sent as repeated headers.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Sets the timeout for the built-in HTTP executor.
    ///
    /// Has no effect when a custom executor is injected.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the [`ServiceNowConfig`], validating all fields.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `instance_url` or
    /// `auth` are not set, [`ConfigError::EmptyUserAgent`] for a blank user
    /// agent, and [`ConfigError::EmptyHeaderName`] or
    /// [`ConfigError::InvalidHeader`] for a bad default header or user agent.
    pub fn build(self) -> Result<ServiceNowConfig, ConfigError> {
        let instance_url = self
            .instance_url
            .ok_or(ConfigError::MissingRequiredField {
                field: "instance_url",
            })?;
        let auth = self
            .auth
            .ok_or(ConfigError::MissingRequiredField { field: "auth" })?;

        let user_agent = match self.user_agent {
            Some(ua) if ua.trim().is_empty() => return Err(ConfigError::EmptyUserAgent),
            Some(ua) => ua,
            None => format!("servicenow-api-rust/{SDK_VERSION}"),
        };
        let user_agent =
            HeaderValue::from_str(&user_agent).map_err(|_| ConfigError::InvalidHeader {
                name: USER_AGENT.to_string(),
            })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in self.default_headers {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyHeaderName);
            }
            let header_name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|_| ConfigError::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::from_str(&value)
                .map_err(|_| ConfigError::InvalidHeader { name: name.clone() })?;
            default_headers.append(header_name, header_value);
        }

        Ok(ServiceNowConfig {
            instance_url,
            auth,
            user_agent,
            default_headers,
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}
