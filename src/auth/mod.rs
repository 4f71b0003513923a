//! Authentication strategies for the ServiceNow API SDK.
//!
//! Every outgoing request passes through an [`AuthStrategy`] right before it
//! is handed to the HTTP executor. The strategy mutates the request, typically
//! by inserting an `Authorization` header.
//!
//! # Overview
//!
//! - [`AuthStrategy`]: The pluggable trait applied to outgoing requests
//! - [`BasicAuth`]: HTTP basic authentication with a username and password
//! - [`BearerToken`]: OAuth bearer token authentication
//!
//! # Custom Strategies
//!
//! ```rust
//! use servicenow_api::AuthStrategy;
//! use reqwest::header::HeaderValue;
//!
//! #[derive(Debug)]
//! struct ApiKeyAuth;
//!
//! impl AuthStrategy for ApiKeyAuth {
//!     fn apply(&self, request: &mut reqwest::Request) {
//!         request
//!             .headers_mut()
//!             .insert("x-sn-apikey", HeaderValue::from_static("key"));
//!     }
//! }
//! ```

mod basic;
mod bearer;

pub use basic::BasicAuth;
pub use bearer::BearerToken;

use std::fmt;

/// A strategy that authenticates outgoing requests.
///
/// Implementations must be cheap to apply; they run once per request and
/// never perform I/O.
pub trait AuthStrategy: fmt::Debug + Send + Sync {
    /// Mutates the outgoing request before it is sent.
    fn apply(&self, request: &mut reqwest::Request);
}
