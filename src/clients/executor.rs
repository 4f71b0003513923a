//! The HTTP executor seam.
//!
//! [`HttpClient`](crate::clients::HttpClient) never talks to the network
//! itself; it hands a fully built [`reqwest::Request`] to an
//! [`HttpExecutor`]. Retry, timeout, proxy and TLS policy all belong to the
//! executor.

use std::fmt;

use async_trait::async_trait;

/// Executes a prepared HTTP request.
///
/// Implemented for [`reqwest::Client`]. Inject a custom implementation to
/// add retries, record traffic, or route requests through middleware.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use servicenow_api::clients::HttpExecutor;
///
/// #[derive(Debug)]
/// struct Logged(reqwest::Client);
///
/// #[async_trait]
/// impl HttpExecutor for Logged {
///     async fn execute(
///         &self,
///         request: reqwest::Request,
///     ) -> Result<reqwest::Response, reqwest::Error> {
///         println!("{} {}", request.method(), request.url());
///         self.0.execute(request).await
///     }
/// }
/// ```
#[async_trait]
pub trait HttpExecutor: fmt::Debug + Send + Sync {
    /// Sends the request and returns the raw response.
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error>;
}

#[async_trait]
impl HttpExecutor for reqwest::Client {
    async fn execute(&self, request: reqwest::Request) -> Result<reqwest::Response, reqwest::Error> {
        Self::execute(self, request).await
    }
}
