//! HTTP client for ServiceNow API communication.
//!
//! This module provides the [`HttpClient`] type, the transport shared by
//! every resource client. It builds authenticated requests, hands them to an
//! [`HttpExecutor`], reads the response once and classifies it.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::Url;

use crate::auth::AuthStrategy;
use crate::clients::errors::{ApiError, HttpError};
use crate::clients::executor::HttpExecutor;
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::config::ServiceNowConfig;

/// HTTP client for making requests to a ServiceNow instance.
///
/// The client handles:
/// - URL construction from the instance URL, request path and query
/// - Default headers, `User-Agent`, and `Content-Type` for JSON bodies
/// - Authentication through the configured [`AuthStrategy`]
/// - Reading the response body once and classifying non-2xx statuses
///
/// There is no retry logic; a failure surfaces immediately.
///
/// # Thread Safety
///
/// `HttpClient` is `Send + Sync`, and all of its state is fixed at
/// construction. Share it across tasks behind an [`Arc`].
///
/// # Example
///
/// ```rust,ignore
/// use servicenow_api::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/api/now/table/incident")
///     .query_param("sysparm_limit", "1")
///     .build()?;
///
/// let response = client.request(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    /// The executor that performs network I/O.
    executor: Arc<dyn HttpExecutor>,
    /// Instance base URL (e.g., `https://dev12345.service-now.com`).
    base_url: Url,
    /// User agent sent with every request.
    user_agent: HeaderValue,
    /// Default headers to include in all requests.
    default_headers: HeaderMap,
    /// Authentication applied to every request.
    auth: Arc<dyn AuthStrategy>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a client backed by a `reqwest::Client` using the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the underlying reqwest client cannot
    /// be created (e.g., TLS initialization failure).
    pub fn new(config: &ServiceNowConfig) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout())
            .build()?;

        Ok(Self::with_executor(config, Arc::new(client)))
    }

    /// Creates a client that sends requests through the given executor.
    #[must_use]
    pub fn with_executor(config: &ServiceNowConfig, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            executor,
            base_url: config.instance_url().url().clone(),
            user_agent: config.user_agent_header().clone(),
            default_headers: config.default_headers().clone(),
            auth: config.auth(),
        }
    }

    /// Returns the instance base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Builds the outgoing request without sending it.
    ///
    /// The path is appended to the instance URL's path, query parameters are
    /// attached, a present body is serialized as JSON with
    /// `Content-Type: application/json`, and the auth strategy runs last.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::InvalidRequest`] if the request fails validation
    /// and [`HttpError::Encode`] if the body cannot be serialized.
    pub fn new_request(&self, request: &HttpRequest) -> Result<reqwest::Request, HttpError> {
        request.verify()?;

        let url = self.join_url(&request.path, &request.query);
        let mut req = reqwest::Request::new(request.http_method.into(), url);

        let headers = req.headers_mut();
        for (name, value) in &self.default_headers {
            headers.append(name.clone(), value.clone());
        }
        headers.insert(USER_AGENT, self.user_agent.clone());

        if let Some(body) = &request.body {
            let bytes = serde_json::to_vec(body).map_err(HttpError::Encode)?;
            req.headers_mut()
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
            *req.body_mut() = Some(bytes.into());
        }

        self.auth.apply(&mut req);

        Ok(req)
    }

    /// Executes a prepared request and classifies the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Network`] if the executor fails or the body
    /// cannot be read, and [`HttpError::Response`] for any status outside
    /// `[200, 300)`.
    pub async fn execute(&self, request: reqwest::Request) -> Result<HttpResponse, HttpError> {
        let method = request.method().clone();
        let path = request.url().path().to_string();

        tracing::debug!(%method, %path, "Sending ServiceNow request");

        let res = self.executor.execute(request).await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res.bytes().await?.to_vec();

        if !(200..300).contains(&code) {
            let error = ApiError::from_response(code, body);
            tracing::warn!(
                %method,
                %path,
                status = code,
                message = %error.message,
                "ServiceNow request failed"
            );
            return Err(HttpError::Response(error));
        }

        tracing::debug!(%method, %path, status = code, "Received ServiceNow response");

        Ok(HttpResponse::new(code, headers, body))
    }

    /// Builds, sends and classifies a request.
    ///
    /// # Errors
    ///
    /// See [`new_request`](Self::new_request) and [`execute`](Self::execute).
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        let req = self.new_request(&request)?;
        self.execute(req).await
    }

    fn join_url(&self, path: &str, query: &BTreeMap<String, String>) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}
