//! HTTP client types for ServiceNow API communication.
//!
//! This module provides the transport layer shared by every resource client.
//! It builds authenticated requests, executes them through an injectable
//! executor, and classifies responses.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`HttpClient`]: The async HTTP client for API communication
//! - [`HttpExecutor`]: The seam that performs the actual network I/O
//! - [`HttpRequest`]: A request to be sent to the API
//! - [`HttpResponse`]: A response with status, headers and raw body
//! - [`HttpMethod`]: Supported HTTP methods (GET, POST, PUT, PATCH, DELETE)
//! - [`ApiError`]: A classified non-2xx response
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use servicenow_api::clients::{HttpClient, HttpMethod, HttpRequest};
//!
//! let client = Arc::new(HttpClient::new(&config)?);
//!
//! let request = HttpRequest::builder(HttpMethod::Get, "/api/now/table/sys_user")
//!     .query_param("sysparm_limit", "1")
//!     .build()?;
//!
//! let response = client.request(request).await?;
//! ```
//!
//! # Retry Behavior
//!
//! The client performs no retries. A network failure or a non-2xx response
//! surfaces immediately. Inject an [`HttpExecutor`] to add retry policy.

mod errors;
mod executor;
mod http_client;
mod http_request;
mod http_response;

pub use errors::{ApiError, HttpError, InvalidHttpRequestError};
pub use executor::HttpExecutor;
pub use http_client::HttpClient;
pub use http_request::{HttpMethod, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
