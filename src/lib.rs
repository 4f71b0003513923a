//! # ServiceNow API Rust SDK
//!
//! A Rust SDK for the ServiceNow Table API, providing type-safe configuration,
//! pluggable authentication, an async HTTP transport and typed CRUD clients.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`ServiceNowConfig`] and [`ServiceNowConfigBuilder`]
//! - Pluggable authentication via [`AuthStrategy`], with [`BasicAuth`] and [`BearerToken`]
//! - An async HTTP client with an injectable executor and structured API errors
//! - A typed Table API client, [`TableClient`], generic over the record shape
//! - A fluent builder for encoded queries, [`QueryBuilder`]
//! - Pagination metadata parsed from `Link` and `X-Total-Count` headers
//!
//! ## Quick Start
//!
//! ```rust
//! use servicenow_api::{BasicAuth, InstanceUrl, ServiceNowConfig};
//!
//! let config = ServiceNowConfig::builder()
//!     .instance_url(InstanceUrl::new("https://dev12345.service-now.com").unwrap())
//!     .auth(BasicAuth::new("admin", "secret").unwrap())
//!     .user_agent("my-integration/1.0")
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Working With Tables
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use serde::Deserialize;
//! use servicenow_api::{HttpClient, ListOptions, QueryBuilder, TableClient};
//!
//! #[derive(Debug, Deserialize)]
//! struct Incident {
//!     sys_id: String,
//!     number: String,
//! }
//!
//! let http = Arc::new(HttpClient::new(&config)?);
//! let incidents: TableClient<Incident> = TableClient::new(http, "incident");
//!
//! let query = QueryBuilder::new()
//!     .equals("active", true)
//!     .new_query()
//!     .starts_with("short_description", "Printer");
//! let options = ListOptions {
//!     limit: Some(25),
//!     ..ListOptions::from_query(&query)?
//! };
//!
//! let page = incidents.list(Some(&options)).await?;
//! println!("{} of {:?}", page.len(), page.total_count());
//!
//! let incident = incidents.get(&page[0].sys_id, None).await?;
//! ```
//!
//! ## Encoded Queries
//!
//! ```rust
//! use servicenow_api::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .equals("a", 1)
//!     .or()
//!     .equals("b", 2)
//!     .new_query()
//!     .not_empty("c")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(query, "a=1^ORb=2^NQcISNOTEMPTY");
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: Invalid input is rejected before any request is sent
//! - **Thread-safe**: Clients are `Send + Sync` and shared behind `Arc`
//! - **Async-first**: Designed for use with the Tokio async runtime
//! - **No hidden retries**: Retry policy belongs to the injected executor

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod table;

// Re-export public types at crate root for convenience
pub use auth::{AuthStrategy, BasicAuth, BearerToken};
pub use config::{InstanceUrl, ServiceNowConfig, ServiceNowConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    ApiError, HttpClient, HttpError, HttpExecutor, HttpMethod, HttpRequest, HttpRequestBuilder,
    HttpResponse, InvalidHttpRequestError,
};

// Re-export Table API types
pub use table::{
    DeleteOptions, DisplayValue, GetOptions, ListOptions, ListResponse, OptionsError,
    PaginationMeta, QueryBuilder, QueryError, Record, TableClient, TableError, WriteOptions,
};
