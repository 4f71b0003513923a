//! ServiceNow Table API.
//!
//! This module provides typed CRUD access to ServiceNow tables:
//!
//! - [`TableClient`]: A client bound to one table, generic over the record type
//! - [`QueryBuilder`]: A fluent builder for encoded queries (`sysparm_query`)
//! - [`ListOptions`], [`GetOptions`], [`WriteOptions`], [`DeleteOptions`]:
//!   Per-call options translated into `sysparm_*` query parameters
//! - [`ListResponse`] and [`PaginationMeta`]: List results with paging links
//! - [`TableError`]: The error type for every table operation
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use servicenow_api::table::{ListOptions, QueryBuilder, TableClient, WriteOptions};
//! use serde_json::json;
//!
//! let http = Arc::new(HttpClient::new(&config)?);
//! let incidents = TableClient::dynamic(http, "incident");
//!
//! let query = QueryBuilder::new()
//!     .equals("active", true)
//!     .or()
//!     .in_list("priority", [1, 2]);
//! let page = incidents.list(Some(&ListOptions::from_query(&query)?)).await?;
//!
//! let created = incidents
//!     .create(&json!({"short_description": "Printer on fire"}), None)
//!     .await?;
//! ```

mod client;
mod errors;
mod options;
mod pagination;
mod query_builder;
mod response;

pub use client::{TableClient, TABLE_API_PATH};
pub use errors::TableError;
pub use options::{
    DeleteOptions, DisplayValue, GetOptions, ListOptions, OptionsError, WriteOptions,
};
pub use pagination::PaginationMeta;
pub use query_builder::{QueryBuilder, QueryError};
pub use response::ListResponse;

/// A record without a typed shape: a JSON object keyed by field name.
pub type Record = serde_json::Map<String, serde_json::Value>;
