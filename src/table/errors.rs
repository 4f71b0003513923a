//! Error types for Table API operations.
//!
//! [`TableError`] covers everything a [`TableClient`](crate::table::TableClient)
//! call can fail with. Validation variants are returned before any request is
//! built; transport and decode failures are wrapped from [`HttpError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use servicenow_api::table::TableError;
//! use servicenow_api::HttpError;
//!
//! match incidents.get("  ", None).await {
//!     Err(TableError::InvalidSysId { .. }) => println!("bad id"),
//!     Err(TableError::Http(HttpError::Response(e))) if e.is_not_found() => {
//!         println!("gone: {}", e.detail);
//!     }
//!     Err(e) => println!("other error: {e}"),
//!     Ok(record) => println!("{record:?}"),
//! }
//! ```

use thiserror::Error;

use crate::clients::HttpError;
use crate::table::query_builder::QueryError;

/// Error type for Table API operations.
#[derive(Debug, Error)]
pub enum TableError {
    /// The table name is empty or contains a path separator.
    #[error("invalid table name '{name}'")]
    InvalidTableName {
        /// The rejected table name.
        name: String,
    },

    /// The record identifier is empty or contains a path separator.
    #[error("invalid sys_id '{sys_id}'")]
    InvalidSysId {
        /// The rejected identifier.
        sys_id: String,
    },

    /// A write operation was given a body that serializes to `null`.
    #[error("input body is missing")]
    MissingBody,

    /// Both an encoded query and name/value filters were supplied.
    #[error("query and filters are mutually exclusive")]
    MutuallyExclusiveFilters,

    /// The API answered with an empty body where a record was expected.
    #[error("response body is empty")]
    EmptyResponse,

    /// An encoded query could not be built.
    #[error(transparent)]
    Query(#[from] QueryError),

    /// An HTTP-level error occurred.
    #[error(transparent)]
    Http(#[from] HttpError),
}

impl TableError {
    /// Returns `true` if the error was raised before any request was sent.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        match self {
            Self::InvalidTableName { .. }
            | Self::InvalidSysId { .. }
            | Self::MissingBody
            | Self::MutuallyExclusiveFilters
            | Self::Query(_) => true,
            Self::Http(e) => matches!(e, HttpError::InvalidRequest(_) | HttpError::Encode(_)),
            Self::EmptyResponse => false,
        }
    }

    /// Returns the API error when the server answered with a non-2xx status.
    #[must_use]
    pub const fn api_error(&self) -> Option<&crate::clients::ApiError> {
        match self {
            Self::Http(e) => e.api_error(),
            _ => None,
        }
    }
}
