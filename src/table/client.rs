//! Typed client for a single ServiceNow table.
//!
//! This module provides [`TableClient<T>`], which maps CRUD operations onto
//! the Table API:
//!
//! | Operation | Method | Path                          |
//! |-----------|--------|-------------------------------|
//! | `list`    | GET    | `/api/now/table/{table}`      |
//! | `get`     | GET    | `/api/now/table/{table}/{id}` |
//! | `create`  | POST   | `/api/now/table/{table}`      |
//! | `update`  | PATCH  | `/api/now/table/{table}/{id}` |
//! | `replace` | PUT    | `/api/now/table/{table}/{id}` |
//! | `delete`  | DELETE | `/api/now/table/{table}/{id}` |
//!
//! Successful responses wrap records in a `{"result": ...}` envelope, which
//! the client removes.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::clients::{HttpClient, HttpError, HttpMethod, HttpRequest, HttpResponse};
use crate::table::errors::TableError;
use crate::table::options::{DeleteOptions, GetOptions, ListOptions, WriteOptions};
use crate::table::pagination::PaginationMeta;
use crate::table::response::ListResponse;
use crate::table::Record;

/// Path prefix of the Table API.
pub const TABLE_API_PATH: &str = "/api/now/table";

/// The `{"result": ...}` envelope around every successful response.
#[derive(Deserialize)]
struct ResultEnvelope<R> {
    result: R,
}

/// A client bound to one table, returning records of type `T`.
///
/// `T` is any deserializable record shape. Use [`Record`] (a JSON object)
/// when no typed struct exists, or see [`TableClient::dynamic`].
///
/// The table name is trimmed on construction. It is validated on every call,
/// so constructing a client never fails.
///
/// # Thread Safety
///
/// `TableClient` is `Send + Sync` and cheap to clone; clones share the
/// underlying [`HttpClient`].
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use serde::Deserialize;
/// use servicenow_api::table::{ListOptions, QueryBuilder, TableClient};
///
/// #[derive(Debug, Deserialize)]
/// struct Incident {
///     sys_id: String,
///     number: String,
///     short_description: String,
/// }
///
/// let http = Arc::new(HttpClient::new(&config)?);
/// let incidents: TableClient<Incident> = TableClient::new(http, "incident");
///
/// let query = QueryBuilder::new().equals("active", true).greater_than("priority", 2);
/// let options = ListOptions { limit: Some(10), ..ListOptions::from_query(&query)? };
///
/// let page = incidents.list(Some(&options)).await?;
/// for incident in page.iter() {
///     println!("{}: {}", incident.number, incident.short_description);
/// }
/// ```
pub struct TableClient<T> {
    http: Arc<HttpClient>,
    table: String,
    _record: PhantomData<fn() -> T>,
}

// Verify TableClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TableClient<Record>>();
};

impl TableClient<Record> {
    /// Creates a client returning records as JSON objects.
    #[must_use]
    pub fn dynamic(http: Arc<HttpClient>, table: impl Into<String>) -> Self {
        Self::new(http, table)
    }
}

impl<T> TableClient<T> {
    /// Creates a client for `table`.
    #[must_use]
    pub fn new(http: Arc<HttpClient>, table: impl Into<String>) -> Self {
        let table: String = table.into();
        Self {
            http,
            table: table.trim().to_string(),
            _record: PhantomData,
        }
    }

    /// Returns the (trimmed) table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table
    }

    /// Returns the shared HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &Arc<HttpClient> {
        &self.http
    }

    fn base_path(&self) -> Result<String, TableError> {
        if !is_path_segment(&self.table) {
            return Err(TableError::InvalidTableName {
                name: self.table.clone(),
            });
        }
        Ok(format!("{TABLE_API_PATH}/{}", self.table))
    }

    fn record_path(&self, sys_id: &str) -> Result<String, TableError> {
        let base = self.base_path()?;
        let sys_id = sys_id.trim();
        if !is_path_segment(sys_id) {
            return Err(TableError::InvalidSysId {
                sys_id: sys_id.to_string(),
            });
        }
        Ok(format!("{base}/{sys_id}"))
    }
}

impl<T: DeserializeOwned> TableClient<T> {
    /// Lists records.
    ///
    /// Unless `suppress_pagination_header` is `Some(true)`, the `Link` and
    /// `X-Total-Count` headers are parsed into the response's
    /// [`PaginationMeta`].
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidTableName`] for a bad table name
    /// - [`TableError::MutuallyExclusiveFilters`] if both `query` and
    ///   `filters` are set
    /// - [`TableError::Http`] for transport, status and decode failures
    pub async fn list(
        &self,
        options: Option<&ListOptions>,
    ) -> Result<ListResponse<T>, TableError> {
        let path = self.base_path()?;
        let query = options
            .map(ListOptions::to_query)
            .transpose()?
            .unwrap_or_default();

        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query(query)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http.request(request).await?;

        let records = response
            .decode::<ResultEnvelope<Option<Vec<T>>>>()?
            .and_then(|envelope| envelope.result)
            .unwrap_or_default();

        let pagination = if options.map_or(true, ListOptions::wants_pagination) {
            PaginationMeta::from_response(&response)
        } else {
            None
        };

        tracing::debug!(
            table = %self.table,
            count = records.len(),
            has_next = pagination.as_ref().is_some_and(PaginationMeta::has_next),
            "Listed ServiceNow records"
        );

        Ok(ListResponse::new(records, pagination))
    }

    /// Retrieves one record by `sys_id`.
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidTableName`] or [`TableError::InvalidSysId`]
    /// - [`TableError::EmptyResponse`] if the server sent no body
    /// - [`TableError::Http`] for transport, status and decode failures
    pub async fn get(&self, sys_id: &str, options: Option<&GetOptions>) -> Result<T, TableError> {
        let path = self.record_path(sys_id)?;
        let query = options
            .map(GetOptions::to_query)
            .transpose()?
            .unwrap_or_default();

        let request = HttpRequest::builder(HttpMethod::Get, path)
            .query(query)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http.request(request).await?;

        unwrap_record(&response)
    }

    /// Creates a record.
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidTableName`] for a bad table name
    /// - [`TableError::MissingBody`] if `body` serializes to `null`
    /// - [`TableError::EmptyResponse`] if the server sent no body
    /// - [`TableError::Http`] for encode, transport, status and decode failures
    pub async fn create<B>(
        &self,
        body: &B,
        options: Option<&WriteOptions>,
    ) -> Result<T, TableError>
    where
        B: Serialize + ?Sized,
    {
        let path = self.base_path()?;
        self.write(HttpMethod::Post, path, body, options).await
    }

    /// Partially updates a record; only the fields in `body` change.
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidTableName`] or [`TableError::InvalidSysId`]
    /// - [`TableError::MissingBody`] if `body` serializes to `null`
    /// - [`TableError::EmptyResponse`] if the server sent no body
    /// - [`TableError::Http`] for encode, transport, status and decode failures
    pub async fn update<B>(
        &self,
        sys_id: &str,
        body: &B,
        options: Option<&WriteOptions>,
    ) -> Result<T, TableError>
    where
        B: Serialize + ?Sized,
    {
        let path = self.record_path(sys_id)?;
        self.write(HttpMethod::Patch, path, body, options).await
    }

    /// Replaces a record.
    ///
    /// # Errors
    ///
    /// Same as [`update`](Self::update).
    pub async fn replace<B>(
        &self,
        sys_id: &str,
        body: &B,
        options: Option<&WriteOptions>,
    ) -> Result<T, TableError>
    where
        B: Serialize + ?Sized,
    {
        let path = self.record_path(sys_id)?;
        self.write(HttpMethod::Put, path, body, options).await
    }

    /// Deletes a record. Any response body is ignored.
    ///
    /// # Errors
    ///
    /// - [`TableError::InvalidTableName`] or [`TableError::InvalidSysId`]
    /// - [`TableError::Http`] for transport and status failures
    pub async fn delete(
        &self,
        sys_id: &str,
        options: Option<&DeleteOptions>,
    ) -> Result<(), TableError> {
        let path = self.record_path(sys_id)?;
        let query = options
            .map(DeleteOptions::to_query)
            .transpose()?
            .unwrap_or_default();

        let request = HttpRequest::builder(HttpMethod::Delete, path)
            .query(query)
            .build()
            .map_err(HttpError::from)?;
        self.http.request(request).await?;

        tracing::debug!(
            table = %self.table,
            sys_id = sys_id.trim(),
            "Deleted ServiceNow record"
        );

        Ok(())
    }

    async fn write<B>(
        &self,
        method: HttpMethod,
        path: String,
        body: &B,
        options: Option<&WriteOptions>,
    ) -> Result<T, TableError>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body).map_err(HttpError::Encode)?;
        if body.is_null() {
            return Err(TableError::MissingBody);
        }
        let query = options
            .map(WriteOptions::to_query)
            .transpose()?
            .unwrap_or_default();

        let request = HttpRequest::builder(method, path)
            .body(body)
            .query(query)
            .build()
            .map_err(HttpError::from)?;
        let response = self.http.request(request).await?;

        unwrap_record(&response)
    }
}

impl<T> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            table: self.table.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> fmt::Debug for TableClient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableClient")
            .field("table", &self.table)
            .field("record", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

/// A user-supplied path segment must be non-empty, free of separators, and
/// not a dot segment (`.`, `..` or their `%2e` spellings) that URL path
/// normalization would resolve away.
fn is_path_segment(segment: &str) -> bool {
    !segment.is_empty() && !segment.contains(['/', '\\']) && !is_dot_segment(segment)
}

fn is_dot_segment(segment: &str) -> bool {
    let unescaped = segment.to_ascii_lowercase().replace("%2e", ".");
    unescaped == "." || unescaped == ".."
}

fn unwrap_record<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, TableError> {
    response
        .decode::<ResultEnvelope<T>>()?
        .map(|envelope| envelope.result)
        .ok_or(TableError::EmptyResponse)
}
