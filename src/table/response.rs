//! Response wrapper for list operations.
//!
//! [`ListResponse<T>`] pairs the records of one page with the pagination
//! metadata parsed from the response headers. It implements
//! `Deref<Target = Vec<T>>`, so the records can be used directly:
//!
//! ```rust,ignore
//! let page = incidents.list(None).await?;
//!
//! for incident in page.iter() {
//!     println!("{}", incident.number);
//! }
//!
//! if let Some(next) = page.next_page_url() {
//!     println!("more at {next}");
//! }
//!
//! let records: Vec<Incident> = page.into_inner();
//! ```

use std::ops::{Deref, DerefMut};

use crate::table::pagination::PaginationMeta;

/// One page of records from a list operation.
///
/// # Example
///
/// ```rust
/// use servicenow_api::table::{ListResponse, PaginationMeta};
///
/// let response = ListResponse::new(
///     vec!["INC001", "INC002"],
///     Some(PaginationMeta {
///         next: Some("https://dev.service-now.com/api/now/table/incident?sysparm_offset=2".to_string()),
///         total_count: Some(3),
///         ..PaginationMeta::default()
///     }),
/// );
///
/// assert_eq!(response.len(), 2);
/// assert_eq!(response[0], "INC001");
/// assert!(response.has_next_page());
/// assert_eq!(response.total_count(), Some(3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListResponse<T> {
    /// The records of this page.
    records: Vec<T>,
    /// Pagination metadata, absent when the server sent none or it was suppressed.
    pagination: Option<PaginationMeta>,
}

impl<T> ListResponse<T> {
    /// Creates a new `ListResponse`.
    #[must_use]
    pub const fn new(records: Vec<T>, pagination: Option<PaginationMeta>) -> Self {
        Self {
            records,
            pagination,
        }
    }

    /// Consumes the response and returns the records.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.records
    }

    /// Consumes the response and returns the records with their metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Option<PaginationMeta>) {
        (self.records, self.pagination)
    }

    /// Returns the pagination metadata, if any.
    #[must_use]
    pub const fn pagination(&self) -> Option<&PaginationMeta> {
        self.pagination.as_ref()
    }

    /// Returns `true` if the server advertised a next page.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.pagination.as_ref().is_some_and(PaginationMeta::has_next)
    }

    /// Returns the URL of the next page, if any.
    #[must_use]
    pub fn next_page_url(&self) -> Option<&str> {
        self.pagination.as_ref()?.next.as_deref()
    }

    /// Returns the total number of matching records, if reported.
    #[must_use]
    pub fn total_count(&self) -> Option<u64> {
        self.pagination.as_ref()?.total_count
    }
}

impl<T> Deref for ListResponse<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl<T> DerefMut for ListResponse<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.records
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
