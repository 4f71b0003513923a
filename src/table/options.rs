//! Per-call options for Table API operations.
//!
//! Each operation takes an optional options struct whose fields map onto
//! `sysparm_*` query parameters. Unset fields (`None`, empty vectors) are
//! never sent.
//!
//! | Field                        | Parameter                            |
//! |------------------------------|--------------------------------------|
//! | `query`                      | `sysparm_query`                      |
//! | `fields`                     | `sysparm_fields`                     |
//! | `limit`                      | `sysparm_limit`                      |
//! | `offset`                     | `sysparm_offset`                     |
//! | `display_value`              | `sysparm_display_value`              |
//! | `exclude_reference_link`     | `sysparm_exclude_reference_link`     |
//! | `input_display_value`        | `sysparm_input_display_value`        |
//! | `query_no_domain`            | `sysparm_query_no_domain`            |
//! | `suppress_pagination_header` | `sysparm_suppress_pagination_header` |
//!
//! Name/value `filters` on [`ListOptions`] are sent under their own names.
//!
//! # Example
//!
//! ```rust
//! use servicenow_api::table::{DisplayValue, ListOptions, QueryBuilder};
//!
//! let query = QueryBuilder::new().equals("active", true);
//! let options = ListOptions {
//!     fields: vec!["number".to_string(), "short_description".to_string()],
//!     limit: Some(10),
//!     display_value: Some(DisplayValue::All),
//!     ..ListOptions::from_query(&query).unwrap()
//! };
//!
//! let params = options.to_query().unwrap();
//! assert_eq!(params["sysparm_query"], "active=true");
//! assert_eq!(params["sysparm_fields"], "number,short_description");
//! assert_eq!(params["sysparm_display_value"], "all");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::clients::HttpError;
use crate::table::errors::TableError;
use crate::table::query_builder::{QueryBuilder, QueryError};

/// Errors raised when parsing option values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The display value is not one of `true`, `false` or `all`.
    #[error("display value must be 'true', 'false', or 'all', got '{value}'")]
    InvalidDisplayValue {
        /// The rejected literal.
        value: String,
    },
}

/// How reference and choice fields are rendered in responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayValue {
    /// Return display values.
    True,
    /// Return raw database values.
    False,
    /// Return both, as `{"display_value": ..., "value": ...}` objects.
    All,
}

impl DisplayValue {
    /// Returns the wire literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::All => "all",
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayValue {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            "all" => Ok(Self::All),
            other => Err(OptionsError::InvalidDisplayValue {
                value: other.to_string(),
            }),
        }
    }
}

/// Options for [`TableClient::list`](crate::table::TableClient::list).
///
/// `query` and `filters` are mutually exclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Encoded query, usually produced by a [`QueryBuilder`].
    pub query: Option<String>,
    /// Name/value equality filters, e.g. `active=true`.
    pub filters: BTreeMap<String, String>,
    /// Fields to return. Blank entries are dropped.
    pub fields: Vec<String>,
    /// Maximum number of records to return.
    pub limit: Option<u32>,
    /// Number of records to skip.
    pub offset: Option<u32>,
    /// How reference and choice fields are rendered.
    pub display_value: Option<DisplayValue>,
    /// Omit the `link` member of reference fields.
    pub exclude_reference_link: Option<bool>,
    /// Include records outside the caller's domain. Requires elevated rights.
    pub query_no_domain: Option<bool>,
    /// Ask the server not to send `Link` and `X-Total-Count` headers.
    pub suppress_pagination_header: Option<bool>,
}

impl ListOptions {
    /// Creates options filtered by the query in `builder`.
    ///
    /// # Errors
    ///
    /// Returns the builder's latched [`QueryError`].
    pub fn from_query(builder: &QueryBuilder) -> Result<Self, QueryError> {
        let query = builder.build()?;
        Ok(Self {
            query: Some(query).filter(|q| !q.is_empty()),
            ..Self::default()
        })
    }

    /// Checks the options for conflicting settings.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::MutuallyExclusiveFilters`] when both a
    /// non-blank `query` and non-empty `filters` are set.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.trimmed_query().is_some() && !self.filters.is_empty() {
            return Err(TableError::MutuallyExclusiveFilters);
        }
        Ok(())
    }

    /// Translates the options into query parameters.
    ///
    /// Filters are emitted first, so a filter named like a `sysparm_*`
    /// parameter is overridden by the typed option.
    ///
    /// # Errors
    ///
    /// Returns the error from [`validate`](Self::validate).
    pub fn to_query(&self) -> Result<BTreeMap<String, String>, TableError> {
        self.validate()?;

        let mut query: BTreeMap<String, String> = self
            .filters
            .iter()
            .filter(|(name, _)| !name.trim().is_empty())
            .map(|(name, value)| (name.trim().to_string(), value.clone()))
            .collect();

        let params = QueryParams {
            query: self.trimmed_query(),
            fields: join_fields(&self.fields),
            limit: self.limit,
            offset: self.offset,
            display_value: self.display_value,
            exclude_reference_link: self.exclude_reference_link,
            query_no_domain: self.query_no_domain,
            suppress_pagination_header: self.suppress_pagination_header,
            ..QueryParams::default()
        };
        query.extend(serialize_to_query(&params)?);

        Ok(query)
    }

    /// Returns `true` if pagination headers should be parsed.
    pub(crate) fn wants_pagination(&self) -> bool {
        self.suppress_pagination_header != Some(true)
    }

    fn trimmed_query(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

/// Options for [`TableClient::get`](crate::table::TableClient::get).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GetOptions {
    /// Fields to return. Blank entries are dropped.
    pub fields: Vec<String>,
    /// How reference and choice fields are rendered.
    pub display_value: Option<DisplayValue>,
    /// Omit the `link` member of reference fields.
    pub exclude_reference_link: Option<bool>,
}

impl GetOptions {
    /// Translates the options into query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Http`] if the parameters cannot be serialized.
    pub fn to_query(&self) -> Result<BTreeMap<String, String>, TableError> {
        let params = QueryParams {
            fields: join_fields(&self.fields),
            display_value: self.display_value,
            exclude_reference_link: self.exclude_reference_link,
            ..QueryParams::default()
        };
        serialize_to_query(&params)
    }
}

/// Options for create, update and replace.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Fields to return. Blank entries are dropped.
    pub fields: Vec<String>,
    /// How reference and choice fields are rendered.
    pub display_value: Option<DisplayValue>,
    /// Omit the `link` member of reference fields.
    pub exclude_reference_link: Option<bool>,
    /// Interpret input values as display values.
    pub input_display_value: Option<bool>,
}

impl WriteOptions {
    /// Translates the options into query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Http`] if the parameters cannot be serialized.
    pub fn to_query(&self) -> Result<BTreeMap<String, String>, TableError> {
        let params = QueryParams {
            fields: join_fields(&self.fields),
            display_value: self.display_value,
            exclude_reference_link: self.exclude_reference_link,
            input_display_value: self.input_display_value,
            ..QueryParams::default()
        };
        serialize_to_query(&params)
    }
}

/// Options for [`TableClient::delete`](crate::table::TableClient::delete).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteOptions {
    /// Allow deleting records outside the caller's domain.
    pub query_no_domain: Option<bool>,
}

impl DeleteOptions {
    /// Translates the options into query parameters.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::Http`] if the parameters cannot be serialized.
    pub fn to_query(&self) -> Result<BTreeMap<String, String>, TableError> {
        let params = QueryParams {
            query_no_domain: self.query_no_domain,
            ..QueryParams::default()
        };
        serialize_to_query(&params)
    }
}

/// Every Table API query parameter, named as on the wire.
#[derive(Debug, Default, Serialize)]
struct QueryParams<'a> {
    #[serde(rename = "sysparm_query", skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    #[serde(rename = "sysparm_fields", skip_serializing_if = "Option::is_none")]
    fields: Option<String>,
    #[serde(rename = "sysparm_limit", skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(rename = "sysparm_offset", skip_serializing_if = "Option::is_none")]
    offset: Option<u32>,
    #[serde(
        rename = "sysparm_display_value",
        skip_serializing_if = "Option::is_none"
    )]
    display_value: Option<DisplayValue>,
    #[serde(
        rename = "sysparm_exclude_reference_link",
        skip_serializing_if = "Option::is_none"
    )]
    exclude_reference_link: Option<bool>,
    #[serde(
        rename = "sysparm_input_display_value",
        skip_serializing_if = "Option::is_none"
    )]
    input_display_value: Option<bool>,
    #[serde(
        rename = "sysparm_query_no_domain",
        skip_serializing_if = "Option::is_none"
    )]
    query_no_domain: Option<bool>,
    #[serde(
        rename = "sysparm_suppress_pagination_header",
        skip_serializing_if = "Option::is_none"
    )]
    suppress_pagination_header: Option<bool>,
}

/// Flattens a serializable parameter struct into query pairs.
fn serialize_to_query<P: Serialize>(params: &P) -> Result<BTreeMap<String, String>, TableError> {
    let value = serde_json::to_value(params).map_err(HttpError::Encode)?;

    let mut query = BTreeMap::new();
    if let Value::Object(map) = value {
        for (key, val) in map {
            match val {
                Value::String(s) => {
                    query.insert(key, s);
                }
                Value::Number(n) => {
                    query.insert(key, n.to_string());
                }
                Value::Bool(b) => {
                    query.insert(key, b.to_string());
                }
                Value::Null | Value::Array(_) | Value::Object(_) => {}
            }
        }
    }

    Ok(query)
}

/// Trims field names, drops blanks and comma-joins the rest.
fn join_fields(fields: &[String]) -> Option<String> {
    let joined = fields
        .iter()
        .map(|f| f.trim())
        .filter(|f| !f.is_empty())
        .collect::<Vec<_>>()
        .join(",");
    Some(joined).filter(|j| !j.is_empty())
}
