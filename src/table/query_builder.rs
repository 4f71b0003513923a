//! Encoded query builder.
//!
//! ServiceNow filters list requests with an encoded query string passed as
//! `sysparm_query`. Conditions are written as `<field><operator><value>` and
//! joined by logical connectives:
//!
//! | Connective | Token |
//! |------------|-------|
//! | AND        | `^`   |
//! | OR         | `^OR` |
//! | New query  | `^NQ` |
//!
//! A literal `^` inside a value is escaped as `^^`.
//!
//! # Error Latching
//!
//! [`QueryBuilder`] never fails mid-chain. The first invalid call latches an
//! error, every later call becomes a no-op, and the error is reported by
//! [`QueryBuilder::build`]. A latched error cannot be cleared; start a new
//! builder instead.
//!
//! # Example
//!
//! ```rust
//! use servicenow_api::table::QueryBuilder;
//!
//! let query = QueryBuilder::new()
//!     .equals("active", true)
//!     .or()
//!     .greater_than("priority", 2)
//!     .new_query()
//!     .not_empty("assigned_to")
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(query, "active=true^ORpriority>2^NQassigned_toISNOTEMPTY");
//! ```
//!
//! A builder also implements [`Display`], writing the encoded query or
//! nothing at all when [`QueryBuilder::build`] would fail.

use std::fmt::{self, Display};

use thiserror::Error;

/// The reserved condition separator of the encoded query grammar.
const SEPARATOR: char = '^';

/// Errors latched by a [`QueryBuilder`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// A condition was given a blank field name.
    #[error("query field cannot be empty")]
    EmptyField,

    /// A field name contains the reserved `^` separator.
    #[error("query field '{field}' contains the reserved '^' character")]
    InvalidField {
        /// The rejected field name.
        field: String,
    },

    /// A value formatted to an empty string.
    #[error("query value for field '{field}' cannot be empty")]
    EmptyValue {
        /// The field the value belongs to.
        field: String,
    },

    /// A set-membership condition was given no values.
    #[error("query condition on field '{field}' requires at least one value")]
    EmptyValues {
        /// The field the condition belongs to.
        field: String,
    },

    /// A custom operator was blank.
    #[error("query operator cannot be empty")]
    EmptyOperator,

    /// A logical connective was used before any condition.
    #[error("logical operator cannot be the first query token")]
    InvalidLeadingLogical,

    /// The query ends with a logical connective and no condition after it.
    #[error("query ends with a dangling logical operator")]
    DanglingLogical,
}

/// The connective placed in front of the next condition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Connective {
    #[default]
    And,
    Or,
    NewQuery,
}

impl Connective {
    const fn token(self) -> &'static str {
        match self {
            Self::And => "^",
            Self::Or => "^OR",
            Self::NewQuery => "^NQ",
        }
    }
}

/// Fluent builder for `sysparm_query` encoded queries.
///
/// Every method consumes and returns the builder, so conditions chain
/// naturally. Conditions are joined with AND unless [`or`](Self::or) or
/// [`new_query`](Self::new_query) is called in between.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct QueryBuilder {
    parts: Vec<String>,
    next: Connective,
    error: Option<QueryError>,
}

impl QueryBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `field=value`.
    pub fn equals(self, field: &str, value: impl Display) -> Self {
        self.binary(field, "=", &value)
    }

    /// Adds `field!=value`.
    pub fn not_equals(self, field: &str, value: impl Display) -> Self {
        self.binary(field, "!=", &value)
    }

    /// Adds `field>value`.
    pub fn greater_than(self, field: &str, value: impl Display) -> Self {
        self.binary(field, ">", &value)
    }

    /// Adds `field>=value`.
    pub fn greater_or_equal(self, field: &str, value: impl Display) -> Self {
        self.binary(field, ">=", &value)
    }

    /// Adds `field<value`.
    pub fn less_than(self, field: &str, value: impl Display) -> Self {
        self.binary(field, "<", &value)
    }

    /// Adds `field<=value`.
    pub fn less_or_equal(self, field: &str, value: impl Display) -> Self {
        self.binary(field, "<=", &value)
    }

    /// Adds `fieldLIKEvalue` (contains).
    pub fn contains(self, field: &str, value: impl Display) -> Self {
        self.binary(field, "LIKE", &value)
    }

    /// Adds `fieldNOT LIKEvalue` (does not contain).
    pub fn not_contains(self, field: &str, value: impl Display) -> Self {
        self.binary(field, "NOT LIKE", &value)
    }

    /// Adds `fieldSTARTSWITHvalue`.
    pub fn starts_with(self, field: &str, value: impl Display) -> Self {
        self.binary(field, "STARTSWITH", &value)
    }

    /// Adds `fieldENDSWITHvalue`.
    pub fn ends_with(self, field: &str, value: impl Display) -> Self {
        self.binary(field, "ENDSWITH", &value)
    }

    /// Adds `fieldISEMPTY`.
    pub fn empty(self, field: &str) -> Self {
        self.unary(field, "ISEMPTY")
    }

    /// Adds `fieldISNOTEMPTY`.
    pub fn not_empty(self, field: &str) -> Self {
        self.unary(field, "ISNOTEMPTY")
    }

    /// Adds `fieldINa,b,c`. At least one value is required.
    pub fn in_list<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.list(field, "IN", values)
    }

    /// Adds `fieldNOT INa,b,c`. At least one value is required.
    pub fn not_in_list<I>(self, field: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        self.list(field, "NOT IN", values)
    }

    /// Adds a condition with any operator the instance understands, e.g.
    /// `BETWEEN`, `DYNAMIC` or `SAMEAS`.
    pub fn op(mut self, field: &str, operator: &str, value: impl Display) -> Self {
        if self.error.is_some() {
            return self;
        }
        let operator = operator.trim();
        if operator.is_empty() {
            self.error = Some(QueryError::EmptyOperator);
            return self;
        }
        self.binary(field, operator, &value)
    }

    /// Joins the next condition with AND. This is the default.
    pub fn and(self) -> Self {
        self.connective(Connective::And)
    }

    /// Joins the next condition with OR.
    pub fn or(self) -> Self {
        self.connective(Connective::Or)
    }

    /// Starts a new query group (`^NQ`) with the next condition.
    pub fn new_query(self) -> Self {
        self.connective(Connective::NewQuery)
    }

    /// Returns the encoded query.
    ///
    /// A builder without conditions yields an empty string.
    ///
    /// # Errors
    ///
    /// Returns the first latched [`QueryError`], or
    /// [`QueryError::DanglingLogical`] if the last call was OR or new-query.
    pub fn build(&self) -> Result<String, QueryError> {
        if let Some(error) = self.error() {
            return Err(error);
        }
        Ok(self.parts.concat())
    }

    /// Returns the error [`build`](Self::build) would report, if any.
    #[must_use]
    pub fn error(&self) -> Option<QueryError> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        if !self.parts.is_empty() && self.next != Connective::And {
            return Some(QueryError::DanglingLogical);
        }
        None
    }

    fn connective(mut self, connective: Connective) -> Self {
        if self.error.is_some() {
            return self;
        }
        if self.parts.is_empty() {
            self.error = Some(QueryError::InvalidLeadingLogical);
            return self;
        }
        self.next = connective;
        self
    }

    fn binary(mut self, field: &str, operator: &str, value: &dyn Display) -> Self {
        if self.error.is_some() {
            return self;
        }
        let result = valid_field(field).and_then(|field| {
            let value = format_value(field, value)?;
            Ok(format!("{field}{operator}{value}"))
        });
        self.push(result)
    }

    fn unary(self, field: &str, operator: &str) -> Self {
        if self.error.is_some() {
            return self;
        }
        let result = valid_field(field).map(|field| format!("{field}{operator}"));
        self.push(result)
    }

    fn list<I>(self, field: &str, operator: &str, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        if self.error.is_some() {
            return self;
        }
        let result = valid_field(field).and_then(|field| {
            let formatted = values
                .into_iter()
                .map(|value| format_value(field, &value))
                .collect::<Result<Vec<_>, _>>()?;
            if formatted.is_empty() {
                return Err(QueryError::EmptyValues {
                    field: field.to_string(),
                });
            }
            Ok(format!("{field}{operator}{}", formatted.join(",")))
        });
        self.push(result)
    }

    fn push(mut self, condition: Result<String, QueryError>) -> Self {
        match condition {
            Ok(condition) => {
                if self.parts.is_empty() {
                    self.parts.push(condition);
                } else {
                    self.parts.push(format!("{}{condition}", self.next.token()));
                }
                self.next = Connective::And;
            }
            Err(error) => self.error = Some(error),
        }
        self
    }
}

impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.build() {
            Ok(query) => f.write_str(&query),
            Err(_) => Ok(()),
        }
    }
}

fn valid_field(field: &str) -> Result<&str, QueryError> {
    let field = field.trim();
    if field.is_empty() {
        return Err(QueryError::EmptyField);
    }
    if field.contains(SEPARATOR) {
        return Err(QueryError::InvalidField {
            field: field.to_string(),
        });
    }
    Ok(field)
}

fn format_value(field: &str, value: &dyn Display) -> Result<String, QueryError> {
    let raw = value.to_string();
    if raw.is_empty() {
        return Err(QueryError::EmptyValue {
            field: field.to_string(),
        });
    }
    Ok(raw.replace(SEPARATOR, "^^"))
}
