//! # Filter and Ordering Expressions
//!
//! Typed forms of the `<column>=<value>` and `sort` query parameters. Both
//! hold an allow-listed [`Column`], never a raw client string.

use rusqlite::types::Value;

use crate::model::{Column, ColumnKind};

use super::errors::{RestError, RestResult};

/// A value coerced to the storage class of its column
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Real(f64),
}

impl FilterValue {
    /// Coerce a raw query-string value for `column`
    pub fn parse(column: Column, raw: &str) -> RestResult<Self> {
        match column.kind() {
            ColumnKind::Text => Ok(FilterValue::Text(raw.to_string())),
            ColumnKind::Integer => raw.trim().parse::<i64>().map(FilterValue::Integer).map_err(|_| {
                RestError::InvalidFilter(format!("{column} expects an integer, got '{raw}'"))
            }),
            ColumnKind::Real => match raw.trim().parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(FilterValue::Real(value)),
                _ => Err(RestError::InvalidFilter(format!(
                    "{column} expects a number, got '{raw}'"
                ))),
            },
        }
    }

    /// Value to bind to the statement placeholder
    pub fn to_sql_value(&self) -> Value {
        match self {
            FilterValue::Text(text) => Value::Text(text.clone()),
            FilterValue::Integer(value) => Value::Integer(*value),
            FilterValue::Real(value) => Value::Real(*value),
        }
    }
}

/// Equality filter: `column = value`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    /// Column to filter on
    pub column: Column,

    /// Value to compare against
    pub value: FilterValue,
}

impl FilterExpr {
    /// Resolve a query key against the allow-list and coerce its value
    pub fn parse(key: &str, raw: &str) -> RestResult<Self> {
        let column = parse_column(key)?;
        Ok(Self {
            column,
            value: FilterValue::parse(column, raw)?,
        })
    }

    /// SQL predicate with a single placeholder
    pub fn predicate(&self) -> String {
        format!("{} = ?", self.column)
    }
}

/// Order by clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: Column,
    pub ascending: bool,
}

impl OrderBy {
    /// Parse one sort key.
    ///
    /// Accepted forms: `col`, `-col`, `col asc`, `col desc`, `col.asc`,
    /// `col.desc` (direction is case-insensitive).
    pub fn parse(part: &str) -> RestResult<Self> {
        let part = part.trim();

        if let Some(rest) = part.strip_prefix('-') {
            return Ok(Self {
                column: parse_column(rest.trim())?,
                ascending: false,
            });
        }

        let (field, direction) = match part.split_once(char::is_whitespace) {
            Some((field, direction)) => (field, Some(direction.trim())),
            None => match part.rsplit_once('.') {
                Some((field, direction)) => (field, Some(direction)),
                None => (part, None),
            },
        };

        let ascending = match direction.map(str::to_ascii_lowercase).as_deref() {
            None | Some("asc") => true,
            Some("desc") => false,
            Some(other) => {
                return Err(RestError::InvalidQueryParam(format!(
                    "Invalid sort direction: {other}"
                )))
            }
        };

        Ok(Self {
            column: parse_column(field)?,
            ascending,
        })
    }

    /// SQL ordering term
    pub fn term(&self) -> String {
        let direction = if self.ascending { "ASC" } else { "DESC" };
        format!("{} {}", self.column, direction)
    }
}

/// Resolve a client identifier to an allow-listed column
pub fn parse_column(name: &str) -> RestResult<Column> {
    name.parse::<Column>()
        .map_err(|_| RestError::UnknownColumn(name.to_string()))
}
