//! # Parameterized Read Statement
//!
//! The contract between the query builder and the store: SQL text that only
//! contains allow-listed identifiers and `?` placeholders, plus the values to
//! bind to them in order.

use rusqlite::types::Value;

use crate::model::Column;

/// A ready-to-run SELECT over the `Cities` table
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// SQL text with positional placeholders
    pub sql: String,

    /// Values bound to the placeholders, in order
    pub params: Vec<Value>,

    /// Columns returned by each row, in order
    pub columns: Vec<Column>,
}

impl SelectStatement {
    /// Number of `?` placeholders in the SQL text
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}
