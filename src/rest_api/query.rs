//! # Query Builder
//!
//! Compiles validated [`QueryParams`] into a single parameterized SELECT.
//!
//! Clause order is fixed: projection, `WHERE` (equality filters in schema
//! order, then the name search), `ORDER BY` (requested keys, then `rowid`),
//! `LIMIT`, `OFFSET`. Values never appear in the SQL text.

use rusqlite::types::Value;

use crate::store::{SelectStatement, CITIES_TABLE};

use super::errors::{RestError, RestResult};
use super::parser::QueryParams;

/// Escape character for LIKE patterns
const LIKE_ESCAPE: char = '\\';

/// Build the SELECT statement for a list request
pub fn build_select(params: &QueryParams) -> RestResult<SelectStatement> {
    let columns = params.columns();
    let mut predicates: Vec<String> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    for filter in &params.filters {
        predicates.push(filter.predicate());
        values.push(filter.value.to_sql_value());
    }

    if let Some(term) = &params.search {
        predicates.push(format!("name LIKE ? ESCAPE '{LIKE_ESCAPE}'"));
        values.push(Value::Text(format!("%{}%", escape_like(term))));
    }

    let select_list = columns
        .iter()
        .map(|column| column.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("SELECT {select_list} FROM {CITIES_TABLE}");

    if !predicates.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&predicates.join(" AND "));
    }

    // rowid last keeps pages stable and defaults to insertion order
    let mut order_terms: Vec<String> = params.order.iter().map(|o| o.term()).collect();
    order_terms.push("rowid ASC".to_string());
    sql.push_str(" ORDER BY ");
    sql.push_str(&order_terms.join(", "));

    sql.push_str(" LIMIT ? OFFSET ?");
    values.push(Value::Integer(to_sql_integer(params.limit)?));
    values.push(Value::Integer(to_sql_integer(params.offset()?)?));

    Ok(SelectStatement {
        sql,
        params: values,
        columns,
    })
}

/// Escape LIKE metacharacters so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

fn to_sql_integer(value: u64) -> RestResult<i64> {
    i64::try_from(value)
        .map_err(|_| RestError::InvalidQueryParam(format!("{value} is out of range")))
}
