//! # Query Parameter Parser
//!
//! Parses the list endpoint's query string into structured, validated
//! options. Reserved keys are `page`, `limit`, `sort`, `search` and
//! `projection`; every other key is an equality filter.

use std::collections::HashSet;

use crate::model::Column;

use super::errors::{RestError, RestResult};
use super::filter::{parse_column, FilterExpr, OrderBy};

/// Maximum number of records that can be returned
pub const MAX_LIMIT: u64 = 1000;

/// Default limit if not specified
pub const DEFAULT_LIMIT: u64 = 10;

/// Default 1-based page number
pub const DEFAULT_PAGE: u64 = 1;

/// Parsed query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    /// 1-based page number
    pub page: u64,

    /// Number of records per page
    pub limit: u64,

    /// Order by clauses, in priority order
    pub order: Vec<OrderBy>,

    /// Case-insensitive substring to match against `name`
    pub search: Option<String>,

    /// Columns to return (None = all)
    pub projection: Option<Vec<Column>>,

    /// Equality filters, in schema column order
    pub filters: Vec<FilterExpr>,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            order: Vec::new(),
            search: None,
            projection: None,
            filters: Vec::new(),
        }
    }
}

impl QueryParams {
    /// Parse query parameters from key/value pairs in request order
    pub fn parse(pairs: &[(String, String)]) -> RestResult<Self> {
        let mut result = QueryParams::default();
        let mut seen: HashSet<&str> = HashSet::new();

        for (key, value) in pairs {
            if !seen.insert(key.as_str()) {
                return Err(RestError::DuplicateParam(key.clone()));
            }

            match key.as_str() {
                "page" => {
                    result.page = parse_positive("page", value)?;
                }
                "limit" => {
                    result.limit = parse_limit(value)?;
                }
                "sort" => {
                    result.order = parse_sort(value)?;
                }
                "search" => {
                    result.search = Some(value.clone()).filter(|term| !term.is_empty());
                }
                "projection" => {
                    result.projection = parse_projection(value)?;
                }
                _ => {
                    result.filters.push(FilterExpr::parse(key, value)?);
                }
            }
        }

        // Statement text must not depend on query-string order
        result.filters.sort_by_key(|filter| filter.column);

        Ok(result)
    }

    /// Row offset for the requested page
    pub fn offset(&self) -> RestResult<u64> {
        (self.page - 1)
            .checked_mul(self.limit)
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or_else(|| {
                RestError::InvalidQueryParam(format!(
                    "page {} is out of range for limit {}",
                    self.page, self.limit
                ))
            })
    }

    /// Columns returned by each row
    pub fn columns(&self) -> Vec<Column> {
        self.projection
            .clone()
            .unwrap_or_else(|| Column::ALL.to_vec())
    }
}

/// Parse a strictly positive integer
fn parse_positive(name: &str, value: &str) -> RestResult<u64> {
    match value.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(RestError::InvalidQueryParam(format!(
            "{name} must be a positive integer, got '{value}'"
        ))),
    }
}

/// Parse limit parameter
fn parse_limit(value: &str) -> RestResult<u64> {
    let limit = parse_positive("limit", value)?;
    if limit > MAX_LIMIT {
        return Err(RestError::LimitExceeded(limit, MAX_LIMIT));
    }
    Ok(limit)
}

/// Parse sort parameter (comma-separated sort keys)
fn parse_sort(value: &str) -> RestResult<Vec<OrderBy>> {
    let mut orders: Vec<OrderBy> = Vec::new();

    for part in value.split(',') {
        if part.trim().is_empty() {
            continue;
        }

        let order = OrderBy::parse(part)?;
        if orders.iter().any(|existing| existing.column == order.column) {
            return Err(RestError::InvalidQueryParam(format!(
                "sort column repeated: {}",
                order.column
            )));
        }
        orders.push(order);
    }

    Ok(orders)
}

/// Parse projection parameter (comma-separated column list).
///
/// Blank entries are skipped and repeats collapse to their first position.
/// A projection with nothing left selects every column.
fn parse_projection(value: &str) -> RestResult<Option<Vec<Column>>> {
    let mut columns: Vec<Column> = Vec::new();

    for field in value.split(',').map(str::trim).filter(|f| !f.is_empty()) {
        let column = parse_column(field)?;
        if !columns.contains(&column) {
            columns.push(column);
        }
    }

    if columns.is_empty() {
        return Ok(None);
    }
    Ok(Some(columns))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest_api::filter::FilterValue;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let query = QueryParams::parse(&[]).unwrap();
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 10);
        assert_eq!(query.offset().unwrap(), 0);
        assert_eq!(query.columns(), Column::ALL.to_vec());
        assert!(query.filters.is_empty());
    }

    #[test]
    fn test_full_query_params() {
        let query = QueryParams::parse(&pairs(&[
            ("page", "3"),
            ("limit", "20"),
            ("sort", "population desc,name"),
            ("search", "san"),
            ("projection", "name,population"),
            ("country", "USA"),
        ]))
        .unwrap();

        assert_eq!(query.offset().unwrap(), 40);
        assert_eq!(query.order.len(), 2);
        assert!(!query.order[0].ascending);
        assert_eq!(query.search.as_deref(), Some("san"));
        assert_eq!(
            query.projection,
            Some(vec![Column::Name, Column::Population])
        );
        assert_eq!(query.filters.len(), 1);
        assert_eq!(
            query.filters[0].value,
            FilterValue::Text("USA".to_string())
        );
    }

    #[test]
    fn test_parse_pagination_rejects_non_positive() {
        for bad in ["0", "-1", "abc", "", "1.5"] {
            let result = QueryParams::parse(&pairs(&[("page", bad)]));
            assert!(
                matches!(result, Err(RestError::InvalidQueryParam(_))),
                "page={bad}"
            );

            let result = QueryParams::parse(&pairs(&[("limit", bad)]));
            assert!(
                matches!(result, Err(RestError::InvalidQueryParam(_))),
                "limit={bad}"
            );
        }
    }

    #[test]
    fn test_limit_exceeded() {
        let result = QueryParams::parse(&pairs(&[("limit", "5000")]));
        assert!(matches!(result, Err(RestError::LimitExceeded(5000, 1000))));
    }

    #[test]
    fn test_offset_overflow_rejected() {
        let query =
            QueryParams::parse(&pairs(&[("page", "18446744073709551615"), ("limit", "1000")]))
                .unwrap();
        assert!(matches!(
            query.offset(),
            Err(RestError::InvalidQueryParam(_))
        ));
    }

    #[test]
    fn test_projection_dedupes_and_skips_blanks() {
        let query =
            QueryParams::parse(&pairs(&[("projection", "country, ,name,country")])).unwrap();
        assert_eq!(
            query.projection,
            Some(vec![Column::Country, Column::Name])
        );

        let query = QueryParams::parse(&pairs(&[("projection", "")])).unwrap();
        assert_eq!(query.projection, None);
    }

    #[test]
    fn test_projection_unknown_column() {
        let result = QueryParams::parse(&pairs(&[("projection", "name,mayor")]));
        assert_eq!(result, Err(RestError::UnknownColumn("mayor".to_string())));
    }

    #[test]
    fn test_unknown_filter_key() {
        let result = QueryParams::parse(&pairs(&[("mayor", "Bob")]));
        assert_eq!(result, Err(RestError::UnknownColumn("mayor".to_string())));
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = QueryParams::parse(&pairs(&[("country", "A"), ("country", "B")]));
        assert_eq!(result, Err(RestError::DuplicateParam("country".to_string())));
    }

    #[test]
    fn test_filters_sorted_by_schema_order() {
        let a = QueryParams::parse(&pairs(&[("longitude", "1"), ("name", "X"), ("population", "5")]))
            .unwrap();
        let b = QueryParams::parse(&pairs(&[("population", "5"), ("longitude", "1"), ("name", "X")]))
            .unwrap();

        assert_eq!(a.filters, b.filters);
        let columns: Vec<Column> = a.filters.iter().map(|f| f.column).collect();
        assert_eq!(
            columns,
            vec![Column::Name, Column::Population, Column::Longitude]
        );
    }

    #[test]
    fn test_empty_search_and_sort_ignored() {
        let query = QueryParams::parse(&pairs(&[("search", ""), ("sort", " , ")])).unwrap();
        assert_eq!(query.search, None);
        assert!(query.order.is_empty());
    }

    #[test]
    fn test_repeated_sort_column_rejected() {
        let result = QueryParams::parse(&pairs(&[("sort", "name,name desc")]));
        assert!(matches!(result, Err(RestError::InvalidQueryParam(_))));
    }
}
