//! # Column Allow-List
//!
//! Every identifier a client can name (sort keys, filter keys, projection
//! entries) must resolve to one of these variants before it reaches SQL text.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Storage class of a column, used to coerce query-string values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Integer,
    Real,
}

/// Columns of the `Cities` table, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Column {
    Name,
    Population,
    Country,
    Latitude,
    Longitude,
}

impl Column {
    /// All columns in schema order
    pub const ALL: [Column; 5] = [
        Column::Name,
        Column::Population,
        Column::Country,
        Column::Latitude,
        Column::Longitude,
    ];

    /// SQL identifier for this column
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::Population => "population",
            Column::Country => "country",
            Column::Latitude => "latitude",
            Column::Longitude => "longitude",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Name | Column::Country => ColumnKind::Text,
            Column::Population => ColumnKind::Integer,
            Column::Latitude | Column::Longitude => ColumnKind::Real,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name is not on the allow-list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown column: {0}")]
pub struct UnknownColumn(pub String);

impl FromStr for Column {
    type Err = UnknownColumn;

    /// Exact, case-sensitive match against the schema names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Column::ALL
            .into_iter()
            .find(|column| column.as_str() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_columns() {
        for column in Column::ALL {
            assert_eq!(column.as_str().parse::<Column>().unwrap(), column);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_and_injected_names() {
        assert!("Name".parse::<Column>().is_err());
        assert!("rowid".parse::<Column>().is_err());
        assert!("name; DROP TABLE Cities".parse::<Column>().is_err());
        assert!("".parse::<Column>().is_err());
        assert_eq!(
            "mayor".parse::<Column>().unwrap_err().to_string(),
            "unknown column: mayor"
        );
    }

    #[test]
    fn test_column_kinds() {
        assert_eq!(Column::Name.kind(), ColumnKind::Text);
        assert_eq!(Column::Population.kind(), ColumnKind::Integer);
        assert_eq!(Column::Longitude.kind(), ColumnKind::Real);
    }
}
