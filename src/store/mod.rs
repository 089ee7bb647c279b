//! # Record Store
//!
//! Durable persistence of City rows in an embedded SQLite database.
//!
//! # Invariants
//!
//! - The `Cities` table exists before a store handle is returned
//! - `name` is unique; a duplicate insert is a `ConstraintViolation`
//! - Update and delete report rows affected (0 or 1) instead of failing
//! - Reads only run statements whose identifiers come from the column
//!   allow-list; every value is bound

mod errors;
mod schema;
mod sqlite;
mod statement;

use serde_json::{Map, Value};

use crate::model::{City, CityPatch};

pub use errors::{StoreError, StoreResult};
pub use schema::{apply_schema, cities_table_exists, CITIES_TABLE};
pub use sqlite::SqliteCityStore;
pub use statement::SelectStatement;

/// One result row: column name to value, in projection order
pub type Row = Map<String, Value>;

/// Primitive operations over the `Cities` table
pub trait CityStore: Send + Sync {
    /// Inserts a new city.
    ///
    /// Fails with [`StoreError::ConstraintViolation`] when `name` exists.
    fn insert(&self, city: &City) -> StoreResult<()>;

    /// Applies the present fields of `patch`; returns rows affected.
    fn update_by_name(&self, name: &str, patch: &CityPatch) -> StoreResult<usize>;

    /// Deletes a city; returns rows affected.
    fn delete_by_name(&self, name: &str) -> StoreResult<usize>;

    /// Runs a parameterized read built by the query builder.
    fn execute(&self, statement: &SelectStatement) -> StoreResult<Vec<Row>>;

    /// Total number of rows.
    fn count(&self) -> StoreResult<u64>;
}
