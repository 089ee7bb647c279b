//! # SQLite Record Store
//!
//! One connection shared behind a mutex. Every write touches at most one row
//! and runs as a single statement, so no explicit transactions are needed.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::types::{Value, ValueRef};
use rusqlite::{params, params_from_iter, Connection, ErrorCode};
use serde_json::{Map, Number, Value as JsonValue};

use crate::model::{City, CityPatch, Column};
use crate::observability::{Event, ObservationScope};

use super::errors::{StoreError, StoreResult};
use super::schema::apply_schema;
use super::statement::SelectStatement;
use super::{CityStore, Row};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed city store
#[derive(Clone, Debug)]
pub struct SqliteCityStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteCityStore {
    /// Opens (creating if absent) a database file and applies the schema.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] when the file cannot be opened or the
    /// schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let scope = ObservationScope::with_detail(Event::DbOpen, "file");
        match Connection::open(path.as_ref()).map_err(StoreError::from).and_then(bootstrap) {
            Ok(store) => {
                scope.complete();
                Ok(store)
            }
            Err(err) => {
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }

    /// Opens a private in-memory database and applies the schema.
    pub fn open_in_memory() -> StoreResult<Self> {
        let scope = ObservationScope::with_detail(Event::DbOpen, "memory");
        match Connection::open_in_memory()
            .map_err(StoreError::from)
            .and_then(bootstrap)
        {
            Ok(store) => {
                scope.complete();
                Ok(store)
            }
            Err(err) => {
                scope.fail(&err.to_string());
                Err(err)
            }
        }
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|_| StoreError::LockPoisoned)
    }
}

fn bootstrap(conn: Connection) -> StoreResult<SqliteCityStore> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_schema(&conn)?;
    Ok(SqliteCityStore {
        connection: Arc::new(Mutex::new(conn)),
    })
}

impl CityStore for SqliteCityStore {
    fn insert(&self, city: &City) -> StoreResult<()> {
        let conn = self.lock()?;
        let result = conn.execute(
            "INSERT INTO Cities (name, population, country, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                city.name.as_str(),
                city.population,
                city.country.as_str(),
                city.latitude,
                city.longitude,
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::ConstraintViolation(city.name.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn update_by_name(&self, name: &str, patch: &CityPatch) -> StoreResult<usize> {
        let mut assignments: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(population) = patch.population {
            assignments.push(format!("{} = ?", Column::Population));
            values.push(Value::Integer(population));
        }
        if let Some(country) = &patch.country {
            assignments.push(format!("{} = ?", Column::Country));
            values.push(Value::Text(country.clone()));
        }
        if let Some(latitude) = patch.latitude {
            assignments.push(format!("{} = ?", Column::Latitude));
            values.push(Value::Real(latitude));
        }
        if let Some(longitude) = patch.longitude {
            assignments.push(format!("{} = ?", Column::Longitude));
            values.push(Value::Real(longitude));
        }

        if assignments.is_empty() {
            return Err(StoreError::EmptyPatch);
        }
        values.push(Value::Text(name.to_string()));

        let sql = format!(
            "UPDATE Cities SET {} WHERE name = ?;",
            assignments.join(", ")
        );
        let conn = self.lock()?;
        let changed = conn.execute(&sql, params_from_iter(values))?;
        Ok(changed)
    }

    fn delete_by_name(&self, name: &str) -> StoreResult<usize> {
        let conn = self.lock()?;
        let changed = conn.execute("DELETE FROM Cities WHERE name = ?1;", [name])?;
        Ok(changed)
    }

    fn execute(&self, statement: &SelectStatement) -> StoreResult<Vec<Row>> {
        let placeholders = statement.placeholder_count();
        if placeholders != statement.params.len() {
            return Err(StoreError::ParameterMismatch {
                placeholders,
                values: statement.params.len(),
            });
        }

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&statement.sql)?;
        let mut rows = stmt.query(params_from_iter(statement.params.iter()))?;
        let mut result = Vec::new();

        while let Some(row) = rows.next()? {
            let mut object = Map::with_capacity(statement.columns.len());
            for (index, column) in statement.columns.iter().enumerate() {
                let value = decode_cell(row.get_ref(index)?, *column)?;
                object.insert(column.as_str().to_string(), value);
            }
            result.push(object);
        }

        Ok(result)
    }

    fn count(&self) -> StoreResult<u64> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM Cities;", [], |row| row.get(0))?;
        u64::try_from(count).map_err(|_| StoreError::InvalidData(format!("row count {count}")))
    }
}

fn decode_cell(cell: ValueRef<'_>, column: Column) -> StoreResult<JsonValue> {
    match cell {
        ValueRef::Null => Ok(JsonValue::Null),
        ValueRef::Integer(value) => Ok(JsonValue::Number(value.into())),
        ValueRef::Real(value) => Number::from_f64(value).map(JsonValue::Number).ok_or_else(|| {
            StoreError::InvalidData(format!("non-finite value in Cities.{column}"))
        }),
        ValueRef::Text(bytes) => std::str::from_utf8(bytes)
            .map(|text| JsonValue::String(text.to_string()))
            .map_err(|_| StoreError::InvalidData(format!("invalid UTF-8 in Cities.{column}"))),
        ValueRef::Blob(_) => Err(StoreError::InvalidData(format!(
            "unexpected blob in Cities.{column}"
        ))),
    }
}
