//! # Cities Table Schema
//!
//! Creation is idempotent and must succeed before any request is served.

use rusqlite::Connection;

use super::errors::StoreResult;

/// Table name used in every statement
pub const CITIES_TABLE: &str = "Cities";

const CREATE_CITIES_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS Cities (
    name TEXT PRIMARY KEY UNIQUE,
    population INTEGER,
    country TEXT,
    latitude REAL,
    longitude REAL
);";

/// Creates the `Cities` table when it does not exist yet
pub fn apply_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(CREATE_CITIES_TABLE_SQL)?;
    Ok(())
}

/// Returns whether the `Cities` table is present
pub fn cities_table_exists(conn: &Connection) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [CITIES_TABLE],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(!cities_table_exists(&conn).unwrap());

        apply_schema(&conn).unwrap();
        apply_schema(&conn).unwrap();

        assert!(cities_table_exists(&conn).unwrap());
    }

    #[test]
    fn test_schema_columns_in_order() {
        let conn = Connection::open_in_memory().unwrap();
        apply_schema(&conn).unwrap();

        let mut stmt = conn.prepare("PRAGMA table_info(Cities);").unwrap();
        let columns: Vec<String> = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            columns,
            vec!["name", "population", "country", "latitude", "longitude"]
        );
    }
}
