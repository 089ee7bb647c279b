//! City Store Durability Tests
//!
//! Tests for the file-backed store:
//! - Rows survive closing and reopening the database
//! - Opening an existing database never drops or recreates the table
//! - Reads built by the query builder see exactly the stored rows

use cities::model::{City, CityPatch, Column};
use cities::rest_api::{build_select, QueryParams};
use cities::store::{cities_table_exists, CityStore, SqliteCityStore, StoreError};
use serde_json::json;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn create_temp_data_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

fn query(items: &[(&str, &str)]) -> QueryParams {
    let pairs: Vec<(String, String)> = items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    QueryParams::parse(&pairs).unwrap()
}

// =============================================================================
// Durability
// =============================================================================

#[test]
fn test_rows_survive_reopen() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("cities.db");

    {
        let store = SqliteCityStore::open(&path).unwrap();
        store
            .insert(&City::new("Lisbon", 545_000, "Portugal", 38.72, -9.14))
            .unwrap();
        store
            .insert(&City::new("Porto", 232_000, "Portugal", 41.15, -8.61))
            .unwrap();
    }

    let store = SqliteCityStore::open(&path).unwrap();
    assert_eq!(store.count().unwrap(), 2);

    let statement = build_select(&query(&[("name", "Porto")])).unwrap();
    let rows = store.execute(&statement).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["population"], json!(232_000));
}

#[test]
fn test_open_is_idempotent_on_existing_file() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("cities.db");

    let first = SqliteCityStore::open(&path).unwrap();
    first
        .insert(&City::new("Accra", 2_500_000, "Ghana", 5.6, -0.19))
        .unwrap();
    drop(first);

    let second = SqliteCityStore::open(&path).unwrap();
    assert_eq!(second.count().unwrap(), 1);

    let conn = rusqlite::Connection::open(&path).unwrap();
    assert!(cities_table_exists(&conn).unwrap());
}

#[test]
fn test_duplicate_name_rejected_across_handles() {
    let temp_dir = create_temp_data_dir();
    let path = temp_dir.path().join("cities.db");

    let store = SqliteCityStore::open(&path).unwrap();
    let clone = store.clone();
    store
        .insert(&City::new("Lima", 9_700_000, "Peru", -12.05, -77.04))
        .unwrap();

    let err = clone
        .insert(&City::new("Lima", 1, "Peru", 0.0, 0.0))
        .unwrap_err();
    assert!(matches!(err, StoreError::ConstraintViolation(ref name) if name == "Lima"));
    assert_eq!(store.count().unwrap(), 1);
}

// =============================================================================
// Writes
// =============================================================================

#[test]
fn test_update_then_delete_round() {
    let temp_dir = create_temp_data_dir();
    let store = SqliteCityStore::open(temp_dir.path().join("cities.db")).unwrap();
    store
        .insert(&City::new("Hanoi", 8_000_000, "Vietnam", 21.03, 105.85))
        .unwrap();

    let patch = CityPatch {
        country: Some("Viet Nam".to_string()),
        latitude: Some(21.0285),
        ..Default::default()
    };
    assert_eq!(store.update_by_name("Hanoi", &patch).unwrap(), 1);

    let statement = build_select(&query(&[("projection", "country,latitude,population")])).unwrap();
    let rows = store.execute(&statement).unwrap();
    assert_eq!(
        serde_json::Value::Object(rows[0].clone()),
        json!({"country": "Viet Nam", "latitude": 21.0285, "population": 8_000_000})
    );

    assert_eq!(store.delete_by_name("Hanoi").unwrap(), 1);
    assert_eq!(store.count().unwrap(), 0);
}

#[test]
fn test_empty_patch_never_reaches_sqlite() {
    let store = SqliteCityStore::open_in_memory().unwrap();
    assert!(matches!(
        store.update_by_name("Anywhere", &CityPatch::default()),
        Err(StoreError::EmptyPatch)
    ));
}

// =============================================================================
// Reads
// =============================================================================

#[test]
fn test_projection_preserves_requested_order() {
    let store = SqliteCityStore::open_in_memory().unwrap();
    store
        .insert(&City::new("Cairo", 10_000_000, "Egypt", 30.04, 31.24))
        .unwrap();

    let statement = build_select(&query(&[("projection", "longitude,name")])).unwrap();
    assert_eq!(statement.columns, vec![Column::Longitude, Column::Name]);

    let rows = store.execute(&statement).unwrap();
    let keys: Vec<&String> = rows[0].keys().collect();
    assert_eq!(keys, vec!["longitude", "name"]);
}

#[test]
fn test_sort_with_rowid_tiebreak() {
    let store = SqliteCityStore::open_in_memory().unwrap();
    for (name, population) in [("B", 10), ("A", 10), ("C", 5)] {
        store
            .insert(&City::new(name, population, "X", 0.0, 0.0))
            .unwrap();
    }

    let statement = build_select(&query(&[("sort", "-population"), ("projection", "name")])).unwrap();
    let names: Vec<serde_json::Value> = store
        .execute(&statement)
        .unwrap()
        .into_iter()
        .map(|row| row["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("B"), json!("A"), json!("C")]);
}
