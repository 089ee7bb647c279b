//! # Record Store Errors
//!
//! Error codes:
//! - CITIES_STORE_CONSTRAINT_VIOLATION - duplicate primary key
//! - CITIES_STORE_SQLITE_ERROR - any other SQLite fault
//! - CITIES_STORE_INVALID_DATA - a persisted cell could not be decoded
//! - CITIES_STORE_EMPTY_PATCH - update issued with nothing to set
//! - CITIES_STORE_PARAMETER_MISMATCH - placeholders and bound values disagree
//! - CITIES_STORE_LOCK_POISONED - a previous holder of the connection panicked

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Uniqueness rule on the primary key rejected a write
    #[error("City already exists: {0}")]
    ConstraintViolation(String),

    /// Underlying SQLite failure
    #[error("{0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A persisted value has a storage class the service does not produce
    #[error("Invalid persisted data: {0}")]
    InvalidData(String),

    /// Update called without any assignment
    #[error("No fields to update")]
    EmptyPatch,

    /// Read statement whose placeholder count differs from its values
    #[error("Statement has {placeholders} placeholders but {values} bound values")]
    ParameterMismatch { placeholders: usize, values: usize },

    /// Connection mutex was poisoned
    #[error("Store connection lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::ConstraintViolation(_) => "CITIES_STORE_CONSTRAINT_VIOLATION",
            StoreError::Sqlite(_) => "CITIES_STORE_SQLITE_ERROR",
            StoreError::InvalidData(_) => "CITIES_STORE_INVALID_DATA",
            StoreError::EmptyPatch => "CITIES_STORE_EMPTY_PATCH",
            StoreError::ParameterMismatch { .. } => "CITIES_STORE_PARAMETER_MISMATCH",
            StoreError::LockPoisoned => "CITIES_STORE_LOCK_POISONED",
        }
    }
}
