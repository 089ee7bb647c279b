//! # City Data Model
//!
//! The single record type persisted by the service, its partial-update
//! shape, and the closed set of column names that client-supplied
//! identifiers are validated against.

mod city;
mod column;

pub use city::{City, CityPatch, CityValidationError};
pub use column::{Column, ColumnKind};
