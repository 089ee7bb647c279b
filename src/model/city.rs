//! # City Record
//!
//! `name` is the primary key and never changes after creation. The other
//! four fields are mutable through [`CityPatch`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Field-level validation failure for city data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CityValidationError {
    #[error("{0} must not be empty")]
    Blank(&'static str),

    #[error("population must not be negative, got {0}")]
    NegativePopulation(i64),

    #[error("latitude must be within [-90, 90], got {0}")]
    LatitudeOutOfRange(f64),

    #[error("longitude must be within [-180, 180], got {0}")]
    LongitudeOutOfRange(f64),
}

/// A persisted city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub population: i64,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl City {
    pub fn new(
        name: impl Into<String>,
        population: i64,
        country: impl Into<String>,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: name.into(),
            population,
            country: country.into(),
            latitude,
            longitude,
        }
    }

    /// Checks field values. Zero is a legitimate value for every number.
    pub fn validate(&self) -> Result<(), CityValidationError> {
        if self.name.trim().is_empty() {
            return Err(CityValidationError::Blank("name"));
        }
        validate_population(self.population)?;
        validate_country(&self.country)?;
        validate_latitude(self.latitude)?;
        validate_longitude(self.longitude)
    }
}

/// Partial update of the mutable city fields
///
/// `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl CityPatch {
    /// True when no field would be changed
    pub fn is_empty(&self) -> bool {
        self.population.is_none()
            && self.country.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
    }

    pub fn validate(&self) -> Result<(), CityValidationError> {
        if let Some(population) = self.population {
            validate_population(population)?;
        }
        if let Some(country) = &self.country {
            validate_country(country)?;
        }
        if let Some(latitude) = self.latitude {
            validate_latitude(latitude)?;
        }
        if let Some(longitude) = self.longitude {
            validate_longitude(longitude)?;
        }
        Ok(())
    }
}

fn validate_population(population: i64) -> Result<(), CityValidationError> {
    if population < 0 {
        return Err(CityValidationError::NegativePopulation(population));
    }
    Ok(())
}

fn validate_country(country: &str) -> Result<(), CityValidationError> {
    if country.trim().is_empty() {
        return Err(CityValidationError::Blank("country"));
    }
    Ok(())
}

fn validate_latitude(latitude: f64) -> Result<(), CityValidationError> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(CityValidationError::LatitudeOutOfRange(latitude));
    }
    Ok(())
}

fn validate_longitude(longitude: f64) -> Result<(), CityValidationError> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(CityValidationError::LongitudeOutOfRange(longitude));
    }
    Ok(())
}
