//! # REST API Handler
//!
//! Maps validated requests onto [`CityStore`] calls. Every method is
//! synchronous; the server runs them on the blocking pool.

use std::sync::Arc;

use serde::Deserialize;

use crate::model::{City, CityPatch};
use crate::observability::Event;
use crate::store::{CityStore, Row};

use super::errors::{RestError, RestResult};
use super::parser::QueryParams;
use super::query::build_select;
use super::response::{CreateCityResponse, MessageResponse};

/// Create request body
///
/// Every field is optional at the serde level so absent fields can be
/// reported together instead of failing on the first one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl CreateCityRequest {
    /// Check presence of every field, then field values
    pub fn into_city(self) -> RestResult<City> {
        let mut missing: Vec<&'static str> = Vec::new();
        if self.name.is_none() {
            missing.push("name");
        }
        if self.population.is_none() {
            missing.push("population");
        }
        if self.country.is_none() {
            missing.push("country");
        }
        if self.latitude.is_none() {
            missing.push("latitude");
        }
        if self.longitude.is_none() {
            missing.push("longitude");
        }

        match (
            self.name,
            self.population,
            self.country,
            self.latitude,
            self.longitude,
        ) {
            (Some(name), Some(population), Some(country), Some(latitude), Some(longitude)) => {
                let city = City::new(name, population, country, latitude, longitude);
                city.validate()?;
                Ok(city)
            }
            _ => Err(RestError::MissingFields(missing)),
        }
    }
}

/// City request handler over a shared store
pub struct CityHandler<S: CityStore> {
    store: Arc<S>,
}

impl<S: CityStore> Clone for CityHandler<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: CityStore> CityHandler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Insert a new city
    pub fn create(&self, request: CreateCityRequest) -> RestResult<CreateCityResponse> {
        let city = request.into_city()?;
        self.store.insert(&city)?;

        tracing::info!(event = Event::CityCreated.as_str(), name = %city.name);
        Ok(CreateCityResponse::new(city))
    }

    /// Apply a partial update to an existing city
    pub fn update(&self, name: &str, patch: CityPatch) -> RestResult<MessageResponse> {
        if patch.is_empty() {
            return Err(RestError::NoFieldsToUpdate);
        }
        patch.validate()?;

        let changed = self.store.update_by_name(name, &patch)?;
        if changed == 0 {
            return Err(RestError::NotFound(name.to_string()));
        }

        tracing::info!(event = Event::CityUpdated.as_str(), name = %name);
        Ok(MessageResponse::updated())
    }

    /// Delete a city by name
    pub fn delete(&self, name: &str) -> RestResult<MessageResponse> {
        let changed = self.store.delete_by_name(name)?;
        if changed == 0 {
            return Err(RestError::NotFound(name.to_string()));
        }

        tracing::info!(event = Event::CityDeleted.as_str(), name = %name);
        Ok(MessageResponse::deleted())
    }

    /// Run a list query
    pub fn list(&self, params: &QueryParams) -> RestResult<Vec<Row>> {
        let statement = build_select(params)?;
        let rows = self.store.execute(&statement)?;

        tracing::debug!(
            event = Event::CitiesListed.as_str(),
            page = params.page,
            limit = params.limit,
            rows = rows.len(),
        );
        Ok(rows)
    }

    /// Total number of stored cities
    pub fn count(&self) -> RestResult<u64> {
        Ok(self.store.count()?)
    }
}
