//! Health HTTP Routes
//!
//! Liveness endpoint reporting the service version and the number of stored
//! cities. A failing store surfaces as `500`.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::rest_api::{RestError, RestResult};
use crate::store::CityStore;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub cities: u64,
}

/// Health check route at root /health
pub fn health_routes<S: CityStore + 'static>(store: Arc<S>) -> Router {
    Router::new()
        .route("/health", get(health_handler::<S>))
        .with_state(store)
}

/// Health check handler
async fn health_handler<S: CityStore + 'static>(
    State(store): State<Arc<S>>,
) -> RestResult<(StatusCode, Json<HealthResponse>)> {
    let cities = tokio::task::spawn_blocking(move || store.count())
        .await
        .map_err(|err| RestError::Internal(format!("store task failed: {err}")))??;

    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cities,
    };

    Ok((StatusCode::OK, Json(response)))
}
