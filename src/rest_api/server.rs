//! # REST API HTTP Server
//!
//! Axum routes for the city endpoints.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};

use crate::model::CityPatch;
use crate::store::{CityStore, Row};

use super::errors::{RestError, RestResult};
use super::handler::{CityHandler, CreateCityRequest};
use super::parser::QueryParams;
use super::response::{CreateCityResponse, MessageResponse};

/// REST API server state
pub struct RestServer<S: CityStore> {
    handler: CityHandler<S>,
}

impl<S: CityStore + 'static> RestServer<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            handler: CityHandler::new(store),
        }
    }

    /// Build the Axum router
    pub fn router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/cities", get(list_handler::<S>).post(create_handler::<S>))
            .route(
                "/cities/:name",
                put(update_handler::<S>).delete(delete_handler::<S>),
            )
            .with_state(state)
    }
}

/// Shared state type
type ServerState<S> = Arc<RestServer<S>>;

/// Run store-bound work on the blocking pool
async fn run_blocking<T, F>(work: F) -> RestResult<T>
where
    F: FnOnce() -> RestResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| RestError::Internal(format!("store task failed: {err}")))?
}

/// Decoded `:name` segment
fn city_name(path: Result<Path<String>, PathRejection>) -> RestResult<String> {
    let Path(name) = path.map_err(|err| RestError::InvalidPath(err.body_text()))?;
    Ok(name)
}

/// List cities handler
async fn list_handler<S: CityStore + 'static>(
    State(server): State<ServerState<S>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Row>>, RestError> {
    let Query(pairs) = query.map_err(|err| RestError::InvalidQueryParam(err.body_text()))?;
    let params = QueryParams::parse(&pairs)?;

    let handler = server.handler.clone();
    let rows = run_blocking(move || handler.list(&params)).await?;
    Ok(Json(rows))
}

/// Create city handler
async fn create_handler<S: CityStore + 'static>(
    State(server): State<ServerState<S>>,
    body: Result<Json<CreateCityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateCityResponse>), RestError> {
    let Json(request) = body.map_err(|err| RestError::InvalidBody(err.body_text()))?;

    let handler = server.handler.clone();
    let result = run_blocking(move || handler.create(request)).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Update city handler
async fn update_handler<S: CityStore + 'static>(
    State(server): State<ServerState<S>>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Json<CityPatch>, JsonRejection>,
) -> Result<Json<MessageResponse>, RestError> {
    let name = city_name(path)?;
    let Json(patch) = body.map_err(|err| RestError::InvalidBody(err.body_text()))?;

    let handler = server.handler.clone();
    let result = run_blocking(move || handler.update(&name, patch)).await?;
    Ok(Json(result))
}

/// Delete city handler
async fn delete_handler<S: CityStore + 'static>(
    State(server): State<ServerState<S>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>, RestError> {
    let name = city_name(path)?;
    let handler = server.handler.clone();
    let result = run_blocking(move || handler.delete(&name)).await?;
    Ok(Json(result))
}
