//! # REST API Errors
//!
//! Error types for the REST API module. Every variant renders as
//! `{"message": "..."}` with the status code from [`RestError::status_code`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::CityValidationError;
use crate::observability::Event;
use crate::store::StoreError;

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Invalid pagination or sort parameter
    #[error("Invalid query parameter: {0}")]
    InvalidQueryParam(String),

    /// Filter value cannot be used against its column
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Identifier not on the column allow-list
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Same query key supplied more than once
    #[error("Duplicate query parameter: {0}")]
    DuplicateParam(String),

    /// Limit exceeds maximum
    #[error("Limit {0} exceeds maximum {1}")]
    LimitExceeded(u64, u64),

    /// Required create fields absent from the body
    #[error("All fields are required; missing: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Update body without any mutable field
    #[error("No fields to update")]
    NoFieldsToUpdate,

    /// Invalid request body
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Path segment could not be decoded
    #[error("Invalid path parameter: {0}")]
    InvalidPath(String),

    /// Target city does not exist
    #[error("City not found: {0}")]
    NotFound(String),

    /// Primary key already taken
    #[error("City already exists: {0}")]
    Conflict(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Internal error during store access
    #[error("Internal error: {0}")]
    Internal(String),

    /// Request exceeded its time budget
    #[error("Request timed out")]
    Timeout,
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::InvalidQueryParam(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidFilter(_) => StatusCode::BAD_REQUEST,
            RestError::UnknownColumn(_) => StatusCode::BAD_REQUEST,
            RestError::DuplicateParam(_) => StatusCode::BAD_REQUEST,
            RestError::LimitExceeded(_, _) => StatusCode::BAD_REQUEST,
            RestError::MissingFields(_) => StatusCode::BAD_REQUEST,
            RestError::NoFieldsToUpdate => StatusCode::BAD_REQUEST,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidPath(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::NotFound(_) => StatusCode::NOT_FOUND,

            // 409 Conflict
            RestError::Conflict(_) => StatusCode::CONFLICT,

            // 500 Internal Server Error
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,

            // 504 Gateway Timeout
            RestError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConstraintViolation(name) => RestError::Conflict(name),
            StoreError::EmptyPatch => RestError::NoFieldsToUpdate,
            other => RestError::Internal(other.to_string()),
        }
    }
}

impl From<CityValidationError> for RestError {
    fn from(err: CityValidationError) -> Self {
        RestError::InvalidBody(err.to_string())
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            RestError::Timeout => {
                tracing::warn!(event = Event::RequestTimeout.as_str(), status = status.as_u16());
            }
            err if status.is_server_error() => {
                tracing::error!(
                    event = Event::RequestFailed.as_str(),
                    status = status.as_u16(),
                    error = %err,
                );
            }
            err => {
                tracing::debug!(
                    event = Event::RequestRejected.as_str(),
                    status = status.as_u16(),
                    error = %err,
                );
            }
        }

        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            RestError::InvalidQueryParam("test".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::UnknownColumn("mayor".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::InvalidPath("name".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RestError::NotFound("Paris".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            RestError::Conflict("Paris".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            RestError::Internal("test".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(RestError::Timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_store_error_mapping() {
        let conflict = RestError::from(StoreError::ConstraintViolation("Rome".to_string()));
        assert_eq!(conflict, RestError::Conflict("Rome".to_string()));

        let internal = RestError::from(StoreError::LockPoisoned);
        assert_eq!(internal.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_missing_fields_message() {
        let err = RestError::MissingFields(vec!["population", "country"]);
        assert_eq!(
            err.to_string(),
            "All fields are required; missing: population, country"
        );
    }

    #[test]
    fn test_error_body_has_message_only() {
        let body = ErrorResponse::from(RestError::NoFieldsToUpdate);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"message": "No fields to update"}));
    }
}
