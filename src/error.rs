//! Error types for the eco-tracker service
//!
//! Provides unified error handling using thiserror. Cache reads never
//! produce errors (absence is `None`); only upstream fetches and the
//! settings store can fail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error ==
/// Failure of an upstream air-quality fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to parse the upstream response body
    #[error("Failed to parse API response: {0}")]
    Parse(#[from] serde_json::Error),
}

// == Settings Error ==
/// Failure of the settings source of truth.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The backing store rejected or failed the operation
    #[error("Settings store error: {0}")]
    Store(String),
}

// == Api Error ==
/// Unified error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream air-quality API failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Settings store failure
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Fetch(err) => (StatusCode::BAD_GATEWAY, err.to_string()),
            ApiError::Settings(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
