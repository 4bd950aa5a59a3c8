//! Response DTOs for the HTTP API

use serde::Serialize;

use crate::cache::CacheStats;

// == Cache Stats Response ==
/// Statistics for every cache role, as returned by `GET /stats`.
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub air_quality: CacheStats,
    pub measurements: CacheStats,
    pub user_settings: CacheStats,
    /// Whether the durable tier has a storage backend attached
    pub durable_cache_available: bool,
}

// == Health Response ==
/// Response body for the health endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g. "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp.
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

// == Error Response ==
/// Error body for all failure responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
