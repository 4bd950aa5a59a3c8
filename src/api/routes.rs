//! API Routes
//!
//! Configures the Axum router with all service endpoints.

use axum::{
    routing::{get, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    air_quality_handler, get_settings_handler, health_handler, measurements_handler,
    stats_handler, update_settings_handler, update_threshold_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/air-quality` - Stations and readings near a coordinate
/// - `GET /api/measurements` - Latest measurements for one parameter
/// - `GET /api/users/:user_id/settings` - Fetch user settings
/// - `PUT /api/users/:user_id/settings` - Partially update user settings
/// - `PUT /api/users/:user_id/thresholds` - Update a single alert threshold
/// - `GET /stats` - Cache statistics per role
/// - `GET /health` - Health check
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/air-quality", get(air_quality_handler))
        .route("/api/measurements", get(measurements_handler))
        .route(
            "/api/users/:user_id/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
        .route("/api/users/:user_id/thresholds", put(update_threshold_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
