//! API Module
//!
//! HTTP handlers and routing for the service REST API.
//!
//! # Endpoints
//! - `GET /api/air-quality` - Stations and readings near a coordinate
//! - `GET /api/measurements` - Latest measurements for one parameter
//! - `GET /api/users/:user_id/settings` - Fetch user settings
//! - `PUT /api/users/:user_id/settings` - Partially update user settings
//! - `PUT /api/users/:user_id/thresholds` - Update a single alert threshold
//! - `GET /stats` - Cache statistics per role
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
