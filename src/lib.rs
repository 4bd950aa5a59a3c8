//! EcoTracker - Air-quality monitoring backend
//!
//! Serves location-based air-quality readings, measurement history, and
//! per-user notification settings over HTTP, with a tiered caching layer
//! (bounded in-memory TTL caches plus a namespaced durable cache) in front
//! of the OpenAQ API.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod openaq;
pub mod settings;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_sweep_task;
