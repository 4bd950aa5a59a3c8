//! API Handlers
//!
//! HTTP request handlers and the application state they share.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use futures::FutureExt;

use crate::cache::{
    generate_key, shared, CachedFetcher, DurableCache, MemoryCache, SharedCache,
    DURABLE_CACHE_PREFIX,
};
use crate::config::Config;
use crate::error::{ApiError, FetchError, Result};
use crate::models::{
    AirQualityQuery, CacheStatsResponse, HealthResponse, MeasurementsQuery,
    UpdateSettingsRequest, UpdateThresholdRequest,
};
use crate::openaq::{AirQualityData, Measurement, OpenAqClient};
use crate::settings::{InMemorySettingsStore, SettingsService, UserSettings};

// == App State ==
/// Application state shared across all handlers: the per-role caches, the
/// cached fetchers wrapping the OpenAQ client, and the settings service.
///
/// This is the composition root for the cache tiers; nothing else in the
/// crate holds module-level cache state.
#[derive(Clone)]
pub struct AppState {
    pub air_quality: Arc<CachedFetcher<AirQualityQuery, Vec<AirQualityData>, FetchError>>,
    pub measurements: Arc<CachedFetcher<MeasurementsQuery, Vec<Measurement>, FetchError>>,
    pub settings: Arc<SettingsService>,
    pub air_quality_cache: SharedCache<Vec<AirQualityData>>,
    pub measurements_cache: SharedCache<Vec<Measurement>>,
    pub settings_cache: SharedCache<UserSettings>,
    pub durable: Arc<DurableCache>,
}

impl AppState {
    /// Wires caches, fetchers, and the settings service from configuration.
    pub fn from_config(config: &Config) -> Self {
        let air_quality_cache = shared(MemoryCache::new(
            config.air_quality.max_entries,
            config.air_quality.ttl,
        ));
        let measurements_cache = shared(MemoryCache::new(
            config.measurements.max_entries,
            config.measurements.ttl,
        ));
        let settings_cache = shared(MemoryCache::new(
            config.user_settings.max_entries,
            config.user_settings.ttl,
        ));

        let durable = Arc::new(match &config.cache_dir {
            Some(dir) => DurableCache::new(
                crate::cache::FileStore::with_dir(dir.clone()),
                DURABLE_CACHE_PREFIX,
            ),
            None => DurableCache::open(DURABLE_CACHE_PREFIX),
        });

        let client = OpenAqClient::new(
            config.openaq_base_url.clone(),
            config.openaq_api_key.clone(),
        );

        let air_quality_client = client.clone();
        let air_quality = Arc::new(CachedFetcher::new(
            air_quality_cache.clone(),
            |query: &AirQualityQuery| {
                generate_key(
                    "air-quality",
                    &[
                        ("latitude", query.latitude.to_string()),
                        ("longitude", query.longitude.to_string()),
                        ("radius", query.radius.to_string()),
                    ],
                )
            },
            move |query: AirQualityQuery| {
                let client = air_quality_client.clone();
                async move {
                    client
                        .air_quality_by_location(query.latitude, query.longitude, query.radius)
                        .await
                }
                .boxed()
            },
            Some(config.air_quality.ttl),
        ));

        let measurements_client = client;
        let measurements = Arc::new(CachedFetcher::new(
            measurements_cache.clone(),
            |query: &MeasurementsQuery| {
                generate_key(
                    "measurements",
                    &[
                        ("parameter", query.parameter.clone()),
                        ("limit", query.limit.to_string()),
                    ],
                )
            },
            move |query: MeasurementsQuery| {
                let client = measurements_client.clone();
                async move {
                    client
                        .latest_measurements(&query.parameter, query.limit)
                        .await
                }
                .boxed()
            },
            Some(config.measurements.ttl),
        ));

        let settings = Arc::new(SettingsService::new(
            settings_cache.clone(),
            durable.clone(),
            Arc::new(InMemorySettingsStore::new()),
            config.durable_settings_ttl,
        ));

        Self {
            air_quality,
            measurements,
            settings,
            air_quality_cache,
            measurements_cache,
            settings_cache,
            durable,
        }
    }

    // == Sweep Expired ==
    /// Sweeps expired entries from every memory cache role, returning the
    /// total removed.
    pub async fn sweep_expired(&self) -> usize {
        let mut removed = 0;
        removed += self.air_quality_cache.write().await.sweep_expired();
        removed += self.measurements_cache.write().await.sweep_expired();
        removed += self.settings_cache.write().await.sweep_expired();
        removed
    }
}

// == Air Quality Handler ==
/// Handler for GET /api/air-quality
///
/// Returns stations near the requested coordinates, served through the
/// air-quality cache.
pub async fn air_quality_handler(
    State(state): State<AppState>,
    Query(query): Query<AirQualityQuery>,
) -> Result<Json<Vec<AirQualityData>>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let data = state.air_quality.call(query).await?;
    Ok(Json(data))
}

// == Measurements Handler ==
/// Handler for GET /api/measurements
///
/// Returns the latest measurements for one parameter, served through the
/// measurements cache.
pub async fn measurements_handler(
    State(state): State<AppState>,
    Query(query): Query<MeasurementsQuery>,
) -> Result<Json<Vec<Measurement>>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::InvalidRequest(error_msg));
    }

    let data = state.measurements.call(query).await?;
    Ok(Json(data))
}

// == Settings Handlers ==
/// Handler for GET /api/users/:user_id/settings
pub async fn get_settings_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserSettings>> {
    let settings = state.settings.load(&user_id).await?;
    Ok(Json(settings))
}

/// Handler for PUT /api/users/:user_id/settings
///
/// Applies a partial update on top of the user's current settings.
pub async fn update_settings_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<UpdateSettingsRequest>,
) -> Result<Json<UserSettings>> {
    let current = state.settings.load(&user_id).await?;
    let merged = update.apply(current);
    let saved = state.settings.save(&user_id, merged).await?;
    Ok(Json(saved))
}

/// Handler for PUT /api/users/:user_id/thresholds
pub async fn update_threshold_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(update): Json<UpdateThresholdRequest>,
) -> Result<Json<UserSettings>> {
    if update.parameter.is_empty() {
        return Err(ApiError::InvalidRequest(
            "Parameter cannot be empty".to_string(),
        ));
    }

    let saved = state
        .settings
        .update_threshold(&user_id, &update.parameter, update.value)
        .await?;
    Ok(Json(saved))
}

// == Stats Handler ==
/// Handler for GET /stats
///
/// Returns statistics for every cache role.
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    let air_quality = state.air_quality_cache.read().await.stats();
    let measurements = state.measurements_cache.read().await.stats();
    let user_settings = state.settings_cache.read().await.stats();

    Json(CacheStatsResponse {
        air_quality,
        measurements,
        user_settings,
        durable_cache_available: state.durable.is_available(),
    })
}

// == Health Handler ==
/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
