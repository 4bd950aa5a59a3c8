//! Configuration Module
//!
//! Handles loading and managing service configuration from environment
//! variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::openaq::OPENAQ_API_BASE_URL;

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

// == Cache Role Config ==
/// Capacity and TTL for one memory cache role.
#[derive(Debug, Clone)]
pub struct CacheRoleConfig {
    pub max_entries: usize,
    pub ttl: Duration,
}

// == Config ==
/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible
/// defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Interval between background cache sweeps
    pub sweep_interval: Duration,
    /// Air-quality lookups: few stations per area, refreshed rarely
    pub air_quality: CacheRoleConfig,
    /// Measurement series: more keys, shorter freshness window
    pub measurements: CacheRoleConfig,
    /// Per-user settings: small population, long-lived
    pub user_settings: CacheRoleConfig,
    /// TTL for settings persisted in the durable tier
    pub durable_settings_ttl: Duration,
    /// Base URL of the OpenAQ API
    pub openaq_base_url: String,
    /// OpenAQ API key; demo data is served without one
    pub openaq_api_key: Option<String>,
    /// Durable cache directory override; XDG cache dir when unset
    pub cache_dir: Option<PathBuf>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `SWEEP_INTERVAL` - Seconds between cache sweeps (default: 300)
    /// - `AIR_QUALITY_MAX_ENTRIES` / `AIR_QUALITY_TTL` - default: 50 / 600 s
    /// - `MEASUREMENTS_MAX_ENTRIES` / `MEASUREMENTS_TTL` - default: 100 / 300 s
    /// - `USER_SETTINGS_MAX_ENTRIES` / `USER_SETTINGS_TTL` - default: 20 / 1800 s
    /// - `DURABLE_SETTINGS_TTL` - Seconds settings stay in the durable tier (default: 1800)
    /// - `OPENAQ_BASE_URL` - OpenAQ API base URL
    /// - `OPENAQ_API_KEY` - API key; unset means demo data
    /// - `CACHE_DIR` - Durable cache directory override
    pub fn from_env() -> Self {
        Self {
            server_port: env_parse("SERVER_PORT", 3000),
            sweep_interval: Duration::from_secs(env_parse("SWEEP_INTERVAL", 300)),
            air_quality: CacheRoleConfig {
                max_entries: env_parse("AIR_QUALITY_MAX_ENTRIES", 50),
                ttl: Duration::from_secs(env_parse("AIR_QUALITY_TTL", 600)),
            },
            measurements: CacheRoleConfig {
                max_entries: env_parse("MEASUREMENTS_MAX_ENTRIES", 100),
                ttl: Duration::from_secs(env_parse("MEASUREMENTS_TTL", 300)),
            },
            user_settings: CacheRoleConfig {
                max_entries: env_parse("USER_SETTINGS_MAX_ENTRIES", 20),
                ttl: Duration::from_secs(env_parse("USER_SETTINGS_TTL", 1800)),
            },
            durable_settings_ttl: Duration::from_secs(env_parse("DURABLE_SETTINGS_TTL", 1800)),
            openaq_base_url: env::var("OPENAQ_BASE_URL")
                .unwrap_or_else(|_| OPENAQ_API_BASE_URL.to_string()),
            openaq_api_key: env::var("OPENAQ_API_KEY").ok(),
            cache_dir: env::var("CACHE_DIR").ok().map(PathBuf::from),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            sweep_interval: Duration::from_secs(300),
            air_quality: CacheRoleConfig {
                max_entries: 50,
                ttl: Duration::from_secs(600),
            },
            measurements: CacheRoleConfig {
                max_entries: 100,
                ttl: Duration::from_secs(300),
            },
            user_settings: CacheRoleConfig {
                max_entries: 20,
                ttl: Duration::from_secs(1800),
            },
            durable_settings_ttl: Duration::from_secs(1800),
            openaq_base_url: OPENAQ_API_BASE_URL.to_string(),
            openaq_api_key: None,
            cache_dir: None,
        }
    }
}
