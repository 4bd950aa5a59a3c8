//! Settings Service
//!
//! Reads user settings through two cache tiers before hitting the store,
//! and writes through all three on save.

use std::sync::Arc;
use std::time::Duration;

use crate::cache::{generate_key, DurableCache, SharedCache};
use crate::error::SettingsError;
use crate::settings::{SettingsStore, UserSettings};

// == Settings Service ==
/// Tiered read/write access to per-user settings.
///
/// Lookup order: memory cache, durable cache (promoted into memory on a
/// hit), then the store. Users without a stored row get the defaults.
pub struct SettingsService {
    memory: SharedCache<UserSettings>,
    durable: Arc<DurableCache>,
    store: Arc<dyn SettingsStore>,
    durable_ttl: Duration,
}

impl SettingsService {
    // == Constructor ==
    pub fn new(
        memory: SharedCache<UserSettings>,
        durable: Arc<DurableCache>,
        store: Arc<dyn SettingsStore>,
        durable_ttl: Duration,
    ) -> Self {
        Self {
            memory,
            durable,
            store,
            durable_ttl,
        }
    }

    fn cache_key(user_id: &str) -> String {
        generate_key("user-settings", &[("user_id", user_id.to_string())])
    }

    // == Load ==
    /// Returns the user's settings, consulting memory, then the durable
    /// tier, then the store.
    pub async fn load(&self, user_id: &str) -> Result<UserSettings, SettingsError> {
        let key = Self::cache_key(user_id);

        if let Some(hit) = self.memory.write().await.get(&key) {
            return Ok(hit);
        }

        if let Some(hit) = self.durable.get::<UserSettings>(&key) {
            self.memory.write().await.set(&key, hit.clone(), None);
            return Ok(hit);
        }

        let settings = self.store.load(user_id).await?.unwrap_or_default();

        self.memory.write().await.set(&key, settings.clone(), None);
        self.durable.set(&key, &settings, self.durable_ttl);

        Ok(settings)
    }

    // == Save ==
    /// Persists settings to the store, then writes through both caches.
    ///
    /// A failed store write caches nothing, so a later `load` retries the
    /// store rather than serving an unconfirmed value.
    pub async fn save(
        &self,
        user_id: &str,
        settings: UserSettings,
    ) -> Result<UserSettings, SettingsError> {
        self.store.save(user_id, &settings).await?;

        let key = Self::cache_key(user_id);
        self.memory.write().await.set(&key, settings.clone(), None);
        self.durable.set(&key, &settings, self.durable_ttl);

        Ok(settings)
    }

    // == Update Threshold ==
    /// Updates a single alert threshold, persisting the merged settings.
    pub async fn update_threshold(
        &self,
        user_id: &str,
        parameter: &str,
        value: f64,
    ) -> Result<UserSettings, SettingsError> {
        let mut settings = self.load(user_id).await?;
        settings.thresholds.insert(parameter.to_string(), value);
        self.save(user_id, settings).await
    }

    // == Invalidate ==
    /// Drops the user's settings from both cache tiers.
    pub async fn invalidate(&self, user_id: &str) {
        let key = Self::cache_key(user_id);
        self.memory.write().await.delete(&key);
        self.durable.delete(&key);
    }
}
