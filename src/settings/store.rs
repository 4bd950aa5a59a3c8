//! Settings Store
//!
//! Source-of-truth seam for user settings. The trait hides whatever
//! database backs the dashboard; the in-memory implementation serves
//! single-node deployments and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::SettingsError;
use crate::settings::UserSettings;

// == Settings Store ==
/// Persistent source of truth for user settings.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Loads the stored settings for a user, `None` when the user has
    /// never saved any.
    async fn load(&self, user_id: &str) -> Result<Option<UserSettings>, SettingsError>;

    /// Persists the settings for a user, overwriting any previous row.
    async fn save(&self, user_id: &str, settings: &UserSettings) -> Result<(), SettingsError>;
}

// == In-Memory Store ==
/// Process-local settings store.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    rows: RwLock<HashMap<String, UserSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(&self, user_id: &str) -> Result<Option<UserSettings>, SettingsError> {
        Ok(self.rows.read().await.get(user_id).cloned())
    }

    async fn save(&self, user_id: &str, settings: &UserSettings) -> Result<(), SettingsError> {
        self.rows
            .write()
            .await
            .insert(user_id.to_string(), settings.clone());
        Ok(())
    }
}
