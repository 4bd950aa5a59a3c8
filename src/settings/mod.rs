//! Settings Module
//!
//! Per-user notification settings, read through the memory and durable
//! cache tiers with the settings store as the source of truth.

mod service;
mod store;

pub use service::SettingsService;
pub use store::{InMemorySettingsStore, SettingsStore};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// == User Settings ==
/// Notification preferences and alert thresholds for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    pub notifications_email: bool,
    pub notifications_push: bool,
    /// How often digests are sent (e.g. "daily")
    pub notification_frequency: String,
    pub default_location: String,
    /// Alert threshold per parameter id
    pub thresholds: HashMap<String, f64>,
}

impl Default for UserSettings {
    fn default() -> Self {
        let thresholds = [
            ("co2", 1000.0),
            ("pm25", 35.0),
            ("pm10", 50.0),
            ("voc", 100.0),
            ("temperature", 30.0),
            ("humidity", 70.0),
            ("pressure", 1030.0),
            ("o3", 70.0),
            ("no2", 100.0),
            ("so2", 75.0),
        ]
        .into_iter()
        .map(|(parameter, value)| (parameter.to_string(), value))
        .collect();

        Self {
            notifications_email: true,
            notifications_push: false,
            notification_frequency: "daily".to_string(),
            default_location: "moscow".to_string(),
            thresholds,
        }
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = UserSettings::default();

        assert!(settings.notifications_email);
        assert!(!settings.notifications_push);
        assert_eq!(settings.notification_frequency, "daily");
        assert_eq!(settings.thresholds.len(), 10);
        assert_eq!(settings.thresholds["pm25"], 35.0);
    }

    #[test]
    fn test_settings_roundtrip_through_json() {
        let settings = UserSettings::default();

        let json = serde_json::to_string(&settings).unwrap();
        let back: UserSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(back, settings);
    }
}
