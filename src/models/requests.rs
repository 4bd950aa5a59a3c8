//! Request DTOs for the HTTP API

use std::collections::HashMap;

use serde::Deserialize;

use crate::settings::UserSettings;

// == Air Quality Query ==
/// Query parameters for the location-based air-quality lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct AirQualityQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters
    #[serde(default = "default_radius")]
    pub radius: u32,
}

fn default_radius() -> u32 {
    10_000
}

impl AirQualityQuery {
    /// Returns an error message if the query is out of range, None if valid.
    pub fn validate(&self) -> Option<String> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Some("Latitude must be between -90 and 90".to_string());
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Some("Longitude must be between -180 and 180".to_string());
        }
        if self.radius == 0 {
            return Some("Radius must be positive".to_string());
        }
        None
    }
}

// == Measurements Query ==
/// Query parameters for the latest-measurements lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct MeasurementsQuery {
    /// Parameter id (e.g. "pm25")
    pub parameter: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    100
}

impl MeasurementsQuery {
    pub fn validate(&self) -> Option<String> {
        if self.parameter.is_empty() {
            return Some("Parameter cannot be empty".to_string());
        }
        if self.limit == 0 || self.limit > 1000 {
            return Some("Limit must be between 1 and 1000".to_string());
        }
        None
    }
}

// == Update Settings Request ==
/// Partial settings update; absent fields keep their current values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettingsRequest {
    pub notifications_email: Option<bool>,
    pub notifications_push: Option<bool>,
    pub notification_frequency: Option<String>,
    pub default_location: Option<String>,
    pub thresholds: Option<HashMap<String, f64>>,
}

impl UpdateSettingsRequest {
    /// Merges this partial update onto existing settings.
    pub fn apply(self, mut base: UserSettings) -> UserSettings {
        if let Some(notifications_email) = self.notifications_email {
            base.notifications_email = notifications_email;
        }
        if let Some(notifications_push) = self.notifications_push {
            base.notifications_push = notifications_push;
        }
        if let Some(notification_frequency) = self.notification_frequency {
            base.notification_frequency = notification_frequency;
        }
        if let Some(default_location) = self.default_location {
            base.default_location = default_location;
        }
        if let Some(thresholds) = self.thresholds {
            base.thresholds = thresholds;
        }
        base
    }
}

// == Update Threshold Request ==
/// Body for updating a single alert threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateThresholdRequest {
    pub parameter: String,
    pub value: f64,
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_quality_query_defaults() {
        let query: AirQualityQuery =
            serde_json::from_str(r#"{"latitude": 55.75, "longitude": 37.62}"#).unwrap();

        assert_eq!(query.radius, 10_000);
        assert!(query.validate().is_none());
    }

    #[test]
    fn test_air_quality_query_rejects_bad_latitude() {
        let query = AirQualityQuery {
            latitude: 95.0,
            longitude: 0.0,
            radius: 1000,
        };

        assert!(query.validate().is_some());
    }

    #[test]
    fn test_measurements_query_rejects_huge_limit() {
        let query = MeasurementsQuery {
            parameter: "pm25".to_string(),
            limit: 5000,
        };

        assert!(query.validate().is_some());
    }

    #[test]
    fn test_partial_settings_update_merges() {
        let update: UpdateSettingsRequest =
            serde_json::from_str(r#"{"notifications_push": true}"#).unwrap();

        let merged = update.apply(UserSettings::default());

        assert!(merged.notifications_push);
        // Untouched fields keep their defaults
        assert!(merged.notifications_email);
        assert_eq!(merged.notification_frequency, "daily");
    }

    #[test]
    fn test_full_settings_update_replaces_thresholds() {
        let update: UpdateSettingsRequest = serde_json::from_str(
            r#"{"thresholds": {"pm25": 12.0}}"#,
        )
        .unwrap();

        let merged = update.apply(UserSettings::default());

        assert_eq!(merged.thresholds.len(), 1);
        assert_eq!(merged.thresholds["pm25"], 12.0);
    }
}
