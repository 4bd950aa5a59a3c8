//! OpenAQ API Client
//!
//! Fetches station data and historical measurements from the OpenAQ v2 API
//! and reshapes the responses into domain types. Requests are best-effort:
//! a missing API key or a failed request falls back to synthetic demo data
//! rather than surfacing an error.

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;

use crate::error::FetchError;
use crate::openaq::demo::{demo_air_quality, demo_measurements};
use crate::openaq::{AirQualityData, Coordinates, Measurement, MeasurementReading};

/// Default base URL for the OpenAQ API.
pub const OPENAQ_API_BASE_URL: &str = "https://api.openaq.org/v2";

// == Response DTOs ==
#[derive(Debug, Deserialize)]
struct LocationsResponse {
    results: Vec<LocationRecord>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    name: String,
    city: Option<String>,
    country: Option<String>,
    coordinates: ApiCoordinates,
    #[serde(default)]
    parameters: Vec<ParameterRecord>,
}

#[derive(Debug, Deserialize)]
struct ApiCoordinates {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParameterRecord {
    parameter: String,
    last_value: f64,
    unit: String,
    last_updated: String,
}

#[derive(Debug, Deserialize)]
struct MeasurementsResponse {
    results: Vec<Measurement>,
}

// == OpenAQ Client ==
/// HTTP client for the OpenAQ API with synthetic-data fallback.
#[derive(Debug, Clone)]
pub struct OpenAqClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAqClient {
    // == Constructor ==
    /// Creates a client for the given base URL and optional API key.
    ///
    /// Without an API key every lookup serves demo data.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    // == Air Quality By Location ==
    /// Looks up stations near a coordinate and their latest readings.
    ///
    /// Falls back to synthetic data when no API key is configured or the
    /// upstream request fails; the returned error variant is reserved for
    /// conditions the fallback cannot absorb.
    pub async fn air_quality_by_location(
        &self,
        latitude: f64,
        longitude: f64,
        radius: u32,
    ) -> Result<Vec<AirQualityData>, FetchError> {
        let Some(api_key) = &self.api_key else {
            warn!("OpenAQ API key not configured, serving demo air-quality data");
            return Ok(demo_air_quality(latitude, longitude));
        };

        match self
            .locations_from_api(api_key, latitude, longitude, radius)
            .await
        {
            Ok(stations) => Ok(stations),
            Err(err) => {
                warn!("OpenAQ locations request failed ({}), serving demo data", err);
                Ok(demo_air_quality(latitude, longitude))
            }
        }
    }

    async fn locations_from_api(
        &self,
        api_key: &str,
        latitude: f64,
        longitude: f64,
        radius: u32,
    ) -> Result<Vec<AirQualityData>, FetchError> {
        let url = format!(
            "{}/locations?coordinates={},{}&radius={}&limit=10",
            self.base_url, latitude, longitude, radius
        );

        let body = self
            .http
            .get(&url)
            .header("X-API-Key", api_key)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: LocationsResponse = serde_json::from_str(&body)?;

        Ok(response
            .results
            .into_iter()
            .map(|location| AirQualityData {
                location: location.name,
                city: location.city.unwrap_or_else(|| "Unknown".to_string()),
                country: location.country.unwrap_or_else(|| "Unknown".to_string()),
                coordinates: Coordinates {
                    latitude: location.coordinates.latitude,
                    longitude: location.coordinates.longitude,
                },
                measurements: location
                    .parameters
                    .into_iter()
                    .map(|param| MeasurementReading {
                        parameter: param.parameter,
                        value: param.last_value,
                        unit: param.unit,
                        last_updated: param.last_updated,
                    })
                    .collect(),
            })
            .collect())
    }

    // == Latest Measurements ==
    /// Fetches the most recent measurements for one parameter, newest
    /// first. Same fallback behavior as the location lookup.
    pub async fn latest_measurements(
        &self,
        parameter: &str,
        limit: u32,
    ) -> Result<Vec<Measurement>, FetchError> {
        let Some(api_key) = &self.api_key else {
            warn!("OpenAQ API key not configured, serving demo measurements");
            return Ok(demo_measurements(parameter, limit));
        };

        match self.measurements_from_api(api_key, parameter, limit).await {
            Ok(measurements) => Ok(measurements),
            Err(err) => {
                warn!(
                    "OpenAQ measurements request failed ({}), serving demo data",
                    err
                );
                Ok(demo_measurements(parameter, limit))
            }
        }
    }

    async fn measurements_from_api(
        &self,
        api_key: &str,
        parameter: &str,
        limit: u32,
    ) -> Result<Vec<Measurement>, FetchError> {
        let url = format!(
            "{}/measurements?parameter={}&limit={}&sort=desc&order_by=datetime",
            self.base_url, parameter, limit
        );

        let body = self
            .http
            .get(&url)
            .header("X-API-Key", api_key)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let response: MeasurementsResponse = serde_json::from_str(&body)?;
        Ok(response.results)
    }
}
