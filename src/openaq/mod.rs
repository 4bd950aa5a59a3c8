//! OpenAQ Module
//!
//! Client for the OpenAQ air-quality API plus the domain types its
//! responses are reshaped into. When no API key is configured or a request
//! fails, synthetic demo readings are generated instead so the service
//! stays usable offline.

mod client;
mod demo;

pub use client::{OpenAqClient, OPENAQ_API_BASE_URL};
pub use demo::{demo_air_quality, demo_measurements, parameter_unit};

use serde::{Deserialize, Serialize};

// == Domain Types ==
/// Geographic position of a monitoring station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One reading reported by a station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementReading {
    /// Parameter id (e.g. "pm25")
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    /// RFC 3339 timestamp of the reading
    pub last_updated: String,
}

/// Air-quality snapshot for one monitoring station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityData {
    /// Station name
    pub location: String,
    pub city: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub measurements: Vec<MeasurementReading>,
}

/// Timestamp envelope used by the measurements feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementDate {
    pub utc: String,
}

/// A single historical measurement for one parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub parameter: String,
    pub value: f64,
    pub unit: String,
    pub date: MeasurementDate,
    pub location: String,
    pub city: String,
    pub country: String,
}
