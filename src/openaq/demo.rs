//! Synthetic Demo Data
//!
//! Generates plausible air-quality readings when the OpenAQ API is not
//! reachable or no API key is configured.

use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;

use crate::openaq::{
    AirQualityData, Coordinates, Measurement, MeasurementDate, MeasurementReading,
};

/// Measurement unit for a known parameter id.
pub fn parameter_unit(parameter: &str) -> &'static str {
    match parameter {
        "pm25" | "pm10" => "µg/m³",
        "co2" => "ppm",
        "no2" | "o3" | "so2" | "voc" => "ppb",
        "temperature" => "°C",
        "humidity" => "%",
        "pressure" => "hPa",
        _ => "unit",
    }
}

/// Builds a single synthetic station near the requested coordinates.
pub fn demo_air_quality(latitude: f64, longitude: f64) -> Vec<AirQualityData> {
    let mut rng = rand::thread_rng();
    let now = Utc::now().to_rfc3339();

    let ranges: &[(&str, f64, f64)] = &[
        ("pm25", 10.0, 60.0),
        ("pm10", 20.0, 100.0),
        ("co2", 400.0, 600.0),
        ("no2", 10.0, 60.0),
        ("o3", 20.0, 80.0),
        ("so2", 5.0, 35.0),
    ];

    let measurements = ranges
        .iter()
        .map(|(parameter, low, high)| MeasurementReading {
            parameter: parameter.to_string(),
            value: rng.gen_range(*low..*high),
            unit: parameter_unit(parameter).to_string(),
            last_updated: now.clone(),
        })
        .collect();

    vec![AirQualityData {
        location: format!("Station {:.2}, {:.2}", latitude, longitude),
        city: "Demo City".to_string(),
        country: "Demo".to_string(),
        coordinates: Coordinates {
            latitude,
            longitude,
        },
        measurements,
    }]
}

/// Builds `limit` synthetic measurements for one parameter, one per hour
/// going back from now.
pub fn demo_measurements(parameter: &str, limit: u32) -> Vec<Measurement> {
    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let unit = parameter_unit(parameter);

    (0..limit)
        .map(|hour| {
            let timestamp = now - ChronoDuration::hours(hour as i64);
            Measurement {
                parameter: parameter.to_string(),
                value: rng.gen_range(10.0..110.0),
                unit: unit.to_string(),
                date: MeasurementDate {
                    utc: timestamp.to_rfc3339(),
                },
                location: "Demo Station".to_string(),
                city: "Demo City".to_string(),
                country: "Demo".to_string(),
            }
        })
        .collect()
}
