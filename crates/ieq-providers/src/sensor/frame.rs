// ABOUTME: JSON frame format emitted by the sensor microcontroller over its serial link
// ABOUTME: Merges BME280 and SCD30 blocks into one reading; short lines are partial frames
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::sensor::MIN_FRAME_BYTES;
use crate::errors::{ProviderError, ProviderResult};
use crate::models::SensorReading;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

/// One line from the microcontroller
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct SensorFrame {
    #[serde(default)]
    device: Option<String>,
    #[serde(default)]
    location: Option<String>,
    data: Vec<SensorBlock>,
}

/// Values reported by one physical sensor
#[derive(Debug, Deserialize)]
#[serde(tag = "Sensor", content = "Value")]
enum SensorBlock {
    /// Bosch BME280 temperature, humidity and pressure sensor
    #[serde(rename = "BME280")]
    Bme280(Bme280Values),
    /// Sensirion SCD30 CO2 sensor with its own temperature and humidity
    #[serde(rename = "SCD30")]
    Scd30(Scd30Values),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Bme280Values {
    temperature: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Scd30Values {
    temperature: Option<f64>,
    humidity: Option<f64>,
    #[serde(rename = "CO2")]
    co2: Option<f64>,
}

/// Interpret one line from the sensor link
///
/// Lines shorter than a minimal frame are partial transmissions and yield
/// `Ok(None)`, as do frames lacking temperature, humidity or CO2. Temperature
/// and humidity come from the BME280 when present, otherwise from the SCD30.
///
/// # Errors
///
/// Returns `InvalidFrame` for malformed JSON or an unknown sensor type
pub fn parse_frame(
    line: &str,
    received_at: DateTime<Utc>,
) -> ProviderResult<Option<SensorReading>> {
    let line = line.trim();
    if line.len() < MIN_FRAME_BYTES {
        debug!(bytes = line.len(), "Partial sensor frame skipped");
        return Ok(None);
    }

    let frame: SensorFrame =
        serde_json::from_str(line).map_err(|e| ProviderError::InvalidFrame(e.to_string()))?;

    let mut bme = None;
    let mut scd = None;
    for block in frame.data {
        match block {
            SensorBlock::Bme280(values) => bme = Some(values),
            SensorBlock::Scd30(values) => scd = Some(values),
        }
    }

    let temperature = bme
        .as_ref()
        .and_then(|v| v.temperature)
        .or_else(|| scd.as_ref().and_then(|v| v.temperature));
    let humidity = bme
        .as_ref()
        .and_then(|v| v.humidity)
        .or_else(|| scd.as_ref().and_then(|v| v.humidity));
    let co2 = scd.as_ref().and_then(|v| v.co2);

    match (temperature, humidity, co2) {
        (Some(temperature), Some(humidity), Some(co2)) => Ok(Some(SensorReading {
            temperature,
            humidity,
            pressure: bme.and_then(|v| v.pressure),
            co2,
            received_at,
        })),
        _ => {
            debug!(
                device = frame.device.as_deref().unwrap_or("unknown"),
                location = frame.location.as_deref().unwrap_or("unknown"),
                has_temperature = temperature.is_some(),
                has_humidity = humidity.is_some(),
                has_co2 = co2.is_some(),
                "Incomplete sensor frame skipped"
            );
            Ok(None)
        }
    }
}
