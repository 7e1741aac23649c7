// ABOUTME: Plain data models shared between collaborators and the evaluation engine
// ABOUTME: Sensor readings from the room and aggregated outdoor weather conditions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Core data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One complete indoor sample from the sensor link
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Barometric pressure in hPa, when a pressure sensor is fitted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// CO2 concentration in ppm
    pub co2: f64,
    /// When the host received the sample
    pub received_at: DateTime<Utc>,
}

/// Aggregated outdoor conditions for a day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutdoorConditions {
    /// Mean air temperature in °C
    pub temperature: f64,
    /// Mean relative humidity in %
    pub relative_humidity: f64,
}
