// ABOUTME: Shared constants for CO2 assessment, thermal comfort defaults, and weather access
// ABOUTME: Values come from EN 16798-1, ISO 7730, ASHRAE 55 and the Open-Meteo API documentation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Constants organized by domain

/// Service identifiers used in structured logs
pub mod service_names {
    /// Name of the advisor service
    pub const IEQ_ADVISOR: &str = "ieq-advisor";
    /// Name used for the Open-Meteo collaborator in errors and logs
    pub const OPEN_METEO: &str = "Open-Meteo";
    /// Name used for the sensor collaborator in errors and logs
    pub const SENSOR_LINK: &str = "sensor-link";
}

/// CO2 reference values
pub mod co2 {
    /// Typical outdoor CO2 concentration used when no outdoor measurement exists (ppm)
    pub const DEFAULT_OUTDOOR_PPM: f64 = 400.0;
}

/// Thermal comfort defaults
///
/// References:
/// - ISO 7730:2005, Annex B (metabolic rates)
/// - EN 16798-1:2019, Table B.4 (PMV category bands)
pub mod comfort {
    /// Seated office work (ISO 7730)
    pub const SEATED_OFFICE_MET: f64 = 1.2;

    /// Slow walking at about 2 km/h
    pub const SLOW_WALKING_MET: f64 = 1.9;

    /// Category I acceptance band for |PMV| (EN 16798-1)
    pub const CATEGORY_I_PMV_BAND: f64 = 0.2;

    /// Increment of extra outdoor insulation per search iteration (clo)
    pub const OUTFIT_CLO_STEP: f64 = 0.05;

    /// Smoothing factor of the running mean outdoor temperature
    pub const RUNNING_MEAN_ALPHA: f64 = 0.8;

    /// Number of past daily means feeding the running mean
    pub const RUNNING_MEAN_DAYS: usize = 7;
}

/// Weather API defaults
pub mod weather {
    /// Open-Meteo forecast endpoint
    pub const OPEN_METEO_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

    /// Default latitude (Aachen, DE)
    pub const DEFAULT_LATITUDE: f64 = 50.7766;

    /// Default longitude (Aachen, DE)
    pub const DEFAULT_LONGITUDE: f64 = 6.0834;

    /// Default IANA timezone for daily aggregation
    pub const DEFAULT_TIMEZONE: &str = "Europe/Berlin";

    /// Hour of the morning sample used for clothing prediction
    pub const CLOTHING_SAMPLE_HOUR: u32 = 6;

    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Connect timeout in seconds
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;

    /// Retries after the first failed attempt
    pub const MAX_RETRIES: u32 = 5;

    /// Base backoff between retries in milliseconds (doubled on each retry)
    pub const RETRY_BACKOFF_MS: u64 = 200;
}

/// Sensor link framing
pub mod sensor {
    /// Lines shorter than this are partial frames from the microcontroller
    pub const MIN_FRAME_BYTES: usize = 80;
}
