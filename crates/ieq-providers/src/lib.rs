// ABOUTME: External collaborators of the IEQ advisor: weather, sensors, and display output
// ABOUTME: Async traits plus the Open-Meteo client, the serial frame reader, and a console sink
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! Collaborator implementations and their contracts.
//!
//! The evaluation engine depends only on the traits declared here; every
//! network and device access of the workspace lives in this crate.

// Re-export core modules so provider files can keep `use crate::constants::*` etc.
pub use ieq_core::constants;
pub use ieq_core::models;

/// Display sinks for formatted messages
pub mod display;
/// Collaborator error types, including the re-exported core errors
pub mod errors;
/// HTTP client construction
pub mod http_client;
/// Retry with exponential backoff
pub mod retry;
/// Indoor sensor sources
pub mod sensor;
/// Outdoor weather providers
pub mod weather;

pub use display::{ConsoleDisplay, DisplaySink};
pub use errors::{ProviderError, ProviderResult};
pub use retry::{with_retry, RetryBackoffConfig};
pub use sensor::{parse_frame, LineSensorSource, SensorSource};
pub use weather::{
    HourlyForecast, HourlySample, OpenMeteoConfig, OpenMeteoProvider, WeatherProvider,
};
