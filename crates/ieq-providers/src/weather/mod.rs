// ABOUTME: Outdoor weather collaborator contract used by the clothing cache and comfort models
// ABOUTME: Morning temperature, daily mean history, and today's averages
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Outdoor weather sources

mod open_meteo;

pub use open_meteo::{HourlyForecast, HourlySample, OpenMeteoConfig, OpenMeteoProvider};

use crate::errors::AppResult;
use crate::models::OutdoorConditions;
use async_trait::async_trait;

/// Source of outdoor weather for the configured location
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Outdoor air temperature at 06:00 today (°C)
    async fn outdoor_temperature_at_6am(&self) -> AppResult<f64>;

    /// Daily mean outdoor temperatures of the `days` days before today (°C),
    /// most recent first
    async fn daily_mean_history(&self, days: usize) -> AppResult<Vec<f64>>;

    /// Today's mean outdoor temperature and relative humidity
    async fn today_average(&self) -> AppResult<OutdoorConditions>;
}
