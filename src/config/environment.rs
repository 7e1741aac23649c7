// ABOUTME: Environment configuration for location, weather API, evaluation defaults and outfit search
// ABOUTME: Parses variables with documented defaults; the outfit search bound has no default
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration
//!
//! | Variable | Default |
//! |---|---|
//! | `IEQ_LATITUDE` | 50.7766 |
//! | `IEQ_LONGITUDE` | 6.0834 |
//! | `IEQ_TIMEZONE` | `Europe/Berlin` |
//! | `OPEN_METEO_BASE_URL` | `https://api.open-meteo.com/v1/forecast` |
//! | `WEATHER_REQUEST_TIMEOUT_SECS` | 30 |
//! | `WEATHER_MAX_RETRIES` | 5 |
//! | `WEATHER_RETRY_BACKOFF_MS` | 200 |
//! | `IEQ_IAQ_STANDARD` | `EN` |
//! | `IEQ_CO2_OUTDOOR_PPM` | 400 |
//! | `IEQ_POPULATION_TYPE` | `A` |
//! | `IEQ_METABOLIC_RATE` | 1.2 |
//! | `IEQ_AIR_SPEED` | 0.0 |
//! | `IEQ_LIMIT_INPUTS` | true |
//! | `IEQ_OUTFIT_MAX_ITERATIONS` | required |

use crate::constants::co2::DEFAULT_OUTDOOR_PPM;
use crate::constants::weather::{
    DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TIMEZONE, MAX_RETRIES, OPEN_METEO_FORECAST_URL,
    REQUEST_TIMEOUT_SECS, RETRY_BACKOFF_MS,
};
use crate::errors::{AppError, AppResult};
use ieq_intelligence::{ComfortAnalysisConfig, IaqStandard, PopulationType};
use ieq_providers::{OpenMeteoConfig, RetryBackoffConfig};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use tracing::info;

/// Environment variable names
pub mod keys {
    /// Latitude of the monitored building
    pub const LATITUDE: &str = "IEQ_LATITUDE";
    /// Longitude of the monitored building
    pub const LONGITUDE: &str = "IEQ_LONGITUDE";
    /// IANA timezone of the monitored building
    pub const TIMEZONE: &str = "IEQ_TIMEZONE";
    /// Weather API endpoint
    pub const OPEN_METEO_BASE_URL: &str = "OPEN_METEO_BASE_URL";
    /// Weather request timeout
    pub const WEATHER_REQUEST_TIMEOUT_SECS: &str = "WEATHER_REQUEST_TIMEOUT_SECS";
    /// Weather retries after the first attempt
    pub const WEATHER_MAX_RETRIES: &str = "WEATHER_MAX_RETRIES";
    /// Base backoff between weather retries
    pub const WEATHER_RETRY_BACKOFF_MS: &str = "WEATHER_RETRY_BACKOFF_MS";
    /// IAQ standard used for live readings
    pub const IAQ_STANDARD: &str = "IEQ_IAQ_STANDARD";
    /// Outdoor CO2 reference
    pub const CO2_OUTDOOR_PPM: &str = "IEQ_CO2_OUTDOOR_PPM";
    /// Indoor ensemble catalog
    pub const POPULATION_TYPE: &str = "IEQ_POPULATION_TYPE";
    /// Indoor metabolic rate
    pub const METABOLIC_RATE: &str = "IEQ_METABOLIC_RATE";
    /// Indoor air speed
    pub const AIR_SPEED: &str = "IEQ_AIR_SPEED";
    /// Enforce ISO 7730 applicability ranges indoors
    pub const LIMIT_INPUTS: &str = "IEQ_LIMIT_INPUTS";
    /// Iteration bound of the outfit search
    pub const OUTFIT_MAX_ITERATIONS: &str = "IEQ_OUTFIT_MAX_ITERATIONS";
}

/// Settings for evaluating live readings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluationConfig {
    /// Standard for IAQ classification
    pub iaq_standard: IaqStandard,
    /// Outdoor CO2 concentration (ppm)
    pub co2_outdoor_ppm: f64,
    /// Indoor ensemble catalog for suggestions
    pub population: PopulationType,
    /// Indoor air speed (m/s)
    pub air_speed: f64,
    /// Reject indoor inputs outside the PMV model's applicability ranges
    pub limit_inputs: bool,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            iaq_standard: IaqStandard::default(),
            co2_outdoor_ppm: DEFAULT_OUTDOOR_PPM,
            population: PopulationType::default(),
            air_speed: 0.0,
            limit_inputs: true,
        }
    }
}

/// Bound on the outfit search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutfitSearchConfig {
    /// Largest number of insulation increments tried before giving up
    pub max_iterations: u32,
}

/// Complete runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    /// Weather API location and transport
    pub weather: OpenMeteoConfig,
    /// Live evaluation settings
    pub evaluation: EvaluationConfig,
    /// Comfort model parameters
    pub comfort: ComfortAnalysisConfig,
    /// Outfit search bound
    pub outfit: OutfitSearchConfig,
}

impl AdvisorConfig {
    /// Load configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` when `IEQ_OUTFIT_MAX_ITERATIONS` is unset and
    /// `ConfigInvalid` when any variable cannot be parsed
    pub fn from_env() -> AppResult<Self> {
        Self::from_env_with_max_iterations(None)
    }

    /// Load configuration from the process environment, letting a command-line
    /// value take precedence over `IEQ_OUTFIT_MAX_ITERATIONS`
    ///
    /// # Errors
    ///
    /// Same as [`AdvisorConfig::from_env`]
    pub fn from_env_with_max_iterations(max_iterations: Option<u32>) -> AppResult<Self> {
        let config = Self::from_lookup(|key| match max_iterations {
            Some(value) if key == keys::OUTFIT_MAX_ITERATIONS => Some(value.to_string()),
            _ => env::var(key).ok(),
        })?;
        config.log_summary();
        Ok(config)
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Same as [`AdvisorConfig::from_env`]
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let weather = OpenMeteoConfig {
            base_url: env_var_or(&lookup, keys::OPEN_METEO_BASE_URL, OPEN_METEO_FORECAST_URL),
            latitude: parse_or(&lookup, keys::LATITUDE, DEFAULT_LATITUDE)?,
            longitude: parse_or(&lookup, keys::LONGITUDE, DEFAULT_LONGITUDE)?,
            timezone: env_var_or(&lookup, keys::TIMEZONE, DEFAULT_TIMEZONE),
            request_timeout_secs: parse_or(
                &lookup,
                keys::WEATHER_REQUEST_TIMEOUT_SECS,
                REQUEST_TIMEOUT_SECS,
            )?,
            retry: RetryBackoffConfig {
                max_retries: parse_or(&lookup, keys::WEATHER_MAX_RETRIES, MAX_RETRIES)?,
                base_delay_ms: parse_or(&lookup, keys::WEATHER_RETRY_BACKOFF_MS, RETRY_BACKOFF_MS)?,
            },
        };
        if !(-90.0..=90.0).contains(&weather.latitude) {
            return Err(invalid(keys::LATITUDE, weather.latitude, "must be within [-90, 90]"));
        }
        if !(-180.0..=180.0).contains(&weather.longitude) {
            return Err(invalid(
                keys::LONGITUDE,
                weather.longitude,
                "must be within [-180, 180]",
            ));
        }

        let evaluation = EvaluationConfig {
            iaq_standard: parse_or(&lookup, keys::IAQ_STANDARD, IaqStandard::default())?,
            co2_outdoor_ppm: parse_or(&lookup, keys::CO2_OUTDOOR_PPM, DEFAULT_OUTDOOR_PPM)?,
            population: parse_or(&lookup, keys::POPULATION_TYPE, PopulationType::default())?,
            air_speed: parse_or(&lookup, keys::AIR_SPEED, 0.0)?,
            limit_inputs: parse_bool_or(&lookup, keys::LIMIT_INPUTS, true)?,
        };
        if !evaluation.co2_outdoor_ppm.is_finite() || evaluation.co2_outdoor_ppm < 0.0 {
            return Err(invalid(
                keys::CO2_OUTDOOR_PPM,
                evaluation.co2_outdoor_ppm,
                "must be a non-negative concentration",
            ));
        }
        if !evaluation.air_speed.is_finite() || evaluation.air_speed < 0.0 {
            return Err(invalid(
                keys::AIR_SPEED,
                evaluation.air_speed,
                "must be a non-negative speed",
            ));
        }

        let comfort = ComfortAnalysisConfig {
            metabolic_rate: parse_or(
                &lookup,
                keys::METABOLIC_RATE,
                ComfortAnalysisConfig::default().metabolic_rate,
            )?,
            ..ComfortAnalysisConfig::default()
        };
        comfort.validate()?;

        let max_iterations: u32 = parse_required(&lookup, keys::OUTFIT_MAX_ITERATIONS)?;
        if max_iterations == 0 {
            return Err(invalid(
                keys::OUTFIT_MAX_ITERATIONS,
                max_iterations,
                "must be at least 1",
            ));
        }

        Ok(Self {
            weather,
            evaluation,
            comfort,
            outfit: OutfitSearchConfig { max_iterations },
        })
    }

    fn log_summary(&self) {
        info!(
            latitude = self.weather.latitude,
            longitude = self.weather.longitude,
            timezone = %self.weather.timezone,
            iaq_standard = %self.evaluation.iaq_standard,
            population = %self.evaluation.population,
            metabolic_rate = self.comfort.metabolic_rate,
            outfit_max_iterations = self.outfit.max_iterations,
            "Configuration loaded"
        );
    }
}

/// Get environment variable or default value
fn env_var_or<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| default.to_owned())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    lookup(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_required<F, T>(lookup: &F, key: &str) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let raw = lookup(key).ok_or_else(|| AppError::config_missing(key))?;
    parse_value(key, &raw)
}

fn parse_value<T>(key: &str, raw: &str) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::config_invalid(format!("{key}='{raw}' is invalid: {e}")))
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> AppResult<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::config_invalid(format!(
            "{key}='{raw}' is invalid: expected true or false"
        ))),
    }
}

fn invalid(key: &str, value: impl Display, reason: &str) -> AppError {
    AppError::config_invalid(format!("{key}='{value}' is invalid: {reason}"))
}
