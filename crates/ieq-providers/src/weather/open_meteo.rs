// ABOUTME: Open-Meteo forecast API client for hourly outdoor temperature and humidity
// ABOUTME: Pure reducers turn the hourly series into morning, daily-mean, and today's values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Open-Meteo weather provider
//!
//! Hourly timestamps come back in local time of the requested timezone as
//! `YYYY-MM-DDTHH:MM`. Every request asks for one forecast day, so the latest
//! date in a response is "today" at the configured location.

use super::WeatherProvider;
use crate::constants::service_names::OPEN_METEO;
use crate::constants::weather::{
    CLOTHING_SAMPLE_HOUR, DEFAULT_LATITUDE, DEFAULT_LONGITUDE, DEFAULT_TIMEZONE,
    OPEN_METEO_FORECAST_URL, REQUEST_TIMEOUT_SECS,
};
use crate::errors::{AppResult, ProviderError, ProviderResult};
use crate::http_client::create_client_with_timeout;
use crate::models::OutdoorConditions;
use crate::retry::{with_retry, RetryBackoffConfig};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Timelike};
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, info};

const HOURLY_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
/// Error bodies are cut to this many characters
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Location and transport settings
#[derive(Debug, Clone, PartialEq)]
pub struct OpenMeteoConfig {
    /// Forecast endpoint
    pub base_url: String,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// IANA timezone used for local hours and daily aggregation
    pub timezone: String,
    /// Request timeout in seconds
    pub request_timeout_secs: u64,
    /// Retry policy for transient failures
    pub retry: RetryBackoffConfig,
}

impl Default for OpenMeteoConfig {
    fn default() -> Self {
        Self {
            base_url: OPEN_METEO_FORECAST_URL.to_owned(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            timezone: DEFAULT_TIMEZONE.to_owned(),
            request_timeout_secs: REQUEST_TIMEOUT_SECS,
            retry: RetryBackoffConfig::default(),
        }
    }
}

/// Open-Meteo forecast response, reduced to what is requested
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyPayload>,
}

/// Hourly arrays, index-aligned with `time`
#[derive(Debug, Deserialize)]
struct HourlyPayload {
    time: Vec<String>,
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    relative_humidity_2m: Option<Vec<Option<f64>>>,
}

/// One hour of outdoor data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlySample {
    /// Local time at the location
    pub time: NaiveDateTime,
    /// Air temperature at 2 m (°C); missing hours are `None`
    pub temperature: Option<f64>,
    /// Relative humidity at 2 m (%); `None` when missing or not requested
    pub relative_humidity: Option<f64>,
}

/// Parsed hourly series in chronological order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourlyForecast {
    samples: Vec<HourlySample>,
}

impl HourlyForecast {
    /// Parse a forecast response body
    ///
    /// # Errors
    ///
    /// Returns `MalformedResponse` when the body is not a forecast with an
    /// `hourly` block of index-aligned arrays
    pub fn from_json(body: &str) -> ProviderResult<Self> {
        let response: ForecastResponse =
            serde_json::from_str(body).map_err(|e| malformed(e.to_string()))?;
        let hourly = response
            .hourly
            .ok_or_else(|| malformed("missing 'hourly' block"))?;

        if hourly.temperature_2m.len() != hourly.time.len() {
            return Err(malformed(format!(
                "{} timestamps but {} temperatures",
                hourly.time.len(),
                hourly.temperature_2m.len()
            )));
        }
        if let Some(humidity) = &hourly.relative_humidity_2m {
            if humidity.len() != hourly.time.len() {
                return Err(malformed(format!(
                    "{} timestamps but {} humidity values",
                    hourly.time.len(),
                    humidity.len()
                )));
            }
        }

        let mut samples = hourly
            .time
            .iter()
            .enumerate()
            .map(|(i, stamp)| {
                let time = NaiveDateTime::parse_from_str(stamp, HOURLY_TIME_FORMAT)
                    .map_err(|e| malformed(format!("bad timestamp '{stamp}': {e}")))?;
                Ok(HourlySample {
                    time,
                    temperature: hourly.temperature_2m[i],
                    relative_humidity: hourly
                        .relative_humidity_2m
                        .as_ref()
                        .and_then(|values| values[i]),
                })
            })
            .collect::<ProviderResult<Vec<_>>>()?;
        samples.sort_by_key(|sample| sample.time);
        Ok(Self { samples })
    }

    /// Build from already parsed samples
    #[must_use]
    pub fn from_samples(mut samples: Vec<HourlySample>) -> Self {
        samples.sort_by_key(|sample| sample.time);
        Self { samples }
    }

    /// Latest local date in the series
    #[must_use]
    pub fn today(&self) -> Option<NaiveDate> {
        self.samples.last().map(|sample| sample.time.date())
    }

    /// Temperature at `hour`:00 of the latest date
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` when the hour is absent or has no value
    pub fn temperature_at_hour_today(&self, hour: u32) -> ProviderResult<f64> {
        let today = self.today_or_unavailable()?;
        self.samples
            .iter()
            .find(|sample| {
                sample.time.date() == today && sample.time.hour() == hour && sample.time.minute() == 0
            })
            .and_then(|sample| sample.temperature)
            .ok_or_else(|| {
                ProviderError::DataUnavailable(format!(
                    "no outdoor temperature for {today} {hour:02}:00"
                ))
            })
    }

    /// Mean temperature of each of the `days` dates before the latest one, most recent first
    ///
    /// Fewer values are returned when the series covers fewer complete days.
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` when no earlier date exists or one of them
    /// has no temperature values
    pub fn daily_mean_history(&self, days: usize) -> ProviderResult<Vec<f64>> {
        let today = self.today_or_unavailable()?;
        let mut by_date: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for sample in self.samples.iter().filter(|s| s.time.date() < today) {
            let values = by_date.entry(sample.time.date()).or_default();
            if let Some(temperature) = sample.temperature {
                values.push(temperature);
            }
        }

        let history = by_date
            .iter()
            .rev()
            .take(days)
            .map(|(date, values)| {
                mean(values).ok_or_else(|| {
                    ProviderError::DataUnavailable(format!("no outdoor temperatures for {date}"))
                })
            })
            .collect::<ProviderResult<Vec<_>>>()?;

        if history.is_empty() {
            return Err(ProviderError::DataUnavailable(format!(
                "no outdoor temperatures before {today}"
            )));
        }
        Ok(history)
    }

    /// Mean temperature and humidity of the latest date
    ///
    /// # Errors
    ///
    /// Returns `DataUnavailable` when either quantity has no value for that date
    pub fn today_average(&self) -> ProviderResult<OutdoorConditions> {
        let today = self.today_or_unavailable()?;
        let (temperatures, humidities): (Vec<_>, Vec<_>) = self
            .samples
            .iter()
            .filter(|sample| sample.time.date() == today)
            .map(|sample| (sample.temperature, sample.relative_humidity))
            .unzip();
        let temperatures: Vec<f64> = temperatures.into_iter().flatten().collect();
        let humidities: Vec<f64> = humidities.into_iter().flatten().collect();

        let temperature = mean(&temperatures).ok_or_else(|| {
            ProviderError::DataUnavailable(format!("no outdoor temperatures for {today}"))
        })?;
        let relative_humidity = mean(&humidities).ok_or_else(|| {
            ProviderError::DataUnavailable(format!("no outdoor humidity for {today}"))
        })?;
        Ok(OutdoorConditions {
            temperature,
            relative_humidity,
        })
    }

    fn today_or_unavailable(&self) -> ProviderResult<NaiveDate> {
        self.today()
            .ok_or_else(|| ProviderError::DataUnavailable("empty hourly series".into()))
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn malformed(reason: impl Into<String>) -> ProviderError {
    ProviderError::MalformedResponse {
        service: OPEN_METEO,
        reason: reason.into(),
    }
}

/// Weather provider backed by the Open-Meteo forecast API
pub struct OpenMeteoProvider {
    client: Client,
    config: OpenMeteoConfig,
}

impl OpenMeteoProvider {
    /// Create a provider with its own HTTP client
    #[must_use]
    pub fn new(config: OpenMeteoConfig) -> Self {
        Self {
            client: create_client_with_timeout(config.request_timeout_secs),
            config,
        }
    }

    /// Create a provider that reuses an existing client
    #[must_use]
    pub const fn with_client(client: Client, config: OpenMeteoConfig) -> Self {
        Self { client, config }
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &OpenMeteoConfig {
        &self.config
    }

    async fn fetch(&self, past_days: usize, with_humidity: bool) -> ProviderResult<HourlyForecast> {
        let hourly = if with_humidity {
            "temperature_2m,relative_humidity_2m"
        } else {
            "temperature_2m"
        };
        let query = [
            ("latitude", self.config.latitude.to_string()),
            ("longitude", self.config.longitude.to_string()),
            ("hourly", hourly.to_owned()),
            ("timezone", self.config.timezone.clone()),
            ("past_days", past_days.to_string()),
            ("forecast_days", "1".to_owned()),
        ];

        let client = &self.client;
        let url = self.config.base_url.as_str();
        let query = &query;
        let body = with_retry(self.config.retry, "open_meteo_forecast", move || async move {
            debug!(
                url,
                past_days,
                hourly,
                "Fetching hourly weather"
            );
            let response = client
                .get(url)
                .query(query)
                .send()
                .await
                .map_err(|source| ProviderError::Network {
                    service: OPEN_METEO,
                    source,
                })?;

            let status = response.status();
            let text = response
                .text()
                .await
                .map_err(|source| ProviderError::Network {
                    service: OPEN_METEO,
                    source,
                })?;
            if !status.is_success() {
                return Err(ProviderError::Http {
                    service: OPEN_METEO,
                    status: status.as_u16(),
                    body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
                });
            }
            Ok(text)
        })
        .await?;

        HourlyForecast::from_json(&body)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn outdoor_temperature_at_6am(&self) -> AppResult<f64> {
        let forecast = self.fetch(1, false).await?;
        let temperature = forecast.temperature_at_hour_today(CLOTHING_SAMPLE_HOUR)?;
        info!(
            latitude = self.config.latitude,
            longitude = self.config.longitude,
            temperature,
            "Fetched morning outdoor temperature"
        );
        Ok(temperature)
    }

    async fn daily_mean_history(&self, days: usize) -> AppResult<Vec<f64>> {
        let forecast = self.fetch(days, false).await?;
        Ok(forecast.daily_mean_history(days)?)
    }

    async fn today_average(&self) -> AppResult<OutdoorConditions> {
        let forecast = self.fetch(0, true).await?;
        Ok(forecast.today_average()?)
    }
}
