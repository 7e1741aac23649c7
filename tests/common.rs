// ABOUTME: Shared test utilities and fakes for integration tests
// ABOUTME: Provides a manual clock, a counting weather provider, a scripted comfort model and display sinks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used
)]
//! Shared test utilities for `ieq_advisor`

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use ieq_advisor::cache::Clock;
use ieq_advisor::errors::{AppError, AppResult};
use ieq_advisor::intelligence::{
    AdaptiveComfort, AdaptiveInput, PmvPpd, StandardComfortModel, SteadyStateInput,
    ThermalComfortModel, ThermalModelError,
};
use ieq_advisor::models::{OutdoorConditions, SensorReading};
use ieq_advisor::providers::{DisplaySink, WeatherProvider};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Clock whose date only moves when told to
pub struct ManualClock {
    today: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn starting(year: i32, month: u32, day: u32) -> Self {
        Self::new(NaiveDate::from_ymd_opt(year, month, day).unwrap())
    }

    pub fn advance_days(&self, days: u64) {
        let mut today = self.today.lock().unwrap();
        *today = *today + chrono::Days::new(days);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap()
    }

    fn now(&self) -> DateTime<Utc> {
        let today = self.today();
        Utc.from_utc_datetime(&today.and_hms_opt(12, 0, 0).unwrap())
    }
}

/// Weather provider with settable answers and call counters
pub struct CountingWeatherProvider {
    temperature_at_6am: Mutex<f64>,
    history: Mutex<Vec<f64>>,
    today: Mutex<OutdoorConditions>,
    failing: AtomicBool,
    delay: Mutex<Option<Duration>>,
    pub morning_fetches: AtomicUsize,
    pub history_fetches: AtomicUsize,
    pub average_fetches: AtomicUsize,
}

impl Default for CountingWeatherProvider {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl CountingWeatherProvider {
    pub fn new(temperature_at_6am: f64) -> Self {
        Self {
            temperature_at_6am: Mutex::new(temperature_at_6am),
            history: Mutex::new(vec![20.0; 7]),
            today: Mutex::new(OutdoorConditions {
                temperature: 20.0,
                relative_humidity: 50.0,
            }),
            failing: AtomicBool::new(false),
            delay: Mutex::new(None),
            morning_fetches: AtomicUsize::new(0),
            history_fetches: AtomicUsize::new(0),
            average_fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_temperature_at_6am(&self, temperature: f64) {
        *self.temperature_at_6am.lock().unwrap() = temperature;
    }

    pub fn set_history(&self, history: Vec<f64>) {
        *self.history.lock().unwrap() = history;
    }

    pub fn set_today(&self, temperature: f64, relative_humidity: f64) {
        *self.today.lock().unwrap() = OutdoorConditions {
            temperature,
            relative_humidity,
        };
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Hold every morning fetch open so concurrent callers overlap
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn morning_fetch_count(&self) -> usize {
        self.morning_fetches.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(AppError::external_unavailable("fake weather"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WeatherProvider for CountingWeatherProvider {
    async fn outdoor_temperature_at_6am(&self) -> AppResult<f64> {
        self.morning_fetches.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_failure()?;
        Ok(*self.temperature_at_6am.lock().unwrap())
    }

    async fn daily_mean_history(&self, days: usize) -> AppResult<Vec<f64>> {
        self.history_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(self.history.lock().unwrap().iter().copied().take(days).collect())
    }

    async fn today_average(&self) -> AppResult<OutdoorConditions> {
        self.average_fetches.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;
        Ok(*self.today.lock().unwrap())
    }
}

/// Comfort model whose vote is linear in clothing insulation
///
/// `pmv = slope * (clo - neutral_clo)`; everything else delegates to the
/// standard model. Every steady-state input is recorded.
pub struct ScriptedComfortModel {
    pub predicted_clo: f64,
    pub neutral_clo: f64,
    pub slope: f64,
    pub constant_pmv: Option<f64>,
    pub inputs: Mutex<Vec<SteadyStateInput>>,
}

impl ScriptedComfortModel {
    pub fn linear(predicted_clo: f64, neutral_clo: f64, slope: f64) -> Self {
        Self {
            predicted_clo,
            neutral_clo,
            slope,
            constant_pmv: None,
            inputs: Mutex::new(Vec::new()),
        }
    }

    /// A vote that no amount of clothing changes
    pub fn constant(predicted_clo: f64, pmv: f64) -> Self {
        Self {
            constant_pmv: Some(pmv),
            ..Self::linear(predicted_clo, predicted_clo, 0.0)
        }
    }

    pub fn recorded_inputs(&self) -> Vec<SteadyStateInput> {
        self.inputs.lock().unwrap().clone()
    }
}

impl ThermalComfortModel for ScriptedComfortModel {
    fn clo_from_outdoor_temperature(&self, _t_out: f64) -> f64 {
        self.predicted_clo
    }

    fn relative_air_speed(&self, v: f64, met: f64) -> f64 {
        StandardComfortModel.relative_air_speed(v, met)
    }

    fn dynamic_clothing(&self, clo: f64, met: f64) -> f64 {
        StandardComfortModel.dynamic_clothing(clo, met)
    }

    fn steady_state(&self, input: &SteadyStateInput) -> Result<PmvPpd, ThermalModelError> {
        self.inputs.lock().unwrap().push(*input);
        let pmv = self
            .constant_pmv
            .unwrap_or_else(|| self.slope * (input.clo - self.neutral_clo));
        Ok(PmvPpd { pmv, ppd: 5.0 })
    }

    fn adaptive(&self, input: &AdaptiveInput) -> Result<AdaptiveComfort, ThermalModelError> {
        StandardComfortModel.adaptive(input)
    }
}

/// Display sink that keeps every message
#[derive(Default)]
pub struct RecordingDisplay {
    pub messages: Mutex<Vec<String>>,
}

impl RecordingDisplay {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl DisplaySink for RecordingDisplay {
    async fn send_text(&self, text: &str) -> AppResult<()> {
        self.messages.lock().unwrap().push(text.to_owned());
        Ok(())
    }
}

/// Display sink that always fails
#[derive(Default)]
pub struct BrokenDisplay {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl DisplaySink for BrokenDisplay {
    async fn send_text(&self, _text: &str) -> AppResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(AppError::external_unavailable("display"))
    }
}

/// Indoor reading at the given conditions
pub fn reading(temperature: f64, humidity: f64, co2: f64) -> SensorReading {
    SensorReading {
        temperature,
        humidity,
        pressure: Some(1013.0),
        co2,
        received_at: Utc.with_ymd_and_hms(2025, 1, 10, 9, 0, 0).unwrap(),
    }
}

/// Microcontroller frame line with both sensors
pub fn frame_line(temperature: f64, humidity: f64, co2: f64) -> String {
    format!(
        r#"{{"Device":"ieq_epaper_v","Time":11847,"Location":"office","Data":[{{"Sensor":"BME280","Value":{{"Temperature":{temperature},"Humidity":{humidity},"Pressure":1013.2}}}},{{"Sensor":"SCD30","Value":{{"Temperature":{temperature},"Humidity":{humidity},"CO2":{co2}}}}}]}}"#
    )
}
