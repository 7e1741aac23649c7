// ABOUTME: Clothing insulation predicted from the 06:00 outdoor temperature, refreshed once per day
// ABOUTME: Read-mostly state with a single in-flight refresh and no update on a failed fetch
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::AppResult;
use chrono::{DateTime, Local, NaiveDate, Utc};
use ieq_intelligence::ThermalComfortModel;
use ieq_providers::WeatherProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

/// Source of the current calendar date
///
/// Injected so tests can move time forward without waiting for midnight.
pub trait Clock: Send + Sync {
    /// Today's date in the building's local calendar
    fn today(&self) -> NaiveDate;

    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock in the host's local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clothing prediction and the day it was derived on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClothingEstimate {
    /// Predicted indoor clothing insulation (clo)
    pub clo: f64,
    /// Calendar date of the refresh
    pub refreshed_on: NaiveDate,
    /// 06:00 outdoor temperature the prediction was derived from (°C)
    pub source_temperature: f64,
}

impl ClothingEstimate {
    fn is_stale(&self, today: NaiveDate) -> bool {
        today > self.refreshed_on
    }
}

/// Day-scoped cache of the predicted indoor clothing insulation
///
/// Reads take a shared lock only. A stale or empty cache is refreshed under a
/// separate mutex so concurrent callers trigger exactly one upstream fetch and
/// all of them observe its result.
pub struct ClothingPredictionCache {
    weather: Arc<dyn WeatherProvider>,
    model: Arc<dyn ThermalComfortModel>,
    clock: Arc<dyn Clock>,
    state: RwLock<Option<ClothingEstimate>>,
    refresh: Mutex<()>,
}

impl ClothingPredictionCache {
    /// Create an empty cache using the system clock
    #[must_use]
    pub fn new(weather: Arc<dyn WeatherProvider>, model: Arc<dyn ThermalComfortModel>) -> Self {
        Self::with_clock(weather, model, Arc::new(SystemClock))
    }

    /// Create an empty cache with an explicit clock
    #[must_use]
    pub fn with_clock(
        weather: Arc<dyn WeatherProvider>,
        model: Arc<dyn ThermalComfortModel>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            weather,
            model,
            clock,
            state: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    /// Predicted indoor clothing insulation (clo) for today
    ///
    /// # Errors
    ///
    /// Propagates the weather provider's error when a refresh is needed and
    /// the 06:00 temperature cannot be fetched; the cache keeps its previous
    /// state in that case
    pub async fn predict_clothing(&self) -> AppResult<f64> {
        Ok(self.estimate().await?.clo)
    }

    /// Today's estimate, refreshing it first when stale or missing
    ///
    /// # Errors
    ///
    /// Same as [`ClothingPredictionCache::predict_clothing`]
    pub async fn estimate(&self) -> AppResult<ClothingEstimate> {
        let today = self.clock.today();
        if let Some(fresh) = self.fresh_estimate(today).await {
            debug!(clo = fresh.clo, refreshed_on = %fresh.refreshed_on, "Clothing cache hit");
            return Ok(fresh);
        }

        let _refresh_guard = self.refresh.lock().await;

        // Another caller may have refreshed while this one waited for the mutex
        let today = self.clock.today();
        if let Some(fresh) = self.fresh_estimate(today).await {
            debug!(clo = fresh.clo, "Clothing cache refreshed by a concurrent caller");
            return Ok(fresh);
        }

        let source_temperature = match self.weather.outdoor_temperature_at_6am().await {
            Ok(temperature) => temperature,
            Err(e) => {
                warn!(error = %e, "Failed to refresh clothing prediction; cache left unchanged");
                return Err(e);
            }
        };

        let estimate = ClothingEstimate {
            clo: self.model.clo_from_outdoor_temperature(source_temperature),
            refreshed_on: today,
            source_temperature,
        };
        *self.state.write().await = Some(estimate);

        info!(
            source_temperature = estimate.source_temperature,
            clo = estimate.clo,
            refreshed_on = %estimate.refreshed_on,
            "Clothing prediction refreshed"
        );
        Ok(estimate)
    }

    /// Current state without triggering a refresh
    pub async fn current(&self) -> Option<ClothingEstimate> {
        *self.state.read().await
    }

    async fn fresh_estimate(&self, today: NaiveDate) -> Option<ClothingEstimate> {
        self.state
            .read()
            .await
            .filter(|estimate| !estimate.is_stale(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staleness_is_by_calendar_date() {
        let refreshed_on = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let estimate = ClothingEstimate {
            clo: 0.8,
            refreshed_on,
            source_temperature: 2.0,
        };
        assert!(!estimate.is_stale(refreshed_on));
        assert!(estimate.is_stale(refreshed_on.succ_opt().unwrap()));
        // A clock set backwards never counts as a new day
        assert!(!estimate.is_stale(refreshed_on.pred_opt().unwrap()));
    }
}
