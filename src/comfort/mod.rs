// ABOUTME: Thermal comfort composer driving the steady-state and adaptive models
// ABOUTME: Steady state uses the cached clothing prediction; adaptive uses the 7-day running mean
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Thermal Comfort Composition
//!
//! Two independent sub-operations:
//!
//! - **Steady state**: relative air speed and activity-adjusted clothing feed
//!   the PMV/PPD model. The result carries the static clothing prediction so
//!   callers see the clothing basis separately from the comfort outcome.
//! - **Adaptive**: the running mean of recent daily outdoor temperatures feeds
//!   the EN 16798-1 model; only category I is reported at the top level.
//!
//! They share nothing but the read-mostly clothing cache and run concurrently
//! in [`ThermalComfortComposer::evaluate`].

use crate::cache::ClothingPredictionCache;
use crate::errors::AppResult;
use ieq_intelligence::{
    running_mean_outdoor_temperature, AdaptiveComfort, AdaptiveInput, ComfortAnalysisConfig,
    SteadyStateInput, ThermalComfortModel,
};
use ieq_providers::WeatherProvider;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Indoor conditions for the steady-state model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyStateRequest {
    /// Dry-bulb air temperature (°C)
    pub tdb: f64,
    /// Relative humidity (%)
    pub rh: f64,
    /// Mean radiant temperature (°C)
    pub tr: f64,
    /// Still-air speed (m/s)
    pub air_speed: f64,
    /// Metabolic rate (met); the configured default when unset
    pub metabolic_rate: Option<f64>,
}

impl SteadyStateRequest {
    /// Conditions with radiant temperature equal to air temperature and still air
    #[must_use]
    pub const fn new(tdb: f64, rh: f64) -> Self {
        Self {
            tdb,
            rh,
            tr: tdb,
            air_speed: 0.0,
            metabolic_rate: None,
        }
    }

    /// Set the mean radiant temperature
    #[must_use]
    pub const fn with_radiant(mut self, tr: f64) -> Self {
        self.tr = tr;
        self
    }

    /// Set the still-air speed
    #[must_use]
    pub const fn with_air_speed(mut self, air_speed: f64) -> Self {
        self.air_speed = air_speed;
        self
    }

    /// Set the metabolic rate
    #[must_use]
    pub const fn with_metabolic_rate(mut self, met: f64) -> Self {
        self.metabolic_rate = Some(met);
        self
    }
}

/// Indoor conditions for the adaptive model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveRequest {
    /// Dry-bulb air temperature (°C)
    pub tdb: f64,
    /// Mean radiant temperature (°C)
    pub tr: f64,
    /// Air speed (m/s)
    pub air_speed: f64,
}

impl AdaptiveRequest {
    /// Conditions with radiant temperature equal to air temperature and still air
    #[must_use]
    pub const fn new(tdb: f64) -> Self {
        Self {
            tdb,
            tr: tdb,
            air_speed: 0.0,
        }
    }

    /// Set the mean radiant temperature
    #[must_use]
    pub const fn with_radiant(mut self, tr: f64) -> Self {
        self.tr = tr;
        self
    }

    /// Set the air speed
    #[must_use]
    pub const fn with_air_speed(mut self, air_speed: f64) -> Self {
        self.air_speed = air_speed;
        self
    }
}

/// Steady-state comfort outcome
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyStateComfort {
    /// Predicted Mean Vote
    pub pmv: f64,
    /// Predicted Percentage of Dissatisfied (%)
    pub ppd: f64,
    /// Predicted clothing insulation before activity adjustment (clo)
    pub clo: f64,
    /// Clothing insulation passed to the model (clo)
    pub clo_dynamic: f64,
    /// Relative air speed passed to the model (m/s)
    pub relative_air_speed: f64,
}

/// Adaptive comfort outcome, category I
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveAssessment {
    /// Operative temperature within the category I band
    pub acceptable: bool,
    /// Lower limit of the category I band (°C)
    pub comfort_low: f64,
    /// Neutral comfort temperature (°C)
    pub comfort_mid: f64,
    /// Upper limit of the category I band (°C)
    pub comfort_high: f64,
    /// Running mean outdoor temperature used (°C)
    pub running_mean: f64,
    /// Full model output including categories II and III
    pub detail: AdaptiveComfort,
}

/// Composes the comfort models with the clothing cache and weather history
pub struct ThermalComfortComposer {
    cache: Arc<ClothingPredictionCache>,
    weather: Arc<dyn WeatherProvider>,
    model: Arc<dyn ThermalComfortModel>,
    config: ComfortAnalysisConfig,
    limit_inputs: bool,
}

impl ThermalComfortComposer {
    /// Create a composer that enforces the PMV applicability ranges
    #[must_use]
    pub fn new(
        cache: Arc<ClothingPredictionCache>,
        weather: Arc<dyn WeatherProvider>,
        model: Arc<dyn ThermalComfortModel>,
        config: ComfortAnalysisConfig,
    ) -> Self {
        Self {
            cache,
            weather,
            model,
            config,
            limit_inputs: true,
        }
    }

    /// Enable or disable the PMV applicability checks
    #[must_use]
    pub const fn with_limit_inputs(mut self, limit_inputs: bool) -> Self {
        self.limit_inputs = limit_inputs;
        self
    }

    /// Steady-state PMV/PPD with today's predicted clothing
    ///
    /// # Errors
    ///
    /// Returns the clothing cache's error when a refresh fails, or the
    /// model's error converted into an `AppError`
    pub async fn steady_state(&self, request: &SteadyStateRequest) -> AppResult<SteadyStateComfort> {
        let met = request
            .metabolic_rate
            .unwrap_or(self.config.metabolic_rate);
        let relative_air_speed = self.model.relative_air_speed(request.air_speed, met);
        let clo = self.cache.predict_clothing().await?;
        let clo_dynamic = self.model.dynamic_clothing(clo, met);

        let result = self.model.steady_state(&SteadyStateInput {
            tdb: request.tdb,
            tr: request.tr,
            vr: relative_air_speed,
            rh: request.rh,
            met,
            clo: clo_dynamic,
            limit_inputs: self.limit_inputs,
        })?;

        debug!(
            pmv = result.pmv,
            ppd = result.ppd,
            clo,
            clo_dynamic,
            "Steady-state comfort evaluated"
        );
        Ok(SteadyStateComfort {
            pmv: result.pmv,
            ppd: result.ppd,
            clo,
            clo_dynamic,
            relative_air_speed,
        })
    }

    /// Adaptive acceptability against the running mean outdoor temperature
    ///
    /// # Errors
    ///
    /// Returns the weather provider's error when the history cannot be
    /// fetched, or `DataUnavailable` for an empty history
    pub async fn adaptive(&self, request: &AdaptiveRequest) -> AppResult<AdaptiveAssessment> {
        let history = self
            .weather
            .daily_mean_history(self.config.running_mean_days)
            .await?;
        let running_mean =
            running_mean_outdoor_temperature(&history, self.config.running_mean_alpha)?;

        let detail = self.model.adaptive(&AdaptiveInput {
            tdb: request.tdb,
            tr: request.tr,
            t_running_mean: running_mean,
            v: request.air_speed,
        })?;

        debug!(
            running_mean,
            comfort_temperature = detail.comfort_temperature,
            acceptable = detail.acceptable_category_i,
            "Adaptive comfort evaluated"
        );
        Ok(AdaptiveAssessment {
            acceptable: detail.acceptable_category_i,
            comfort_low: detail.category_i.low,
            comfort_mid: detail.comfort_temperature,
            comfort_high: detail.category_i.up,
            running_mean,
            detail,
        })
    }

    /// Both sub-operations, run concurrently
    ///
    /// # Errors
    ///
    /// Returns the first error of either sub-operation
    pub async fn evaluate(
        &self,
        steady: &SteadyStateRequest,
        adaptive: &AdaptiveRequest,
    ) -> AppResult<(SteadyStateComfort, AdaptiveAssessment)> {
        tokio::try_join!(self.steady_state(steady), self.adaptive(adaptive))
    }

    /// Model parameters in use
    #[must_use]
    pub const fn config(&self) -> &ComfortAnalysisConfig {
        &self.config
    }
}
