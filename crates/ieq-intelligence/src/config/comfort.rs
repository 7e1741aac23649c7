// ABOUTME: Thermal comfort analysis parameters: metabolic rates, acceptance band, clothing step
// ABOUTME: Running mean smoothing and history length for the adaptive model
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Comfort Analysis Configuration
//!
//! # References
//!
//! - Metabolic rates: ISO 7730:2005 Annex B, ASHRAE 55-2020 Table 5-1
//! - Acceptance band: EN 16798-1:2019 Table B.4 (category I, |PMV| < 0.2)
//! - Running mean: EN 16798-1:2019 Annex B.2.2

use crate::constants::comfort::{
    CATEGORY_I_PMV_BAND, OUTFIT_CLO_STEP, RUNNING_MEAN_ALPHA, RUNNING_MEAN_DAYS,
    SEATED_OFFICE_MET, SLOW_WALKING_MET,
};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Parameters of the comfort composer and the outfit search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComfortAnalysisConfig {
    /// Indoor metabolic rate (met)
    pub metabolic_rate: f64,
    /// Metabolic rate assumed outdoors (met)
    pub outdoor_metabolic_rate: f64,
    /// Largest |PMV| accepted as comfortable
    pub pmv_acceptance_band: f64,
    /// Extra insulation added per search iteration (clo)
    pub clothing_step: f64,
    /// Smoothing factor of the running mean outdoor temperature
    pub running_mean_alpha: f64,
    /// Daily means feeding the running mean
    pub running_mean_days: usize,
}

impl Default for ComfortAnalysisConfig {
    fn default() -> Self {
        Self {
            metabolic_rate: SEATED_OFFICE_MET,
            outdoor_metabolic_rate: SLOW_WALKING_MET,
            pmv_acceptance_band: CATEGORY_I_PMV_BAND,
            clothing_step: OUTFIT_CLO_STEP,
            running_mean_alpha: RUNNING_MEAN_ALPHA,
            running_mean_days: RUNNING_MEAN_DAYS,
        }
    }
}

impl ComfortAnalysisConfig {
    /// Check that every parameter is usable
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the first offending parameter
    pub fn validate(&self) -> AppResult<()> {
        let positive = [
            ("metabolic_rate", self.metabolic_rate),
            ("outdoor_metabolic_rate", self.outdoor_metabolic_rate),
            ("pmv_acceptance_band", self.pmv_acceptance_band),
            ("clothing_step", self.clothing_step),
        ];
        if let Some((name, value)) = positive
            .into_iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(AppError::config_invalid(format!(
                "{name} must be a positive number, got {value}"
            )));
        }
        if !(self.running_mean_alpha > 0.0 && self.running_mean_alpha <= 1.0) {
            return Err(AppError::config_invalid(format!(
                "running_mean_alpha must be in (0, 1], got {}",
                self.running_mean_alpha
            )));
        }
        if self.running_mean_days == 0 {
            return Err(AppError::config_invalid(
                "running_mean_days must be at least 1",
            ));
        }
        Ok(())
    }
}
