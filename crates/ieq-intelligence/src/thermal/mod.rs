// ABOUTME: Thermal comfort model contract plus the ISO 7730 and EN 16798-1 implementations
// ABOUTME: Inputs, results, and typed model errors shared by the composer and the outfit search
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Thermal Comfort Models
//!
//! The evaluation engine never computes comfort physics itself. It drives a
//! [`ThermalComfortModel`], which lets tests substitute a scripted model and
//! keeps the numeric code in one place.
//!
//! [`StandardComfortModel`] implements:
//! - ISO 7730:2005 PMV/PPD (Fanger)
//! - EN 16798-1:2019 adaptive comfort
//! - ASHRAE 55 Appendix G clothing prediction from the 06:00 outdoor temperature
//! - ASHRAE 55 relative air speed and dynamic clothing insulation

mod adaptive;
mod clothing;
mod pmv;

pub use adaptive::running_mean_outdoor_temperature;

use crate::errors::{AppError, ErrorCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the comfort models
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThermalModelError {
    /// An input lies outside the range the model is validated for
    #[error("{parameter} = {value} is outside the applicability range [{min}, {max}]")]
    OutsideApplicability {
        /// Input name
        parameter: &'static str,
        /// Offending value
        value: f64,
        /// Lower bound of the valid range
        min: f64,
        /// Upper bound of the valid range
        max: f64,
    },

    /// PMV was computed but lies outside the ±2 validity band of ISO 7730
    #[error("PMV {pmv} is outside the valid range [-2, 2]")]
    PmvOutOfRange {
        /// Computed vote
        pmv: f64,
    },

    /// Clothing surface temperature iteration did not converge
    #[error("clothing surface temperature did not converge within {iterations} iterations")]
    DidNotConverge {
        /// Iterations performed
        iterations: u32,
    },

    /// Running mean requested over no daily values
    #[error("running mean needs at least one daily mean temperature")]
    EmptyHistory,

    /// An input is not a finite number
    #[error("{parameter} must be a finite number, got {value}")]
    NonFinite {
        /// Input name
        parameter: &'static str,
        /// Offending value
        value: f64,
    },
}

impl From<ThermalModelError> for AppError {
    fn from(error: ThermalModelError) -> Self {
        let code = match &error {
            ThermalModelError::OutsideApplicability { .. }
            | ThermalModelError::PmvOutOfRange { .. } => ErrorCode::OutsideApplicability,
            ThermalModelError::DidNotConverge { .. } => ErrorCode::ModelDidNotConverge,
            ThermalModelError::EmptyHistory => ErrorCode::DataUnavailable,
            ThermalModelError::NonFinite { .. } => ErrorCode::InvalidInput,
        };
        Self::new(code, error.to_string()).with_source(error)
    }
}

/// Inputs of the steady-state (PMV/PPD) model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyStateInput {
    /// Dry-bulb air temperature (°C)
    pub tdb: f64,
    /// Mean radiant temperature (°C)
    pub tr: f64,
    /// Relative air speed (m/s)
    pub vr: f64,
    /// Relative humidity (%)
    pub rh: f64,
    /// Metabolic rate (met)
    pub met: f64,
    /// Clothing insulation (clo)
    pub clo: f64,
    /// Reject inputs and results outside the ISO 7730 applicability ranges
    pub limit_inputs: bool,
}

/// Steady-state comfort result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PmvPpd {
    /// Predicted Mean Vote on the -3..+3 scale
    pub pmv: f64,
    /// Predicted Percentage of Dissatisfied (%)
    pub ppd: f64,
}

/// Inputs of the adaptive model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveInput {
    /// Dry-bulb air temperature (°C)
    pub tdb: f64,
    /// Mean radiant temperature (°C)
    pub tr: f64,
    /// Running mean outdoor temperature (°C)
    pub t_running_mean: f64,
    /// Air speed (m/s)
    pub v: f64,
}

/// Acceptable operative temperature range of one EN 16798-1 category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComfortBand {
    /// Lower limit (°C)
    pub low: f64,
    /// Upper limit (°C)
    pub up: f64,
}

impl ComfortBand {
    /// Whether `operative` lies within the band, bounds included
    #[must_use]
    pub fn contains(&self, operative: f64) -> bool {
        self.low <= operative && operative <= self.up
    }
}

/// Adaptive comfort result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdaptiveComfort {
    /// Operative temperature (°C)
    pub operative_temperature: f64,
    /// Neutral comfort temperature (°C)
    pub comfort_temperature: f64,
    /// Cooling effect of elevated air speed (K)
    pub cooling_effect: f64,
    /// Category I band
    pub category_i: ComfortBand,
    /// Category II band
    pub category_ii: ComfortBand,
    /// Category III band
    pub category_iii: ComfortBand,
    /// Operative temperature within category I
    pub acceptable_category_i: bool,
    /// Operative temperature within category II
    pub acceptable_category_ii: bool,
    /// Operative temperature within category III
    pub acceptable_category_iii: bool,
}

/// Numeric comfort models the evaluation engine drives
///
/// Implementations must be pure: identical inputs give identical outputs.
pub trait ThermalComfortModel: Send + Sync {
    /// Predicted indoor clothing insulation (clo) from the 06:00 outdoor temperature (°C)
    fn clo_from_outdoor_temperature(&self, t_out: f64) -> f64;

    /// Relative air speed (m/s) from still-air speed and metabolic rate
    fn relative_air_speed(&self, v: f64, met: f64) -> f64;

    /// Clothing insulation corrected for body movement
    fn dynamic_clothing(&self, clo: f64, met: f64) -> f64;

    /// Steady-state PMV/PPD
    ///
    /// # Errors
    ///
    /// Returns a [`ThermalModelError`] when inputs are out of range or the
    /// model fails to converge
    fn steady_state(&self, input: &SteadyStateInput) -> Result<PmvPpd, ThermalModelError>;

    /// Adaptive comfort acceptability
    ///
    /// # Errors
    ///
    /// Returns a [`ThermalModelError`] when an input is not finite
    fn adaptive(&self, input: &AdaptiveInput) -> Result<AdaptiveComfort, ThermalModelError>;
}

/// ISO 7730 / EN 16798-1 / ASHRAE 55 comfort models
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardComfortModel;

impl ThermalComfortModel for StandardComfortModel {
    fn clo_from_outdoor_temperature(&self, t_out: f64) -> f64 {
        clothing::clo_from_outdoor_temperature(t_out)
    }

    fn relative_air_speed(&self, v: f64, met: f64) -> f64 {
        clothing::relative_air_speed(v, met)
    }

    fn dynamic_clothing(&self, clo: f64, met: f64) -> f64 {
        clothing::dynamic_clothing(clo, met)
    }

    fn steady_state(&self, input: &SteadyStateInput) -> Result<PmvPpd, ThermalModelError> {
        pmv::pmv_ppd(input)
    }

    fn adaptive(&self, input: &AdaptiveInput) -> Result<AdaptiveComfort, ThermalModelError> {
        adaptive::adaptive_en(input)
    }
}

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

pub(crate) fn ensure_finite(parameter: &'static str, value: f64) -> Result<(), ThermalModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ThermalModelError::NonFinite { parameter, value })
    }
}
