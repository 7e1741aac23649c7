// ABOUTME: Structured results of one evaluation cycle and of the daily outfit suggestion
// ABOUTME: Serializable report types consumed by the display formatter and the CLI
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::comfort::{AdaptiveAssessment, SteadyStateComfort};
use ieq_core::models::SensorReading;
use ieq_intelligence::{IaqStandard, PopulationType};
use serde::Serialize;

/// CO2 classification of a single reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IaqAssessment {
    /// Standard applied
    pub standard: IaqStandard,
    /// Category index, 1 is best
    pub index: u8,
    /// Category name
    pub label: &'static str,
}

/// Everything derived from one sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnvironmentReport {
    /// Reading the report was derived from
    pub reading: SensorReading,
    /// Air quality category
    pub iaq: IaqAssessment,
    /// PMV/PPD with the predicted clothing; `None` when the room lies outside
    /// the model's applicability ranges
    pub steady_state: Option<SteadyStateComfort>,
    /// Adaptive acceptability, category I
    pub adaptive: AdaptiveAssessment,
}

/// Indoor and outdoor outfit recommendation for today
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutfitSuggestion {
    /// Catalog used for the indoor ensemble
    pub population: PopulationType,
    /// Nearest indoor ensemble to the predicted clothing
    pub indoor_label: &'static str,
    /// Nearest outer layer to the extra insulation found
    pub outdoor_label: &'static str,
    /// Predicted indoor clothing insulation (clo)
    pub predicted_clo: f64,
    /// Insulation of the selected indoor ensemble (clo)
    pub indoor_clo: f64,
    /// Insulation of the selected outer layer (clo)
    pub outdoor_clo: f64,
    /// Extra insulation that brought the outdoor vote into the acceptance band (clo)
    pub extra_clo: f64,
    /// Increments taken by the search
    pub iterations: u32,
    /// Outdoor PMV with the indoor ensemble plus the extra insulation
    pub outdoor_pmv: f64,
    /// Today's average outdoor temperature (°C)
    pub outdoor_temperature: f64,
    /// Today's average outdoor relative humidity (%)
    pub outdoor_humidity: f64,
}
