// ABOUTME: Multi-standard CO2 classifier producing ordinal IAQ indices for indoor series
// ABOUTME: Validates standards and series alignment, then applies one decision table per sample
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Indoor Air Quality from CO2
//!
//! CO2 is only an indirect indicator of the ventilation rate. A value below
//! a threshold does not guarantee acceptable overall air quality, and sensor
//! accuracy, placement and calibration dominate the result. ASHRAE has no
//! CO2-based index for that reason; the standards here do.

mod standard;

pub use standard::{Co2Basis, IaqStandard, Threshold};

use crate::constants::co2::DEFAULT_OUTDOOR_PPM;
use crate::errors::{AppError, AppResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Series at least this long are classified on the rayon pool
const PARALLEL_MIN_SAMPLES: usize = 4096;

/// Outdoor CO2 reference: one value for every sample, or an aligned series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutdoorCo2 {
    /// Same outdoor concentration for every indoor sample (ppm)
    Constant(f64),
    /// Outdoor concentration per indoor sample (ppm), index-aligned
    Series(Vec<f64>),
}

impl Default for OutdoorCo2 {
    fn default() -> Self {
        Self::Constant(DEFAULT_OUTDOOR_PPM)
    }
}

impl From<f64> for OutdoorCo2 {
    fn from(value: f64) -> Self {
        Self::Constant(value)
    }
}

impl From<Vec<f64>> for OutdoorCo2 {
    fn from(values: Vec<f64>) -> Self {
        Self::Series(values)
    }
}

impl OutdoorCo2 {
    /// Outdoor value paired with the indoor sample at `index`
    fn at(&self, index: usize) -> f64 {
        match self {
            Self::Constant(value) => *value,
            Self::Series(values) => values[index],
        }
    }

    fn values(&self) -> &[f64] {
        match self {
            Self::Constant(value) => std::slice::from_ref(value),
            Self::Series(values) => values,
        }
    }
}

/// Result of classifying a CO2 series under one standard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IaqReport {
    /// One index per indoor sample, in input order; 1 is best
    pub indices: Vec<u8>,
    /// Standard the indices refer to
    pub standard: IaqStandard,
    /// Indoor samples as supplied (ppm)
    pub co2_indoor: Vec<f64>,
    /// Outdoor reference as supplied (ppm)
    pub co2_outdoor: OutdoorCo2,
}

impl IaqReport {
    /// Category label of every index, in order
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if an index does not belong to the standard
    pub fn labels(&self) -> AppResult<Vec<&'static str>> {
        self.indices
            .iter()
            .map(|index| self.standard.label(*index))
            .collect()
    }

    /// Index of the most recent sample
    #[must_use]
    pub fn latest(&self) -> Option<u8> {
        self.indices.last().copied()
    }
}

/// Classify an indoor CO2 series under `standard`
///
/// # Errors
///
/// - `LengthMismatch` if `co2_outdoor` is a series of a different length
/// - `InvalidInput` if any concentration is not a finite number
pub fn classify(
    standard: IaqStandard,
    co2_indoor: &[f64],
    co2_outdoor: &OutdoorCo2,
) -> AppResult<IaqReport> {
    if let OutdoorCo2::Series(outdoor) = co2_outdoor {
        if outdoor.len() != co2_indoor.len() {
            return Err(AppError::length_mismatch(co2_indoor.len(), outdoor.len()));
        }
    }
    ensure_finite("co2_indoor", co2_indoor)?;
    ensure_finite("co2_outdoor", co2_outdoor.values())?;

    let classify_at = |(i, indoor): (usize, &f64)| standard.index_for(*indoor, co2_outdoor.at(i));
    let indices = if co2_indoor.len() >= PARALLEL_MIN_SAMPLES {
        debug!(
            samples = co2_indoor.len(),
            standard = %standard,
            "Classifying long CO2 series in parallel"
        );
        co2_indoor.par_iter().enumerate().map(classify_at).collect()
    } else {
        co2_indoor.iter().enumerate().map(classify_at).collect()
    };

    Ok(IaqReport {
        indices,
        standard,
        co2_indoor: co2_indoor.to_vec(),
        co2_outdoor: co2_outdoor.clone(),
    })
}

/// Classify with the standard given by name
///
/// # Errors
///
/// Returns `UnknownStandard` listing the valid names, or any error of [`classify`]
pub fn classify_named(
    standard: &str,
    co2_indoor: &[f64],
    co2_outdoor: &OutdoorCo2,
) -> AppResult<IaqReport> {
    classify(standard.parse()?, co2_indoor, co2_outdoor)
}

fn ensure_finite(name: &str, values: &[f64]) -> AppResult<()> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(i) => Err(AppError::invalid_input(format!(
            "{name}[{i}] is not a finite concentration: {}",
            values[i]
        ))),
        None => Ok(()),
    }
}
