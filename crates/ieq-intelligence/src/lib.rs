// ABOUTME: Comfort and air-quality algorithms for the indoor environmental quality advisor
// ABOUTME: IAQ classification, garment catalogs, thermal comfort models, and analysis configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! Pure evaluation algorithms.
//!
//! Nothing in this crate performs I/O or holds state between calls; every
//! function is safe to call concurrently with identical results for identical
//! inputs.

// Re-export core modules so algorithm files can keep `use crate::errors::*`
pub use ieq_core::constants;
pub use ieq_core::errors;

/// Analysis configuration with documented defaults
pub mod config;
/// Garment ensemble catalogs and nearest-match lookup
pub mod ensembles;
/// Multi-standard CO2 classification and category labels
pub mod iaq;
/// Steady-state and adaptive thermal comfort models
pub mod thermal;

pub use config::ComfortAnalysisConfig;
pub use ensembles::{nearest, nearest_outdoor, Garment, PopulationType, OUTDOOR_GARMENTS};
pub use iaq::{classify, classify_named, Co2Basis, IaqReport, IaqStandard, OutdoorCo2, Threshold};
pub use thermal::{
    running_mean_outdoor_temperature, AdaptiveComfort, AdaptiveInput, ComfortBand, PmvPpd,
    StandardComfortModel, SteadyStateInput, ThermalComfortModel, ThermalModelError,
};
