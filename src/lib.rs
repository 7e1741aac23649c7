// ABOUTME: Main library entry point for the indoor environmental quality advisor
// ABOUTME: Wires CO2 classification, thermal comfort composition and outfit suggestions to collaborators
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

// deny(unsafe_code): Zero-tolerance unsafe policy across the workspace
#![deny(unsafe_code)]

//! # IEQ Advisor
//!
//! Evaluates indoor environmental quality from live sensor readings and
//! outdoor weather, and suggests what to wear today.
//!
//! ## Features
//!
//! - **Air quality**: CO2 classification against six regional standards
//! - **Thermal comfort**: ISO 7730 PMV/PPD with a day-scoped clothing
//!   prediction, and the EN 16798-1 adaptive model
//! - **Outfits**: indoor ensemble and outer layer for today's weather
//!
//! ## Architecture
//!
//! - **ieq-core**: errors, constants, data models
//! - **ieq-intelligence**: pure classification and comfort algorithms
//! - **ieq-providers**: weather API, sensor link, display sink
//! - this crate: configuration, logging, the clothing cache, composition,
//!   the outfit search and the monitoring cycle
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ieq_advisor::config::AdvisorConfig;
//! use ieq_advisor::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = AdvisorConfig::from_env()?;
//!     println!(
//!         "Advising with {} for ({}, {})",
//!         config.evaluation.iaq_standard, config.weather.latitude, config.weather.longitude
//!     );
//!     Ok(())
//! }
//! ```

// Re-export foundation modules so `crate::errors` and friends resolve everywhere
pub use ieq_core::{constants, errors, models};

/// Algorithm crate
pub use ieq_intelligence as intelligence;

/// Collaborator crate
pub use ieq_providers as providers;

/// Day-scoped caches of derived values
pub mod cache;

/// Thermal comfort composition
pub mod comfort;

/// Environment-based configuration
pub mod config;

/// Text messages for the display sink
pub mod display;

/// Structured logging setup
pub mod logging;

/// Evaluation cycle over a sensor source
pub mod monitor;

/// Report types
pub mod report;

/// Outdoor clothing sufficiency search
pub mod suggestion;
