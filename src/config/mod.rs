// ABOUTME: Configuration management for the advisor runtime
// ABOUTME: Environment-driven settings for location, weather access, evaluation and outfit search
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Configuration
//!
//! All settings come from environment variables; see [`environment`] for the
//! full list and defaults. Model constants live in
//! [`ieq_intelligence::ComfortAnalysisConfig`].

/// Environment-based configuration
pub mod environment;

pub use environment::{AdvisorConfig, EvaluationConfig, OutfitSearchConfig};
