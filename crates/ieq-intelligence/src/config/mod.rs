// ABOUTME: Analysis configuration for the comfort models and the outfit search
// ABOUTME: Serde-loadable structs whose defaults carry the documented reference values
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Analysis Configuration
//!
//! Environment parsing lives in the application crate; this module only owns
//! the typed values and their validation.

pub mod comfort;

pub use comfort::ComfortAnalysisConfig;
