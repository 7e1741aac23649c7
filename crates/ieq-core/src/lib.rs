// ABOUTME: Core types and constants for the indoor environmental quality advisor
// ABOUTME: Foundation crate with error handling, shared constants, and data models
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # IEQ Core
//!
//! Foundation crate providing shared types and constants for the advisor
//! workspace. It changes rarely, which keeps incremental builds of the
//! algorithm and provider crates cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Reference values organized by domain
//! - **models**: Sensor readings and outdoor conditions

/// Unified error handling system with standard error codes
pub mod errors;

/// Constants organized by domain
pub mod constants;

/// Core data models (sensor readings, outdoor conditions)
pub mod models;
