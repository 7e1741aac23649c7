// ABOUTME: Unified error taxonomy for classification, comfort evaluation, and collaborator failures
// ABOUTME: Defines ErrorCode, AppError with chained sources, and the AppResult alias
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Unified Error Handling System
//!
//! Every fallible operation in the workspace returns [`AppResult`]. Crate-local
//! error enums (provider failures, thermal model failures) convert into
//! [`AppError`] so callers only ever match on [`ErrorCode`].
//!
//! Errors fall in four groups:
//! - invalid configuration or input (unknown standard, mismatched series)
//! - upstream collaborator failures (weather, sensor)
//! - no solution within a configured bound (outfit search)
//! - internal failures

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the workspace
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Generic invalid argument
    InvalidInput = 3000,
    /// Standard identifier not in the supported set
    UnknownStandard = 3001,
    /// Indoor and outdoor series differ in length
    LengthMismatch = 3002,
    /// Numeric value outside its admissible range
    ValueOutOfRange = 3003,
    /// Input outside the applicability range of a comfort model
    OutsideApplicability = 3004,

    // External Services (5000-5999)
    /// Collaborator returned an error
    ExternalServiceError = 5000,
    /// Collaborator could not be reached
    ExternalServiceUnavailable = 5001,
    /// Collaborator answered but the requested data is missing
    DataUnavailable = 5002,

    // Computation (7000-7999)
    /// Outfit search exhausted its iteration budget
    NoFeasibleRecommendation = 7000,
    /// Iterative comfort model failed to converge
    ModelDidNotConverge = 7001,

    // Configuration (6000-6999)
    /// Required configuration is missing
    ConfigMissing = 6001,
    /// Configuration value is invalid
    ConfigInvalid = 6002,

    // Internal Errors (9000-9999)
    /// Unexpected internal failure
    InternalError = 9000,
    /// Serialization or deserialization failure
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::UnknownStandard => "The requested standard is not supported",
            Self::LengthMismatch => "Indoor and outdoor series must have the same length",
            Self::ValueOutOfRange => "The provided value is outside the acceptable range",
            Self::OutsideApplicability => "Input is outside the applicability range of the model",
            Self::ExternalServiceError => "An external service encountered an error",
            Self::ExternalServiceUnavailable => "An external service is currently unavailable",
            Self::DataUnavailable => "The requested data is not available",
            Self::NoFeasibleRecommendation => "No recommendation could be found within the bound",
            Self::ModelDidNotConverge => "The comfort model did not converge",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal error occurred",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether a later retry of the same operation may succeed
    ///
    /// Upstream failures and an exhausted search are transient from the
    /// caller's point of view; invalid input and configuration are not.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ExternalServiceError
                | Self::ExternalServiceUnavailable
                | Self::DataUnavailable
                | Self::NoFeasibleRecommendation
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Unified error type for the workspace
#[derive(Debug, Error)]
#[error("{}: {}", .code.description(), .message)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Whether a later retry may succeed
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.code.is_recoverable()
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Unknown standard, naming the offending value and the valid set
    pub fn unknown_standard(name: &str, valid: &[&str]) -> Self {
        Self::new(
            ErrorCode::UnknownStandard,
            format!(
                "Unknown standard '{name}'. Supported standards are [{}]",
                valid.join(", ")
            ),
        )
    }

    /// Indoor/outdoor series length mismatch
    pub fn length_mismatch(indoor: usize, outdoor: usize) -> Self {
        Self::new(
            ErrorCode::LengthMismatch,
            format!(
                "co2_indoor has {indoor} samples but co2_outdoor has {outdoor}; \
                 series must be index-aligned when outdoor CO2 varies"
            ),
        )
    }

    /// Value outside its admissible range
    pub fn value_out_of_range(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValueOutOfRange, message)
    }

    /// Input outside a comfort model's applicability range
    pub fn outside_applicability(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::OutsideApplicability, message)
    }

    /// External service error
    pub fn external_service(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceError,
            format!("{}: {}", service.into(), message.into()),
        )
    }

    /// External service unavailable
    pub fn external_unavailable(service: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ExternalServiceUnavailable,
            format!("{} is currently unavailable", service.into()),
        )
    }

    /// Requested data missing from an otherwise successful response
    pub fn data_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataUnavailable, message)
    }

    /// Outfit search exhausted its iteration budget
    pub fn no_feasible_recommendation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NoFeasibleRecommendation, message)
    }

    /// Iterative model failed to converge
    pub fn model_did_not_converge(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelDidNotConverge, message)
    }

    /// Configuration missing
    pub fn config_missing(key: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("Missing required configuration: {}", key.into()),
        )
    }

    /// Configuration invalid
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigInvalid, message)
    }

    /// Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(ErrorCode::SerializationError, error.to_string()).with_source(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_description_and_message() {
        let err = AppError::unknown_standard("ASHRAE", &["EN", "HK"]);
        let text = err.to_string();
        assert!(text.starts_with("The requested standard is not supported"));
        assert!(text.contains("'ASHRAE'"));
        assert!(text.contains("[EN, HK]"));
    }

    #[test]
    fn test_recoverable_codes() {
        assert!(AppError::no_feasible_recommendation("cap").is_recoverable());
        assert!(AppError::external_service("weather", "timeout").is_recoverable());
        assert!(!AppError::length_mismatch(3, 2).is_recoverable());
        assert!(!AppError::config_missing("IEQ_OUTFIT_MAX_ITERATIONS").is_recoverable());
    }
}
