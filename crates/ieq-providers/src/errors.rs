// ABOUTME: Typed failures of the weather, sensor and display collaborators
// ABOUTME: Converted into AppError so callers match on ErrorCode only
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

pub use ieq_core::errors::{AppError, AppResult, ErrorCode};
use thiserror::Error;

/// Collaborator errors
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Upstream answered with a non-success status
    #[error("{service} returned status {status}: {body}")]
    Http {
        /// Service name
        service: &'static str,
        /// HTTP status code
        status: u16,
        /// Response body, possibly truncated
        body: String,
    },

    /// Upstream could not be reached
    #[error("{service} request failed: {source}")]
    Network {
        /// Service name
        service: &'static str,
        /// Transport error
        #[source]
        source: reqwest::Error,
    },

    /// Response did not have the expected shape
    #[error("{service} returned a malformed response: {reason}")]
    MalformedResponse {
        /// Service name
        service: &'static str,
        /// What was wrong
        reason: String,
    },

    /// Response was well formed but lacks the requested data
    #[error("{0}")]
    DataUnavailable(String),

    /// Sensor frame could not be interpreted
    #[error("invalid sensor frame: {0}")]
    InvalidFrame(String),

    /// Reading from or writing to a device failed
    #[error("{device} I/O failed: {source}")]
    Io {
        /// Device or stream name
        device: &'static str,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for collaborator operations
pub type ProviderResult<T> = Result<T, ProviderError>;

impl ProviderError {
    /// Whether the same request may succeed if repeated
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            Self::MalformedResponse { .. }
            | Self::DataUnavailable(_)
            | Self::InvalidFrame(_)
            | Self::Io { .. } => false,
        }
    }

    const fn code(&self) -> ErrorCode {
        match self {
            Self::Http { .. } | Self::MalformedResponse { .. } => ErrorCode::ExternalServiceError,
            Self::Network { .. } | Self::Io { .. } => ErrorCode::ExternalServiceUnavailable,
            Self::DataUnavailable(_) => ErrorCode::DataUnavailable,
            Self::InvalidFrame(_) => ErrorCode::InvalidInput,
        }
    }
}

impl From<ProviderError> for AppError {
    fn from(error: ProviderError) -> Self {
        Self::new(error.code(), error.to_string()).with_source(error)
    }
}
