// ABOUTME: Indoor sensor collaborator contract and the microcontroller frame reader
// ABOUTME: Absence of a complete reading is a normal "no data yet" state, not an error
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Indoor sensor sources

mod frame;
mod line_source;

pub use frame::parse_frame;
pub use line_source::LineSensorSource;

use crate::errors::AppResult;
use crate::models::SensorReading;
use async_trait::async_trait;

/// Polled source of indoor readings
#[async_trait]
pub trait SensorSource: Send {
    /// Next reading, or `None` when no complete reading is available yet
    ///
    /// # Errors
    ///
    /// Returns an error when the device fails or delivers an invalid frame;
    /// an invalid frame leaves the source usable for the next poll
    async fn poll(&mut self) -> AppResult<Option<SensorReading>>;

    /// Whether the source has ended and will never yield again
    fn is_exhausted(&self) -> bool {
        false
    }
}
