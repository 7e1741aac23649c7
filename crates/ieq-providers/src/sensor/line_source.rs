// ABOUTME: Newline-delimited sensor frame reader over any async byte stream
// ABOUTME: Serves a serial device node, a capture file, or stdin
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::frame::parse_frame;
use super::SensorSource;
use crate::constants::service_names::SENSOR_LINK;
use crate::errors::{AppResult, ProviderError};
use crate::models::SensorReading;
use async_trait::async_trait;
use chrono::Utc;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::info;

/// Sensor source reading one JSON frame per line
pub struct LineSensorSource<R> {
    reader: BufReader<R>,
    buffer: Vec<u8>,
    exhausted: bool,
}

impl<R: AsyncRead + Unpin + Send> LineSensorSource<R> {
    /// Wrap a byte stream
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
            buffer: Vec::with_capacity(256),
            exhausted: false,
        }
    }
}

#[async_trait]
impl<R: AsyncRead + Unpin + Send> SensorSource for LineSensorSource<R> {
    async fn poll(&mut self) -> AppResult<Option<SensorReading>> {
        if self.exhausted {
            return Ok(None);
        }
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer).await {
            Ok(0) => {
                info!("Sensor stream ended");
                self.exhausted = true;
                Ok(None)
            }
            Ok(_) => {
                // Line noise only invalidates the line it arrived on
                let line = std::str::from_utf8(&self.buffer).map_err(|e| {
                    ProviderError::InvalidFrame(format!("line is not valid UTF-8: {e}"))
                })?;
                Ok(parse_frame(line, Utc::now())?)
            }
            Err(source) => {
                // A byte stream cannot resynchronize after a failed read
                self.exhausted = true;
                Err(ProviderError::Io {
                    device: SENSOR_LINK,
                    source,
                }
                .into())
            }
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
