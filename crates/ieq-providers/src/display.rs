// ABOUTME: Output sink for short text messages destined for a wearable display
// ABOUTME: Console implementation writes each message as a block to stdout or any async writer
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Display sinks

use crate::errors::{AppResult, ProviderError};
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt, Stdout};
use tokio::sync::Mutex;

/// Best-effort receiver of text messages
///
/// Callers log delivery failures and move on; sinks are never retried.
#[async_trait]
pub trait DisplaySink: Send + Sync {
    /// Deliver one message
    ///
    /// # Errors
    ///
    /// Returns an error when the message could not be delivered
    async fn send_text(&self, text: &str) -> AppResult<()>;
}

/// Sink printing each message followed by a blank line
pub struct ConsoleDisplay<W = Stdout> {
    writer: Mutex<W>,
}

impl ConsoleDisplay<Stdout> {
    /// Console sink on the process stdout
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

impl<W: AsyncWrite + Unpin + Send> ConsoleDisplay<W> {
    /// Console sink on an arbitrary writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> DisplaySink for ConsoleDisplay<W> {
    async fn send_text(&self, text: &str) -> AppResult<()> {
        let mut writer = self.writer.lock().await;
        let io_error = |source| ProviderError::Io {
            device: "console",
            source,
        };
        writer.write_all(text.as_bytes()).await.map_err(io_error)?;
        writer.write_all(b"\n\n").await.map_err(io_error)?;
        writer.flush().await.map_err(io_error)?;
        Ok(())
    }
}
