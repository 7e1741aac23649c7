// ABOUTME: HTTP client construction for weather API calls
// ABOUTME: Applies request and connect timeouts with a fallback to the default client
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::constants::weather::CONNECT_TIMEOUT_SECS;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Build a client with an explicit request timeout and the default connect timeout
///
/// Falls back to a default client if the TLS backend cannot be initialised.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
        .build()
        .unwrap_or_else(|_| Client::new())
}
