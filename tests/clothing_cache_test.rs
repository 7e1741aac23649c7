// ABOUTME: Integration tests for the day-scoped clothing prediction cache
// ABOUTME: Verifies same-day reuse, next-day refresh, single-flight refresh and failure isolation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{CountingWeatherProvider, ManualClock};
use ieq_advisor::cache::{ClothingPredictionCache, Clock};
use ieq_advisor::errors::ErrorCode;
use ieq_advisor::intelligence::{StandardComfortModel, ThermalComfortModel};
use std::sync::Arc;
use std::time::Duration;

fn cache_with(
    weather: &Arc<CountingWeatherProvider>,
    clock: &Arc<ManualClock>,
) -> ClothingPredictionCache {
    common::init_test_logging();
    ClothingPredictionCache::with_clock(
        weather.clone(),
        Arc::new(StandardComfortModel),
        clock.clone(),
    )
}

#[tokio::test]
async fn test_first_call_fetches_and_derives_clo() {
    let weather = Arc::new(CountingWeatherProvider::new(0.0));
    let clock = Arc::new(ManualClock::starting(2025, 1, 10));
    let cache = cache_with(&weather, &clock);

    assert!(cache.current().await.is_none());
    let clo = cache.predict_clothing().await.unwrap();

    assert_eq!(clo, StandardComfortModel.clo_from_outdoor_temperature(0.0));
    assert_eq!(weather.morning_fetch_count(), 1);

    let estimate = cache.current().await.unwrap();
    assert_eq!(estimate.source_temperature, 0.0);
    assert_eq!(estimate.refreshed_on, clock.now().date_naive());
}

#[tokio::test]
async fn test_same_day_returns_cached_value_without_fetching() {
    let weather = Arc::new(CountingWeatherProvider::new(0.0));
    let clock = Arc::new(ManualClock::starting(2025, 1, 10));
    let cache = cache_with(&weather, &clock);

    let first = cache.predict_clothing().await.unwrap();
    // The source would answer differently now, but no fetch may happen today
    weather.set_temperature_at_6am(25.0);
    let second = cache.predict_clothing().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(weather.morning_fetch_count(), 1);
}

#[tokio::test]
async fn test_next_day_triggers_exactly_one_fetch() {
    let weather = Arc::new(CountingWeatherProvider::new(0.0));
    let clock = Arc::new(ManualClock::starting(2025, 1, 10));
    let cache = cache_with(&weather, &clock);

    let yesterday = cache.predict_clothing().await.unwrap();
    weather.set_temperature_at_6am(20.0);
    clock.advance_days(1);

    let today = cache.predict_clothing().await.unwrap();
    let again = cache.predict_clothing().await.unwrap();

    assert!(today < yesterday, "warmer morning should predict lighter clothing");
    assert_eq!(today, again);
    assert_eq!(weather.morning_fetch_count(), 2);
    assert_eq!(cache.current().await.unwrap().source_temperature, 20.0);
}

#[tokio::test]
async fn test_several_days_later_refreshes_once() {
    let weather = Arc::new(CountingWeatherProvider::new(3.0));
    let clock = Arc::new(ManualClock::starting(2025, 3, 1));
    let cache = cache_with(&weather, &clock);

    cache.predict_clothing().await.unwrap();
    clock.advance_days(5);
    cache.predict_clothing().await.unwrap();
    cache.predict_clothing().await.unwrap();

    assert_eq!(weather.morning_fetch_count(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_callers_share_one_refresh() {
    let weather = Arc::new(CountingWeatherProvider::new(8.0));
    weather.set_delay(Duration::from_millis(50));
    let clock = Arc::new(ManualClock::starting(2025, 1, 10));
    let cache = Arc::new(cache_with(&weather, &clock));

    let callers: Vec<_> = (0..16)
        .map(|_| {
            let cache = Arc::clone(&cache);
            tokio::spawn(async move { cache.predict_clothing().await })
        })
        .collect();

    let mut values = Vec::new();
    for caller in callers {
        values.push(caller.await.unwrap().unwrap());
    }

    assert_eq!(weather.morning_fetch_count(), 1);
    let expected = StandardComfortModel.clo_from_outdoor_temperature(8.0);
    assert!(values.iter().all(|value| *value == expected));
}

#[tokio::test]
async fn test_failed_fetch_leaves_cache_unset_and_is_retried() {
    let weather = Arc::new(CountingWeatherProvider::new(0.0));
    weather.set_failing(true);
    let clock = Arc::new(ManualClock::starting(2025, 1, 10));
    let cache = cache_with(&weather, &clock);

    let err = cache.predict_clothing().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(cache.current().await.is_none());

    weather.set_failing(false);
    cache.predict_clothing().await.unwrap();
    assert_eq!(weather.morning_fetch_count(), 2);
    assert!(cache.current().await.is_some());
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_estimate() {
    let weather = Arc::new(CountingWeatherProvider::new(0.0));
    let clock = Arc::new(ManualClock::starting(2025, 1, 10));
    let cache = cache_with(&weather, &clock);

    cache.predict_clothing().await.unwrap();
    let stored = cache.current().await.unwrap();

    clock.advance_days(1);
    weather.set_failing(true);
    assert!(cache.predict_clothing().await.is_err());

    // Not marked as refreshed, so the next call tries again
    assert_eq!(cache.current().await.unwrap(), stored);
    weather.set_failing(false);
    weather.set_temperature_at_6am(15.0);
    let refreshed = cache.estimate().await.unwrap();
    assert_eq!(refreshed.source_temperature, 15.0);
    assert_eq!(refreshed.refreshed_on, clock.now().date_naive());
    assert_eq!(weather.morning_fetch_count(), 3);
}
