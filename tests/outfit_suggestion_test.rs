// ABOUTME: Integration tests for the outdoor clothing sufficiency search and outfit advisor
// ABOUTME: Covers zero-extra days, convergence in steps, the iteration cap and catalog mapping
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use common::{CountingWeatherProvider, ManualClock, ScriptedComfortModel};
use ieq_advisor::cache::ClothingPredictionCache;
use ieq_advisor::errors::ErrorCode;
use ieq_advisor::intelligence::{
    ComfortAnalysisConfig, PopulationType, StandardComfortModel, ThermalComfortModel,
};
use ieq_advisor::models::OutdoorConditions;
use ieq_advisor::suggestion::{search_extra_insulation, OutfitAdvisor};
use std::sync::Arc;

fn advisor(
    weather: &Arc<CountingWeatherProvider>,
    model: &Arc<ScriptedComfortModel>,
    max_iterations: u32,
) -> OutfitAdvisor {
    common::init_test_logging();
    let model: Arc<dyn ThermalComfortModel> = model.clone();
    let cache = Arc::new(ClothingPredictionCache::with_clock(
        weather.clone(),
        Arc::clone(&model),
        Arc::new(ManualClock::starting(2025, 1, 10)),
    ));
    OutfitAdvisor::new(
        cache,
        weather.clone(),
        model,
        ComfortAnalysisConfig::default(),
        max_iterations,
    )
}

#[tokio::test]
async fn test_comfortable_outdoors_needs_no_jacket() {
    let weather = Arc::new(CountingWeatherProvider::default());
    weather.set_today(18.0, 55.0);
    let model = Arc::new(ScriptedComfortModel::linear(0.61, 0.61, 4.0));

    let suggestion = advisor(&weather, &model, 50)
        .suggest_outfits(PopulationType::A)
        .await
        .unwrap();

    assert_eq!(suggestion.iterations, 0);
    assert_eq!(suggestion.extra_clo, 0.0);
    assert_eq!(suggestion.outdoor_label, "No additional jacket needed");
    assert_eq!(suggestion.indoor_label, "Trousers, long-sleeve shirt");
    assert_eq!(suggestion.outdoor_temperature, 18.0);
    assert_eq!(suggestion.outdoor_humidity, 55.0);
}

#[tokio::test]
async fn test_population_selects_indoor_catalog() {
    let weather = Arc::new(CountingWeatherProvider::default());
    let model = Arc::new(ScriptedComfortModel::linear(0.61, 0.67, 4.0));

    let suggestion = advisor(&weather, &model, 50)
        .suggest_outfits(PopulationType::B)
        .await
        .unwrap();

    assert_eq!(suggestion.population, PopulationType::B);
    assert_eq!(
        suggestion.indoor_label,
        "Knee-length skirt, long-sleeve shirt, full slip"
    );
    assert_eq!(suggestion.indoor_clo, 0.67);
}

#[tokio::test]
async fn test_search_adds_steps_until_vote_is_in_band() {
    let weather = Arc::new(CountingWeatherProvider::default());
    weather.set_today(2.0, 80.0);
    // Neutral at 0.525 clo above the indoor ensemble
    let model = Arc::new(ScriptedComfortModel::linear(0.61, 1.135, 4.0));

    let suggestion = advisor(&weather, &model, 50)
        .suggest_outfits(PopulationType::A)
        .await
        .unwrap();

    assert_eq!(suggestion.iterations, 10);
    assert!((suggestion.extra_clo - 0.5).abs() < 1e-9);
    assert!(suggestion.outdoor_pmv.abs() <= 0.2);
    assert_eq!(suggestion.outdoor_label, "Down jacket");
    assert_eq!(suggestion.outdoor_clo, 0.55);

    let inputs = model.recorded_inputs();
    assert_eq!(inputs.len(), 11);
    for input in &inputs {
        assert_eq!(input.tdb, 2.0);
        assert_eq!(input.tr, input.tdb);
        assert_eq!(input.vr, 0.0);
        assert_eq!(input.rh, 80.0);
        assert_eq!(input.met, 1.9);
        assert!(!input.limit_inputs);
    }
}

#[tokio::test]
async fn test_search_starts_from_indoor_ensemble_not_prediction() {
    let weather = Arc::new(CountingWeatherProvider::default());
    let model = Arc::new(ScriptedComfortModel::linear(0.64, 0.61, 4.0));

    let suggestion = advisor(&weather, &model, 50)
        .suggest_outfits(PopulationType::A)
        .await
        .unwrap();

    assert_eq!(suggestion.predicted_clo, 0.64);
    assert_eq!(suggestion.indoor_clo, 0.61);
    assert_eq!(model.recorded_inputs()[0].clo, 0.61);
    assert_eq!(suggestion.iterations, 0);
}

#[tokio::test]
async fn test_unreachable_band_hits_the_cap() {
    let weather = Arc::new(CountingWeatherProvider::default());
    weather.set_today(35.0, 60.0);
    // Too warm: extra clothing never helps
    let model = Arc::new(ScriptedComfortModel::constant(0.46, 1.5));

    let err = advisor(&weather, &model, 5)
        .suggest_outfits(PopulationType::A)
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::NoFeasibleRecommendation);
    assert!(err.is_recoverable());
    assert_eq!(model.recorded_inputs().len(), 6);
}

#[tokio::test]
async fn test_weather_failure_propagates() {
    let weather = Arc::new(CountingWeatherProvider::default());
    weather.set_failing(true);
    let model = Arc::new(ScriptedComfortModel::linear(0.61, 0.61, 4.0));

    let err = advisor(&weather, &model, 50)
        .suggest_outfits(PopulationType::A)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(model.recorded_inputs().is_empty());
}

#[test]
fn test_standard_model_converges_on_a_cold_day() {
    let config = ComfortAnalysisConfig::default();
    let outdoor = OutdoorConditions {
        temperature: 5.0,
        relative_humidity: 80.0,
    };

    let search = search_extra_insulation(&StandardComfortModel, outdoor, 0.61, &config, 100).unwrap();

    assert!(search.pmv.abs() <= config.pmv_acceptance_band);
    assert!((20..=35).contains(&search.iterations), "{search:?}");
    assert!((search.extra_clo - f64::from(search.iterations) * 0.05).abs() < 1e-9);
}

#[test]
fn test_standard_model_mild_day_needs_nothing() {
    let outdoor = OutdoorConditions {
        temperature: 20.0,
        relative_humidity: 50.0,
    };
    let search = search_extra_insulation(
        &StandardComfortModel,
        outdoor,
        0.61,
        &ComfortAnalysisConfig::default(),
        1,
    )
    .unwrap();
    assert_eq!(search.iterations, 0);
    assert_eq!(search.extra_clo, 0.0);
}

#[test]
fn test_cap_of_one_allows_exactly_one_increment() {
    let model = ScriptedComfortModel::linear(0.61, 0.68, 4.0);
    let outdoor = OutdoorConditions {
        temperature: 10.0,
        relative_humidity: 60.0,
    };
    let search =
        search_extra_insulation(&model, outdoor, 0.61, &ComfortAnalysisConfig::default(), 1)
            .unwrap();
    assert_eq!(search.iterations, 1);
}
