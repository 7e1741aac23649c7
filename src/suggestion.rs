// ABOUTME: Outdoor clothing sufficiency search over extra insulation in fixed increments
// ABOUTME: Maps indoor and outdoor insulation to the nearest catalog garments, bounded by a required cap
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Outfit Suggestion
//!
//! Starting from the indoor ensemble nearest to today's clothing prediction,
//! extra insulation is added in steps of `clothing_step` until the outdoor
//! PMV of a slowly walking person lies within the acceptance band. Warm days
//! where clothing only makes the vote worse, or bitterly cold days beyond the
//! catalog, never converge, so the search is capped.

use crate::cache::ClothingPredictionCache;
use crate::errors::{AppError, AppResult};
use crate::report::OutfitSuggestion;
use ieq_core::models::OutdoorConditions;
use ieq_intelligence::{
    nearest_outdoor, ComfortAnalysisConfig, PopulationType, SteadyStateInput, ThermalComfortModel,
};
use ieq_providers::WeatherProvider;
use std::sync::Arc;
use tracing::{debug, info};

/// Converged state of the insulation search
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsulationSearch {
    /// Extra insulation on top of the base ensemble (clo)
    pub extra_clo: f64,
    /// Increments taken
    pub iterations: u32,
    /// Vote at the final insulation
    pub pmv: f64,
}

/// Smallest multiple of the clothing step that brings the outdoor vote within the band
///
/// Outdoors the person walks slowly in still air with radiant temperature
/// equal to air temperature; applicability limits are not enforced.
///
/// # Errors
///
/// Returns `NoFeasibleRecommendation` once more than `max_iterations`
/// increments would be needed, or the model's error
pub fn search_extra_insulation(
    model: &dyn ThermalComfortModel,
    outdoor: OutdoorConditions,
    base_clo: f64,
    config: &ComfortAnalysisConfig,
    max_iterations: u32,
) -> AppResult<InsulationSearch> {
    let vote = |extra_clo: f64| {
        model
            .steady_state(&SteadyStateInput {
                tdb: outdoor.temperature,
                tr: outdoor.temperature,
                vr: 0.0,
                rh: outdoor.relative_humidity,
                met: config.outdoor_metabolic_rate,
                clo: base_clo + extra_clo,
                limit_inputs: false,
            })
            .map(|result| result.pmv)
    };

    let mut iterations = 0_u32;
    let mut extra_clo = 0.0;
    let mut pmv = vote(extra_clo)?;
    while pmv.abs() > config.pmv_acceptance_band {
        if iterations >= max_iterations {
            return Err(AppError::no_feasible_recommendation(format!(
                "outdoor PMV still {pmv} after {iterations} increments of {} clo \
                 (outdoor {} °C, {} % RH)",
                config.clothing_step, outdoor.temperature, outdoor.relative_humidity
            )));
        }
        iterations += 1;
        extra_clo = f64::from(iterations) * config.clothing_step;
        pmv = vote(extra_clo)?;
        debug!(iterations, extra_clo, pmv, "Outfit search step");
    }

    Ok(InsulationSearch {
        extra_clo,
        iterations,
        pmv,
    })
}

/// Daily indoor and outdoor outfit advisor
pub struct OutfitAdvisor {
    cache: Arc<ClothingPredictionCache>,
    weather: Arc<dyn WeatherProvider>,
    model: Arc<dyn ThermalComfortModel>,
    config: ComfortAnalysisConfig,
    max_iterations: u32,
}

impl OutfitAdvisor {
    /// Create an advisor with an explicit search bound
    #[must_use]
    pub fn new(
        cache: Arc<ClothingPredictionCache>,
        weather: Arc<dyn WeatherProvider>,
        model: Arc<dyn ThermalComfortModel>,
        config: ComfortAnalysisConfig,
        max_iterations: u32,
    ) -> Self {
        Self {
            cache,
            weather,
            model,
            config,
            max_iterations,
        }
    }

    /// Indoor ensemble and outer layer for today's weather
    ///
    /// # Errors
    ///
    /// Propagates weather and clothing cache failures, and returns
    /// `NoFeasibleRecommendation` when the search exceeds its bound
    pub async fn suggest_outfits(&self, population: PopulationType) -> AppResult<OutfitSuggestion> {
        let predicted_clo = self.cache.predict_clothing().await?;
        let indoor = population.nearest_indoor(predicted_clo);
        let outdoor = self.weather.today_average().await?;

        let search = search_extra_insulation(
            self.model.as_ref(),
            outdoor,
            indoor.clo,
            &self.config,
            self.max_iterations,
        )?;
        let layer = nearest_outdoor(search.extra_clo);

        info!(
            population = %population,
            iterations = search.iterations,
            extra_clo = search.extra_clo,
            indoor = indoor.label,
            outdoor = layer.label,
            "Outfit suggestion found"
        );
        Ok(OutfitSuggestion {
            population,
            indoor_label: indoor.label,
            outdoor_label: layer.label,
            predicted_clo,
            indoor_clo: indoor.clo,
            outdoor_clo: layer.clo,
            extra_clo: search.extra_clo,
            iterations: search.iterations,
            outdoor_pmv: search.pmv,
            outdoor_temperature: outdoor.temperature,
            outdoor_humidity: outdoor.relative_humidity,
        })
    }

    /// Search bound in increments
    #[must_use]
    pub const fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}
