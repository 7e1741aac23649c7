// ABOUTME: Evaluation cycle wiring the IAQ classifier, the comfort composer and the outfit advisor
// ABOUTME: Polls a sensor source, formats reports for the display sink, and survives failed cycles
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::cache::{ClothingPredictionCache, Clock};
use crate::comfort::{AdaptiveRequest, SteadyStateRequest, ThermalComfortComposer};
use crate::config::{AdvisorConfig, EvaluationConfig};
use crate::display::format_environment_report;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::report::{EnvironmentReport, IaqAssessment, OutfitSuggestion};
use crate::suggestion::OutfitAdvisor;
use ieq_core::models::SensorReading;
use ieq_intelligence::{classify, OutdoorCo2, ThermalComfortModel};
use ieq_providers::{DisplaySink, SensorSource, WeatherProvider};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Outcome counts of a monitoring run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    /// Cycles that produced a report
    pub reports: u64,
    /// Cycles without a complete reading
    pub skipped: u64,
    /// Cycles that failed
    pub failures: u64,
}

/// Per-reading evaluation and daily suggestion service
pub struct EnvironmentMonitor {
    cache: Arc<ClothingPredictionCache>,
    composer: ThermalComfortComposer,
    advisor: OutfitAdvisor,
    evaluation: EvaluationConfig,
}

impl EnvironmentMonitor {
    /// Wire all components around one shared clothing cache
    #[must_use]
    pub fn from_config(
        config: &AdvisorConfig,
        weather: Arc<dyn WeatherProvider>,
        model: Arc<dyn ThermalComfortModel>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let cache = Arc::new(ClothingPredictionCache::with_clock(
            Arc::clone(&weather),
            Arc::clone(&model),
            clock,
        ));
        let composer = ThermalComfortComposer::new(
            Arc::clone(&cache),
            Arc::clone(&weather),
            Arc::clone(&model),
            config.comfort,
        )
        .with_limit_inputs(config.evaluation.limit_inputs);
        let advisor = OutfitAdvisor::new(
            Arc::clone(&cache),
            weather,
            model,
            config.comfort,
            config.outfit.max_iterations,
        );
        Self {
            cache,
            composer,
            advisor,
            evaluation: config.evaluation,
        }
    }

    /// Classify air quality and evaluate both comfort models for one reading
    ///
    /// # Errors
    ///
    /// Returns classification, collaborator or model errors; cached clothing
    /// state is never modified by a failed evaluation. A room outside the
    /// steady-state model's applicability ranges is not an error: the report
    /// carries no PMV/PPD but keeps the air quality and adaptive results.
    pub async fn evaluate(&self, reading: &SensorReading) -> AppResult<EnvironmentReport> {
        let standard = self.evaluation.iaq_standard;
        let iaq_report = classify(
            standard,
            &[reading.co2],
            &OutdoorCo2::Constant(self.evaluation.co2_outdoor_ppm),
        )?;
        let index = iaq_report
            .latest()
            .ok_or_else(|| AppError::internal("classifier returned no index for one sample"))?;
        let iaq = IaqAssessment {
            standard,
            index,
            label: standard.label(index)?,
        };

        let steady = SteadyStateRequest::new(reading.temperature, reading.humidity)
            .with_air_speed(self.evaluation.air_speed);
        let adaptive =
            AdaptiveRequest::new(reading.temperature).with_air_speed(self.evaluation.air_speed);
        let (steady_state, adaptive) = tokio::join!(
            self.composer.steady_state(&steady),
            self.composer.adaptive(&adaptive)
        );
        let adaptive = adaptive?;
        let steady_state = match steady_state {
            Ok(comfort) => Some(comfort),
            Err(e) if e.code == ErrorCode::OutsideApplicability => {
                debug!(
                    temperature = reading.temperature,
                    humidity = reading.humidity,
                    reason = %e.message,
                    "Steady-state comfort not applicable; reporting without PMV"
                );
                None
            }
            Err(e) => return Err(e),
        };

        Ok(EnvironmentReport {
            reading: *reading,
            iaq,
            steady_state,
            adaptive,
        })
    }

    /// Outfit suggestion for the configured population
    ///
    /// # Errors
    ///
    /// See [`OutfitAdvisor::suggest_outfits`]
    pub async fn suggest_outfits(&self) -> AppResult<OutfitSuggestion> {
        self.advisor
            .suggest_outfits(self.evaluation.population)
            .await
    }

    /// Poll once, evaluate, and send the formatted report
    ///
    /// Returns `Ok(None)` when no complete reading was available. Display
    /// failures are logged and not retried.
    ///
    /// # Errors
    ///
    /// Returns sensor and evaluation errors
    pub async fn run_cycle(
        &self,
        source: &mut dyn SensorSource,
        sink: &dyn DisplaySink,
    ) -> AppResult<Option<EnvironmentReport>> {
        let Some(reading) = source.poll().await? else {
            debug!("No complete sensor reading; skipping cycle");
            return Ok(None);
        };

        let report = self.evaluate(&reading).await?;
        if let Err(e) = sink.send_text(&format_environment_report(&report)).await {
            warn!(error = %e, "Failed to deliver report to display");
        }
        Ok(Some(report))
    }

    /// Run cycles until the source is exhausted
    ///
    /// A failed cycle is logged and counted; the next cycle starts normally.
    pub async fn run(&self, source: &mut dyn SensorSource, sink: &dyn DisplaySink) -> MonitorSummary {
        let mut summary = MonitorSummary::default();
        while !source.is_exhausted() {
            match self.run_cycle(source, sink).await {
                Ok(Some(_)) => summary.reports += 1,
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    summary.failures += 1;
                    warn!(error = %e, code = ?e.code, "Evaluation cycle failed");
                }
            }
        }
        info!(
            reports = summary.reports,
            skipped = summary.skipped,
            failures = summary.failures,
            "Sensor stream finished"
        );
        summary
    }

    /// Shared clothing cache
    #[must_use]
    pub const fn clothing_cache(&self) -> &Arc<ClothingPredictionCache> {
        &self.cache
    }
}
