// ABOUTME: EN 16798-1:2019 adaptive comfort model and the running mean outdoor temperature
// ABOUTME: Category I-III acceptable operative temperature bands with the air speed cooling effect
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{
    ensure_finite, round_to, AdaptiveComfort, AdaptiveInput, ComfortBand, ThermalModelError,
};

/// Band offsets below and above the comfort temperature for categories I, II, III (K)
const CATEGORY_OFFSETS: [(f64, f64); 3] = [(3.0, 2.0), (4.0, 3.0), (5.0, 4.0)];

pub(super) fn adaptive_en(input: &AdaptiveInput) -> Result<AdaptiveComfort, ThermalModelError> {
    let AdaptiveInput {
        tdb,
        tr,
        t_running_mean,
        v,
    } = *input;
    ensure_finite("tdb", tdb)?;
    ensure_finite("tr", tr)?;
    ensure_finite("t_running_mean", t_running_mean)?;
    ensure_finite("v", v)?;

    let operative = operative_temperature(tdb, tr, v);
    let comfort = 0.33_f64.mul_add(t_running_mean, 18.8);
    let cooling = cooling_effect(v, operative);

    let [cat_i, cat_ii, cat_iii] = CATEGORY_OFFSETS.map(|(below, above)| ComfortBand {
        low: comfort - below,
        up: comfort + above + cooling,
    });

    let rounded = |band: ComfortBand| ComfortBand {
        low: round_to(band.low, 1),
        up: round_to(band.up, 1),
    };

    Ok(AdaptiveComfort {
        operative_temperature: round_to(operative, 1),
        comfort_temperature: round_to(comfort, 1),
        cooling_effect: cooling,
        category_i: rounded(cat_i),
        category_ii: rounded(cat_ii),
        category_iii: rounded(cat_iii),
        acceptable_category_i: cat_i.contains(operative),
        acceptable_category_ii: cat_ii.contains(operative),
        acceptable_category_iii: cat_iii.contains(operative),
    })
}

/// Operative temperature weighted by air speed (ISO 7726)
fn operative_temperature(tdb: f64, tr: f64, v: f64) -> f64 {
    let weight = (10.0 * v.max(0.0)).sqrt();
    tdb.mul_add(weight, tr) / (1.0 + weight)
}

/// Extra upper-limit allowance for elevated air speed in warm conditions (K)
fn cooling_effect(v: f64, operative: f64) -> f64 {
    if v < 0.6 || operative < 25.0 {
        0.0
    } else if v < 0.9 {
        1.2
    } else if v < 1.2 {
        1.8
    } else {
        2.2
    }
}

/// Exponentially weighted running mean of daily mean outdoor temperatures
///
/// `daily_means` is ordered most recent first; day `i` has weight `alpha^i`.
///
/// # Errors
///
/// Returns [`ThermalModelError::EmptyHistory`] when `daily_means` is empty, or
/// [`ThermalModelError::NonFinite`] for a non-finite value
pub fn running_mean_outdoor_temperature(
    daily_means: &[f64],
    alpha: f64,
) -> Result<f64, ThermalModelError> {
    if daily_means.is_empty() {
        return Err(ThermalModelError::EmptyHistory);
    }
    ensure_finite("alpha", alpha)?;

    let mut weight = 1.0_f64;
    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;
    for &temperature in daily_means {
        ensure_finite("daily_mean", temperature)?;
        weighted_sum = weight.mul_add(temperature, weighted_sum);
        weight_sum += weight;
        weight *= alpha;
    }
    Ok(round_to(weighted_sum / weight_sum, 1))
}
