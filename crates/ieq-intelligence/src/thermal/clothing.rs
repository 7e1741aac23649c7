// ABOUTME: ASHRAE 55 clothing helpers: clo prediction, relative air speed, dynamic insulation
// ABOUTME: Closed-form functions used before the PMV model is evaluated
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::round_to;

/// ASHRAE 55-2020 Appendix G, clothing prediction from the 06:00 outdoor temperature
pub(super) fn clo_from_outdoor_temperature(t_out: f64) -> f64 {
    if t_out < -5.0 {
        1.0
    } else if t_out < 5.0 {
        0.0364_f64.mul_add(-t_out, 0.818)
    } else if t_out < 26.0 {
        10_f64.powf(0.0066_f64.mul_add(-t_out, -0.1635))
    } else {
        0.46
    }
}

/// ASHRAE 55 relative air speed: body movement adds 0.3 m/s per met above 1
pub(super) fn relative_air_speed(v: f64, met: f64) -> f64 {
    if met > 1.0 {
        round_to(0.3_f64.mul_add(met - 1.0, v), 3)
    } else {
        v
    }
}

/// ASHRAE 55 dynamic clothing: insulation drops with activity above 1.2 met
pub(super) fn dynamic_clothing(clo: f64, met: f64) -> f64 {
    if met > 1.2 {
        round_to(clo * (0.6 + 0.4 / met), 3)
    } else {
        clo
    }
}
