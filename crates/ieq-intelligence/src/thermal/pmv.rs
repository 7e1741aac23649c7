// ABOUTME: ISO 7730:2005 Fanger PMV/PPD with iterative clothing surface temperature
// ABOUTME: Optional applicability checks on inputs and on the resulting vote
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use super::{ensure_finite, round_to, PmvPpd, SteadyStateInput, ThermalModelError};

/// ISO 7730 applicability ranges
mod limits {
    pub const TDB: (f64, f64) = (10.0, 30.0);
    pub const TR: (f64, f64) = (10.0, 40.0);
    pub const VR: (f64, f64) = (0.0, 1.0);
    pub const MET: (f64, f64) = (0.8, 4.0);
    pub const CLO: (f64, f64) = (0.0, 2.0);
    pub const PMV: f64 = 2.0;
}

/// Convergence tolerance of the surface temperature iteration (in units of 100 K)
const TOLERANCE: f64 = 0.00015;
const MAX_ITERATIONS: u32 = 150;

/// W/m² per met
const MET_TO_WATTS: f64 = 58.15;
/// m²K/W per clo
const CLO_TO_M2K_PER_W: f64 = 0.155;

pub(super) fn pmv_ppd(input: &SteadyStateInput) -> Result<PmvPpd, ThermalModelError> {
    let SteadyStateInput {
        tdb,
        tr,
        vr,
        rh,
        met,
        clo,
        limit_inputs,
    } = *input;

    for (parameter, value) in [
        ("tdb", tdb),
        ("tr", tr),
        ("vr", vr),
        ("rh", rh),
        ("met", met),
        ("clo", clo),
    ] {
        ensure_finite(parameter, value)?;
    }

    if limit_inputs {
        check_range("tdb", tdb, limits::TDB)?;
        check_range("tr", tr, limits::TR)?;
        check_range("vr", vr, limits::VR)?;
        check_range("met", met, limits::MET)?;
        check_range("clo", clo, limits::CLO)?;
    }

    let pmv = predicted_mean_vote(tdb, tr, vr, rh, met, clo)?;
    if limit_inputs && pmv.abs() > limits::PMV {
        return Err(ThermalModelError::PmvOutOfRange {
            pmv: round_to(pmv, 2),
        });
    }

    let ppd = 100.0 - 95.0 * (-0.03353_f64).mul_add(pmv.powi(4), -0.2179 * pmv.powi(2)).exp();
    Ok(PmvPpd {
        pmv: round_to(pmv, 2),
        ppd: round_to(ppd, 1),
    })
}

fn check_range(
    parameter: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), ThermalModelError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ThermalModelError::OutsideApplicability {
            parameter,
            value,
            min,
            max,
        })
    }
}

/// Fanger heat balance; external work is taken as zero
fn predicted_mean_vote(
    tdb: f64,
    tr: f64,
    vr: f64,
    rh: f64,
    met: f64,
    clo: f64,
) -> Result<f64, ThermalModelError> {
    // Water vapour partial pressure (Pa)
    let pa = rh * 10.0 * (16.6536 - 4030.183 / (tdb + 235.0)).exp();

    let icl = CLO_TO_M2K_PER_W * clo;
    let m = met * MET_TO_WATTS;
    let mw = m;

    let f_cl = if icl <= 0.078 {
        1.29_f64.mul_add(icl, 1.0)
    } else {
        0.645_f64.mul_add(icl, 1.05)
    };

    // Forced convection
    let hcf = 12.1 * vr.sqrt();
    let taa = tdb + 273.0;
    let tra = tr + 273.0;
    let t_cla = taa + (35.5 - tdb) / 3.5_f64.mul_add(icl, 0.1);

    let p1 = icl * f_cl;
    let p2 = p1 * 3.96;
    let p3 = p1 * 100.0;
    let p4 = p1 * taa;
    let p5 = p2.mul_add((tra / 100.0).powi(4), 0.028_f64.mul_add(-mw, 308.7));

    let mut xn = t_cla / 100.0;
    let mut xf = t_cla / 50.0;
    let mut hc = hcf;
    let mut iterations = 0;
    while (xn - xf).abs() > TOLERANCE {
        xf = (xf + xn) / 2.0;
        let hcn = 2.38 * 100.0_f64.mul_add(xf, -taa).abs().powf(0.25);
        hc = hcf.max(hcn);
        xn = (p4.mul_add(hc, p5) - p2 * xf.powi(4)) / p3.mul_add(hc, 100.0);
        iterations += 1;
        if iterations > MAX_ITERATIONS {
            return Err(ThermalModelError::DidNotConverge {
                iterations: MAX_ITERATIONS,
            });
        }
    }
    let tcl = 100.0_f64.mul_add(xn, -273.0);

    // Heat losses (W/m²)
    let skin_diffusion = 3.05e-3 * (6.99_f64.mul_add(-mw, 5733.0) - pa);
    let sweating = if mw > MET_TO_WATTS {
        0.42 * (mw - MET_TO_WATTS)
    } else {
        0.0
    };
    let latent_respiration = 1.7e-5 * m * (5867.0 - pa);
    let dry_respiration = 0.0014 * m * (34.0 - tdb);
    let radiation = 3.96 * f_cl * (xn.powi(4) - (tra / 100.0).powi(4));
    let convection = f_cl * hc * (tcl - tdb);

    let ts = 0.303_f64.mul_add((-0.036 * m).exp(), 0.028);
    Ok(ts
        * (mw
            - skin_diffusion
            - sweating
            - latent_respiration
            - dry_respiration
            - radiation
            - convection))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(tdb: f64, vr: f64, rh: f64, met: f64, clo: f64) -> SteadyStateInput {
        SteadyStateInput {
            tdb,
            tr: tdb,
            vr,
            rh,
            met,
            clo,
            limit_inputs: true,
        }
    }

    #[test]
    fn test_iso_7730_validation_point() {
        let result = pmv_ppd(&input(22.0, 0.1, 60.0, 1.2, 0.5)).unwrap();
        assert!((result.pmv - -0.75).abs() < 0.011, "{result:?}");
        assert!((result.ppd - 16.9).abs() < 0.2, "{result:?}");
    }

    #[test]
    fn test_warm_side() {
        let result = pmv_ppd(&input(27.0, 0.1, 60.0, 1.2, 0.5)).unwrap();
        assert!((result.pmv - 0.77).abs() < 0.011, "{result:?}");
        assert!((result.ppd - 17.3).abs() < 0.2, "{result:?}");
    }

    #[test]
    fn test_ppd_never_below_five_percent() {
        for tdb in [20.0, 22.0, 24.0, 26.0] {
            let result = pmv_ppd(&input(tdb, 0.1, 50.0, 1.2, 0.7)).unwrap();
            assert!(result.ppd >= 5.0);
        }
    }

    #[test]
    fn test_out_of_range_input_is_rejected_when_limited() {
        let err = pmv_ppd(&input(5.0, 0.1, 50.0, 1.2, 0.5)).unwrap_err();
        assert!(matches!(
            err,
            ThermalModelError::OutsideApplicability {
                parameter: "tdb",
                ..
            }
        ));
    }

    #[test]
    fn test_unlimited_inputs_allow_outdoor_conditions() {
        let mut cold = input(-10.0, 0.0, 80.0, 1.9, 0.61);
        assert!(matches!(
            pmv_ppd(&cold),
            Err(ThermalModelError::OutsideApplicability { .. })
        ));
        cold.limit_inputs = false;
        let result = pmv_ppd(&cold).unwrap();
        assert!(result.pmv < -3.0, "{result:?}");
    }

    #[test]
    fn test_extreme_vote_is_rejected_when_limited() {
        let hot = input(30.0, 0.0, 90.0, 4.0, 2.0);
        assert!(matches!(
            pmv_ppd(&hot),
            Err(ThermalModelError::PmvOutOfRange { .. })
        ));
    }

    #[test]
    fn test_non_finite_input_is_rejected() {
        let err = pmv_ppd(&input(f64::NAN, 0.1, 50.0, 1.2, 0.5)).unwrap_err();
        assert!(matches!(
            err,
            ThermalModelError::NonFinite {
                parameter: "tdb",
                ..
            }
        ));
    }
}
