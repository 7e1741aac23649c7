// ABOUTME: Integration tests for the multi-standard CO2 classifier and its category labels
// ABOUTME: Covers threshold boundaries, monotonic severity, series validation and label round trips
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use ieq_advisor::errors::ErrorCode;
use ieq_advisor::intelligence::{
    classify, classify_named, Co2Basis, IaqStandard, OutdoorCo2,
};

fn index(standard: IaqStandard, indoor: f64, outdoor: f64) -> u8 {
    classify(standard, &[indoor], &OutdoorCo2::Constant(outdoor))
        .unwrap()
        .indices[0]
}

#[test]
fn test_en_example_series() {
    let report = classify(
        IaqStandard::En,
        &[400.0, 900.0, 1600.0, 3000.0],
        &OutdoorCo2::Constant(400.0),
    )
    .unwrap();
    assert_eq!(report.indices, vec![1, 2, 3, 4]);
    assert_eq!(report.standard, IaqStandard::En);
    assert_eq!(report.co2_indoor, vec![400.0, 900.0, 1600.0, 3000.0]);
}

#[test]
fn test_en_label_round_trip() {
    let report = classify(
        IaqStandard::En,
        &[400.0, 900.0, 1600.0, 3000.0],
        &OutdoorCo2::default(),
    )
    .unwrap();
    assert_eq!(
        report.labels().unwrap(),
        vec!["Excellent", "Good", "Moderate", "Bad"]
    );
}

#[test]
fn test_boundaries_are_inclusive_except_uba_first() {
    // (standard, boundary value, index at the boundary, index just above it)
    let cases: [(IaqStandard, &[(f64, u8, u8)]); 6] = [
        (
            IaqStandard::En,
            &[(550.0, 1, 2), (800.0, 2, 3), (1350.0, 3, 4)],
        ),
        (IaqStandard::Lehb, &[(1000.0, 1, 2)]),
        (IaqStandard::Ss, &[(700.0, 1, 2)]),
        (IaqStandard::Hk, &[(800.0, 1, 2), (1000.0, 2, 3)]),
        (IaqStandard::Uba, &[(1000.0, 2, 2), (2000.0, 2, 3)]),
        (IaqStandard::Dosh, &[(1000.0, 1, 2)]),
    ];

    for (standard, boundaries) in cases {
        // Delta standards see the value as indoor - outdoor with outdoor at zero
        for &(value, at, above) in boundaries {
            assert_eq!(index(standard, value, 0.0), at, "{standard} at {value}");
            assert_eq!(
                index(standard, value + 0.01, 0.0),
                above,
                "{standard} just above {value}"
            );
        }
    }
    assert_eq!(index(IaqStandard::Uba, 999.99, 0.0), 1);
}

#[test]
fn test_delta_standards_subtract_outdoor() {
    assert_eq!(IaqStandard::En.basis(), Co2Basis::IndoorOutdoorDelta);
    // 950 - 400 = 550 is still category I
    assert_eq!(index(IaqStandard::En, 950.0, 400.0), 1);
    assert_eq!(index(IaqStandard::En, 951.0, 400.0), 2);
    assert_eq!(index(IaqStandard::Ss, 1100.0, 400.0), 1);
    assert_eq!(index(IaqStandard::Ss, 1101.0, 400.0), 2);
    // Absolute standards ignore outdoor entirely
    assert_eq!(index(IaqStandard::Hk, 900.0, 0.0), index(IaqStandard::Hk, 900.0, 800.0));
}

#[test]
fn test_index_one_is_best_and_severity_is_monotonic() {
    let series: Vec<f64> = (0..=80).map(|step| f64::from(step) * 50.0).collect();
    for standard in IaqStandard::ALL {
        let report = classify(standard, &series, &OutdoorCo2::Constant(0.0)).unwrap();
        assert_eq!(report.indices[0], 1, "{standard}");
        assert!(
            report.indices.windows(2).all(|pair| pair[0] <= pair[1]),
            "{standard} is not monotonic"
        );
        assert_eq!(
            usize::from(*report.indices.last().unwrap()),
            standard.category_count(),
            "{standard} never reaches its worst category"
        );
    }
}

#[test]
fn test_labels_cover_every_index() {
    assert_eq!(IaqStandard::Uba.label(2).unwrap(), "Conspicuous");
    assert_eq!(IaqStandard::En.label(3).unwrap(), "Moderate");
    for standard in IaqStandard::ALL {
        for index in 1..=standard.category_count() {
            assert!(standard.label(index as u8).is_ok(), "{standard} {index}");
        }
        let beyond = standard.category_count() as u8 + 1;
        assert_eq!(
            standard.label(beyond).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert!(standard.label(0).is_err());
    }
}

#[test]
fn test_outdoor_series_is_index_aligned() {
    let report = classify(
        IaqStandard::En,
        &[1000.0, 1000.0],
        &OutdoorCo2::Series(vec![400.0, 500.0]),
    )
    .unwrap();
    // Deltas 600 and 500
    assert_eq!(report.indices, vec![2, 1]);
}

#[test]
fn test_length_mismatch_is_rejected() {
    let err = classify(
        IaqStandard::En,
        &[400.0, 900.0, 1600.0],
        &OutdoorCo2::Series(vec![400.0, 400.0]),
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::LengthMismatch);
    assert!(err.message.contains('3') && err.message.contains('2'));
}

#[test]
fn test_unknown_standard_lists_valid_set() {
    let err = classify_named("ASHRAE", &[400.0], &OutdoorCo2::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownStandard);
    assert!(err.message.contains("ASHRAE"));
    for name in IaqStandard::NAMES {
        assert!(err.message.contains(name), "missing {name}");
    }
}

#[test]
fn test_standard_names_parse_case_insensitively() {
    let report = classify_named("uba", &[999.0, 1000.0], &OutdoorCo2::default()).unwrap();
    assert_eq!(report.standard, IaqStandard::Uba);
    assert_eq!(report.indices, vec![1, 2]);
}

#[test]
fn test_non_finite_concentration_is_rejected() {
    let err = classify(IaqStandard::Hk, &[400.0, f64::NAN], &OutdoorCo2::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidInput);
}

#[test]
fn test_long_series_matches_sample_by_sample() {
    let series: Vec<f64> = (0..10_000).map(|i| 350.0 + f64::from(i % 400) * 5.0).collect();
    let report = classify(IaqStandard::Hk, &series, &OutdoorCo2::default()).unwrap();
    assert_eq!(report.indices.len(), series.len());
    for (value, index) in series.iter().zip(&report.indices) {
        assert_eq!(*index, IaqStandard::Hk.index_for(*value, 400.0));
    }
}

#[test]
fn test_empty_series_is_empty_report() {
    let report = classify(IaqStandard::Dosh, &[], &OutdoorCo2::default()).unwrap();
    assert!(report.indices.is_empty());
    assert_eq!(report.latest(), None);
}
