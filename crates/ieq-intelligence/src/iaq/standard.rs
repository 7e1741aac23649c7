// ABOUTME: Supported regional IAQ standards with their CO2 decision tables and category labels
// ABOUTME: EN 16798-1, Japanese LEHB, Singapore SS 554, Hong Kong EPD, German UBA, Malaysian DOSH
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Quantity a standard compares against its thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Co2Basis {
    /// Indoor concentration minus outdoor concentration
    IndoorOutdoorDelta,
    /// Indoor concentration alone
    IndoorAbsolute,
}

/// Upper bound of one category in ppm
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    /// Boundary value in ppm
    pub limit_ppm: f64,
    /// Whether a value equal to the boundary still belongs to the category
    pub inclusive: bool,
}

impl Threshold {
    /// Category admits values `<= limit`
    #[must_use]
    pub const fn at_most(limit_ppm: f64) -> Self {
        Self {
            limit_ppm,
            inclusive: true,
        }
    }

    /// Category admits values `< limit`
    #[must_use]
    pub const fn below(limit_ppm: f64) -> Self {
        Self {
            limit_ppm,
            inclusive: false,
        }
    }

    /// Whether `value` falls inside the category bounded by this threshold
    #[must_use]
    pub fn admits(&self, value: f64) -> bool {
        if self.inclusive {
            value <= self.limit_ppm
        } else {
            value < self.limit_ppm
        }
    }
}

// Decision tables. Thresholds are ascending; index N+1 is everything above the last one.
const EN_THRESHOLDS: [Threshold; 3] = [
    Threshold::at_most(550.0),
    Threshold::at_most(800.0),
    Threshold::at_most(1350.0),
];
const SINGLE_1000_THRESHOLD: [Threshold; 1] = [Threshold::at_most(1000.0)];
const SS_THRESHOLDS: [Threshold; 1] = [Threshold::at_most(700.0)];
const HK_THRESHOLDS: [Threshold; 2] = [Threshold::at_most(800.0), Threshold::at_most(1000.0)];
// UBA's first boundary is exclusive: exactly 1000 ppm is already "conspicuous".
const UBA_THRESHOLDS: [Threshold; 2] = [Threshold::below(1000.0), Threshold::at_most(2000.0)];

// Category labels, one per index. Each table is exactly one longer than its thresholds.
const EN_LABELS: [&str; 4] = ["Excellent", "Good", "Moderate", "Bad"];
const BINARY_LABELS: [&str; 2] = ["Acceptable", "Unacceptable"];
const HK_LABELS: [&str; 3] = ["Excellent", "Good", "Unacceptable"];
const UBA_LABELS: [&str; 3] = ["Safe", "Conspicuous", "Unacceptable"];

/// Regional standard used to assess indoor air quality from CO2
///
/// The set is closed: every variant owns exactly one decision table and one
/// label table, and adding a variant forces both to be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum IaqStandard {
    /// CEN/EN 16798-1:2019, categories I-IV on the indoor/outdoor difference
    #[default]
    #[serde(rename = "EN")]
    En,
    /// Japanese Law for Environmental Health in Buildings
    #[serde(rename = "LEHB")]
    Lehb,
    /// Singapore Standard SS 554:2016, on the indoor/outdoor difference
    #[serde(rename = "SS")]
    Ss,
    /// Hong Kong EPD guidance notes for offices and public places
    #[serde(rename = "HK")]
    Hk,
    /// German Umweltbundesamt health assessment of indoor CO2 (2008)
    #[serde(rename = "UBA")]
    Uba,
    /// Malaysian DOSH Industry Code of Practice on IAQ 2010
    #[serde(rename = "DOSH")]
    Dosh,
}

impl IaqStandard {
    /// Every supported standard, in canonical order
    pub const ALL: [Self; 6] = [
        Self::En,
        Self::Lehb,
        Self::Ss,
        Self::Hk,
        Self::Uba,
        Self::Dosh,
    ];

    /// Canonical identifiers of every supported standard
    pub const NAMES: [&'static str; 6] = ["EN", "LEHB", "SS", "HK", "UBA", "DOSH"];

    /// Canonical identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Lehb => "LEHB",
            Self::Ss => "SS",
            Self::Hk => "HK",
            Self::Uba => "UBA",
            Self::Dosh => "DOSH",
        }
    }

    /// Quantity compared against the thresholds
    #[must_use]
    pub const fn basis(&self) -> Co2Basis {
        match self {
            Self::En | Self::Ss => Co2Basis::IndoorOutdoorDelta,
            Self::Lehb | Self::Hk | Self::Uba | Self::Dosh => Co2Basis::IndoorAbsolute,
        }
    }

    /// Ascending category boundaries
    #[must_use]
    pub const fn thresholds(&self) -> &'static [Threshold] {
        match self {
            Self::En => &EN_THRESHOLDS,
            Self::Lehb | Self::Dosh => &SINGLE_1000_THRESHOLD,
            Self::Ss => &SS_THRESHOLDS,
            Self::Hk => &HK_THRESHOLDS,
            Self::Uba => &UBA_THRESHOLDS,
        }
    }

    /// Category labels indexed by `index - 1`
    #[must_use]
    pub const fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::En => &EN_LABELS,
            Self::Lehb | Self::Ss | Self::Dosh => &BINARY_LABELS,
            Self::Hk => &HK_LABELS,
            Self::Uba => &UBA_LABELS,
        }
    }

    /// Number of categories; the worst index equals this value
    #[must_use]
    pub const fn category_count(&self) -> usize {
        self.thresholds().len() + 1
    }

    /// Title of the publication the decision table comes from
    #[must_use]
    pub const fn reference(&self) -> &'static str {
        match self {
            Self::En => "DIN EN 16798-1:2019, p. 55",
            Self::Lehb => "Law for Environmental Health in Buildings (Japan)",
            Self::Ss => "SS 554:2016, p. 22",
            Self::Hk => "HK EPD Guidance Notes for the Management of IAQ in Offices and Public Places, p. 17",
            Self::Uba => "Gesundheitsschutz 11-2008, Bewertung von Kohlendioxid in der Innenraumluft, p. 1368",
            Self::Dosh => "Industry Code of Practice on Indoor Air Quality 2010 (Malaysia)",
        }
    }

    /// Index of a single sample; 1 is the best category
    #[must_use]
    pub fn index_for(&self, co2_indoor: f64, co2_outdoor: f64) -> u8 {
        let value = match self.basis() {
            Co2Basis::IndoorOutdoorDelta => co2_indoor - co2_outdoor,
            Co2Basis::IndoorAbsolute => co2_indoor,
        };
        let thresholds = self.thresholds();
        let position = thresholds
            .iter()
            .position(|threshold| threshold.admits(value))
            .unwrap_or(thresholds.len());
        // At most four categories per standard
        (position + 1) as u8
    }

    /// Category label for an index produced by this standard
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` if `index` is 0 or greater than the
    /// standard's category count
    pub fn label(&self, index: u8) -> AppResult<&'static str> {
        usize::from(index)
            .checked_sub(1)
            .and_then(|slot| self.labels().get(slot).copied())
            .ok_or_else(|| {
                AppError::value_out_of_range(format!(
                    "{} defines indices 1..={}, got {index}",
                    self.as_str(),
                    self.category_count()
                ))
            })
    }
}

impl fmt::Display for IaqStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IaqStandard {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|standard| standard.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::unknown_standard(s, &Self::NAMES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_tables_match_decision_tables() {
        for standard in IaqStandard::ALL {
            assert_eq!(
                standard.labels().len(),
                standard.category_count(),
                "{standard} label table out of step with its thresholds"
            );
        }
    }

    #[test]
    fn test_thresholds_ascend() {
        for standard in IaqStandard::ALL {
            let limits: Vec<f64> = standard.thresholds().iter().map(|t| t.limit_ppm).collect();
            assert!(limits.windows(2).all(|pair| pair[0] < pair[1]), "{standard}");
        }
    }

    #[test]
    fn test_names_follow_canonical_order() {
        let names: Vec<&str> = IaqStandard::ALL.iter().map(IaqStandard::as_str).collect();
        assert_eq!(names, IaqStandard::NAMES);
    }
}
