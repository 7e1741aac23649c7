// ABOUTME: Reference garment ensembles with clo values from ASHRAE 55 and ISO 9920
// ABOUTME: Indoor catalogs per population type, outdoor layers, and first-tie-wins nearest lookup
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # Garment Ensembles
//!
//! Catalog values are whole-ensemble insulation (clo) for typical combinations.
//! Indoor catalogs differ only in presentation style; outdoor entries are
//! layers added on top of whatever indoor ensemble is worn.
//!
//! References:
//! - ANSI/ASHRAE Standard 55-2020, Table 5-2 (ensembles)
//! - ISO 9920:2007, Annex B (outer garments)

use crate::errors::AppError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A named garment combination and its insulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Garment {
    /// Human-readable description
    pub label: &'static str,
    /// Insulation in clo
    pub clo: f64,
}

impl Garment {
    const fn new(label: &'static str, clo: f64) -> Self {
        Self { label, clo }
    }
}

/// Indoor ensembles, trouser-based presentation
pub const INDOOR_GARMENTS_A: [Garment; 8] = [
    Garment::new("Walking shorts, short-sleeve shirt", 0.36),
    Garment::new("Trousers, short-sleeve shirt, socks, shoes, underwear", 0.57),
    Garment::new("Trousers, long-sleeve shirt", 0.61),
    Garment::new("Sweat pants, long-sleeve sweatshirt", 0.74),
    Garment::new("Sweat pants, long-sleeve sweatshirt, boots", 0.82),
    Garment::new("Trousers, long-sleeve shirt plus suit jacket", 0.96),
    Garment::new("Trousers, long-sleeve shirt plus long-sleeve sweater, t-shirt", 1.01),
    Garment::new("Trousers, long-sleeve shirt plus suit jacket, vest, t-shirt", 1.14),
];

/// Indoor ensembles, skirt and dress presentation
pub const INDOOR_GARMENTS_B: [Garment; 8] = [
    Garment::new("Walking shorts, short-sleeve shirt", 0.36),
    Garment::new("Thin long-sleeve shirtdress", 0.41),
    Garment::new("Knee-length skirt, short-sleeve shirt, sandals", 0.54),
    Garment::new("Knee-length skirt, long-sleeve shirt, full slip", 0.67),
    Garment::new("Sweat pants, long-sleeve sweatshirt", 0.74),
    Garment::new("Sweat pants, long-sleeve sweatshirt, boots", 0.82),
    Garment::new("Knee-length skirt, long-sleeve shirt, half slip, suit jacket", 1.04),
    Garment::new("Knee-length skirt, long-sleeve shirt, half slip, long-sleeve sweater", 1.10),
];

/// Outer layers added to an indoor ensemble, by additional clo
pub const OUTDOOR_GARMENTS: [Garment; 9] = [
    Garment::new("No additional jacket needed", 0.0),
    Garment::new("Vest", 0.17),
    Garment::new("Light jacket", 0.249),
    Garment::new("Jacket", 0.351),
    Garment::new("Heavy jacket", 0.4),
    Garment::new("Down jacket", 0.55),
    Garment::new("Parka", 0.7),
    Garment::new("Heavy Parka", 0.8),
    Garment::new("Heavy Parka, thick socks and gloves", 1.0),
];

/// Presentation style selecting the indoor catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PopulationType {
    /// Trousers and shirts
    #[default]
    #[serde(rename = "A", alias = "a")]
    A,
    /// Skirts and dresses
    #[serde(rename = "B", alias = "b")]
    B,
}

impl PopulationType {
    /// Canonical identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }

    /// Indoor catalog for this population, in declared order
    #[must_use]
    pub const fn indoor_catalog(&self) -> &'static [Garment] {
        match self {
            Self::A => &INDOOR_GARMENTS_A,
            Self::B => &INDOOR_GARMENTS_B,
        }
    }

    /// Nearest indoor ensemble to `clo`
    #[must_use]
    pub fn nearest_indoor(&self, clo: f64) -> Garment {
        // Catalogs are non-empty constants
        nearest(self.indoor_catalog(), clo).unwrap_or(INDOOR_GARMENTS_A[0])
    }
}

impl fmt::Display for PopulationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PopulationType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            other => Err(AppError::invalid_input(format!(
                "Invalid population type '{other}'. Valid options: A, B"
            ))),
        }
    }
}

/// Entry whose clo is closest to `clo`; the first of equidistant entries wins
///
/// A NaN `clo` is equidistant to everything and yields the first entry.
#[must_use]
pub fn nearest(catalog: &[Garment], clo: f64) -> Option<Garment> {
    let mut best: Option<(Garment, f64)> = None;
    for garment in catalog {
        let distance = (garment.clo - clo).abs();
        match best {
            // Only a strictly smaller distance replaces the current entry
            Some((_, best_distance))
                if distance.partial_cmp(&best_distance) != Some(Ordering::Less) => {}
            _ => best = Some((*garment, distance)),
        }
    }
    best.map(|(garment, _)| garment)
}

/// Nearest outer layer to an additional insulation value
#[must_use]
pub fn nearest_outdoor(extra_clo: f64) -> Garment {
    nearest(&OUTDOOR_GARMENTS, extra_clo).unwrap_or(OUTDOOR_GARMENTS[0])
}
