//! Isotope domain model.
//!
//! # Responsibility
//! - Describe one radionuclide by mass, symbol and half-life.
//! - Normalize the half-life to seconds once, at construction.
//!
//! # Invariants
//! - `halflife_seconds > 0` for every constructed isotope.
//! - `label` defaults to `"{mass}-{name}"` and is the registry lookup key.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Unit a half-life is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HalfLifeUnit {
    Minutes,
    Hours,
    Days,
}

impl HalfLifeUnit {
    /// Seconds in one unit.
    pub fn seconds(self) -> f64 {
        match self {
            Self::Minutes => 60.0,
            Self::Hours => 3_600.0,
            Self::Days => 86_400.0,
        }
    }

    /// Short display form (`m|h|d`).
    pub fn abbreviation(self) -> &'static str {
        match self {
            Self::Minutes => "m",
            Self::Hours => "h",
            Self::Days => "d",
        }
    }
}

impl Display for HalfLifeUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Construction-time isotope errors.
#[derive(Debug, Clone, PartialEq)]
pub enum IsotopeError {
    /// Half-life must be finite and strictly positive.
    NonPositiveHalfLife { label: String, halflife: f64 },
    EmptyName,
}

impl Display for IsotopeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveHalfLife { label, halflife } => write!(
                f,
                "isotope `{label}` has non-positive half-life {halflife}"
            ),
            Self::EmptyName => write!(f, "isotope name must not be empty"),
        }
    }
}

impl Error for IsotopeError {}

/// One catalogued radionuclide.
///
/// Serialize-only: instances are built through the validating constructors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Isotope {
    /// Nucleon count. Only used for ordering.
    pub mass: u32,
    /// Element symbol, may carry a metastable marker (`mTc`).
    pub name: String,
    /// Half-life in `halflife_unit`.
    pub halflife: f64,
    pub halflife_unit: HalfLifeUnit,
    /// Display and lookup key.
    pub label: String,
    halflife_seconds: f64,
}

impl Isotope {
    /// Creates an isotope with the default `"{mass}-{name}"` label.
    pub fn new(
        mass: u32,
        name: impl Into<String>,
        halflife: f64,
        halflife_unit: HalfLifeUnit,
    ) -> Result<Self, IsotopeError> {
        let name = name.into();
        let label = format!("{mass}-{name}");
        Self::with_label(mass, name, halflife, halflife_unit, label)
    }

    /// Creates an isotope with an explicit label (`99m-Tc`).
    pub fn with_label(
        mass: u32,
        name: impl Into<String>,
        halflife: f64,
        halflife_unit: HalfLifeUnit,
        label: impl Into<String>,
    ) -> Result<Self, IsotopeError> {
        let name = name.into();
        let label = label.into();
        if name.trim().is_empty() {
            return Err(IsotopeError::EmptyName);
        }
        let halflife_seconds = halflife * halflife_unit.seconds();
        if !halflife_seconds.is_finite() || halflife_seconds <= 0.0 {
            return Err(IsotopeError::NonPositiveHalfLife { label, halflife });
        }
        Ok(Self {
            mass,
            name,
            halflife,
            halflife_unit,
            label,
            halflife_seconds,
        })
    }

    /// Half-life normalized to seconds.
    pub fn halflife_seconds(&self) -> f64 {
        self.halflife_seconds
    }

    /// Selector caption, e.g. `Halflife: 109.771 m`.
    pub fn halflife_text(&self) -> String {
        format!("Halflife: {} {}", self.halflife, self.halflife_unit)
    }
}
