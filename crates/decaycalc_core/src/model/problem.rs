//! Decay problem and result model.
//!
//! # Responsibility
//! - Hold the four parsed fields of one calculation plus its isotope.
//! - Decide which slot is the solve target, or why none can be chosen.
//!
//! # Invariants
//! - Any invalid field wins over count mismatches when validating.
//! - A `SolveTarget` is only produced with exactly three valid fields.

use crate::model::field::{FieldStatus, ParsedField, Slot};
use crate::model::isotope::Isotope;
use crate::parse::{parse_activity, parse_timestamp};
use crate::solver::{self, InvalidField, SolveError, SolveResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Raw text of the four slots, blank meaning "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFields {
    #[serde(default)]
    pub t0: String,
    #[serde(default)]
    pub t1: String,
    #[serde(default)]
    pub a0: String,
    #[serde(default)]
    pub a1: String,
}

impl RawFields {
    /// Parse status of every slot, without solving.
    pub fn statuses(&self) -> [(Slot, FieldStatus); 4] {
        Slot::ALL.map(|slot| {
            let raw = self.get(slot);
            let status = if slot.is_time() {
                ParsedField::parse_with(raw, parse_timestamp).status()
            } else {
                ParsedField::parse_with(raw, parse_activity).status()
            };
            (slot, status)
        })
    }

    pub fn get(&self, slot: Slot) -> &str {
        match slot {
            Slot::T0 => &self.t0,
            Slot::T1 => &self.t1,
            Slot::A0 => &self.a0,
            Slot::A1 => &self.a1,
        }
    }

    pub fn set(&mut self, slot: Slot, value: impl Into<String>) {
        let value = value.into();
        match slot {
            Slot::T0 => self.t0 = value,
            Slot::T1 => self.t1 = value,
            Slot::A0 => self.a0 = value,
            Slot::A1 => self.a1 = value,
        }
    }
}

/// Raw calculation input as supplied by a front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecayRequest {
    /// Isotope label, e.g. `18-F`.
    pub isotope: String,
    #[serde(flatten)]
    pub fields: RawFields,
}

/// The three known values of a problem, tagged by the slot to solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolveTarget {
    StartActivity {
        t0: NaiveDateTime,
        t1: NaiveDateTime,
        a1: f64,
    },
    EndActivity {
        t0: NaiveDateTime,
        t1: NaiveDateTime,
        a0: f64,
    },
    StartTime {
        t1: NaiveDateTime,
        a0: f64,
        a1: f64,
    },
    EndTime {
        t0: NaiveDateTime,
        a0: f64,
        a1: f64,
    },
}

impl SolveTarget {
    /// Slot this target fills.
    pub fn slot(&self) -> Slot {
        match self {
            Self::StartActivity { .. } => Slot::A0,
            Self::EndActivity { .. } => Slot::A1,
            Self::StartTime { .. } => Slot::T0,
            Self::EndTime { .. } => Slot::T1,
        }
    }
}

/// Fully populated outcome of a solve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecayResult {
    pub t0: NaiveDateTime,
    pub t1: NaiveDateTime,
    pub a0: f64,
    pub a1: f64,
    /// `t1 - t0`, signed.
    pub elapsed_seconds: f64,
    /// `a1 / a0`.
    pub ratio: f64,
    /// Slot that was computed.
    pub solved: Slot,
}

/// One calculation request bound to an isotope.
#[derive(Debug, Clone, PartialEq)]
pub struct DecayProblem<'r> {
    pub t0: ParsedField<NaiveDateTime>,
    pub t1: ParsedField<NaiveDateTime>,
    pub a0: ParsedField<f64>,
    pub a1: ParsedField<f64>,
    pub isotope: &'r Isotope,
}

impl<'r> DecayProblem<'r> {
    /// Parses every field independently; never fails.
    pub fn parse(raw: &RawFields, isotope: &'r Isotope) -> Self {
        Self {
            t0: ParsedField::parse_with(raw.t0.as_str(), parse_timestamp),
            t1: ParsedField::parse_with(raw.t1.as_str(), parse_timestamp),
            a0: ParsedField::parse_with(raw.a0.as_str(), parse_activity),
            a1: ParsedField::parse_with(raw.a1.as_str(), parse_activity),
            isotope,
        }
    }

    pub fn status(&self, slot: Slot) -> FieldStatus {
        match slot {
            Slot::T0 => self.t0.status(),
            Slot::T1 => self.t1.status(),
            Slot::A0 => self.a0.status(),
            Slot::A1 => self.a1.status(),
        }
    }

    /// Parse failure text of an invalid slot.
    pub fn invalid_reason(&self, slot: Slot) -> Option<&str> {
        match slot {
            Slot::T0 => self.t0.invalid_reason(),
            Slot::T1 => self.t1.invalid_reason(),
            Slot::A0 => self.a0.invalid_reason(),
            Slot::A1 => self.a1.invalid_reason(),
        }
    }

    /// Per-slot status in canonical slot order.
    pub fn statuses(&self) -> [(Slot, FieldStatus); 4] {
        Slot::ALL.map(|slot| (slot, self.status(slot)))
    }

    /// Picks the solve target.
    ///
    /// # Errors
    /// - `Parse` when any field is invalid, listing every invalid slot and why.
    /// - `InsufficientInput` with fewer than three valid fields.
    /// - `OverspecifiedInput` with all four fields valid.
    pub fn validate(&self) -> SolveResult<SolveTarget> {
        let invalid: Vec<InvalidField> = Slot::ALL
            .into_iter()
            .filter_map(|slot| {
                self.invalid_reason(slot).map(|reason| InvalidField {
                    slot,
                    reason: reason.to_string(),
                })
            })
            .collect();
        if !invalid.is_empty() {
            return Err(SolveError::Parse { fields: invalid });
        }

        let present = Slot::ALL
            .into_iter()
            .filter(|slot| self.status(*slot) == FieldStatus::Valid)
            .count();
        if present < 3 {
            return Err(SolveError::InsufficientInput { present });
        }
        if present > 3 {
            return Err(SolveError::OverspecifiedInput);
        }

        let t0 = self.t0.valid().copied();
        let t1 = self.t1.valid().copied();
        let a0 = self.a0.valid().copied();
        let a1 = self.a1.valid().copied();
        match (t0, t1, a0, a1) {
            (Some(t0), Some(t1), None, Some(a1)) => Ok(SolveTarget::StartActivity { t0, t1, a1 }),
            (Some(t0), Some(t1), Some(a0), None) => Ok(SolveTarget::EndActivity { t0, t1, a0 }),
            (None, Some(t1), Some(a0), Some(a1)) => Ok(SolveTarget::StartTime { t1, a0, a1 }),
            (Some(t0), None, Some(a0), Some(a1)) => Ok(SolveTarget::EndTime { t0, a0, a1 }),
            _ => Err(SolveError::InsufficientInput { present }),
        }
    }

    /// Validates and solves against this problem's isotope.
    pub fn solve(&self) -> SolveResult<DecayResult> {
        let target = self.validate()?;
        solver::solve(&target, self.isotope.halflife_seconds())
    }
}
