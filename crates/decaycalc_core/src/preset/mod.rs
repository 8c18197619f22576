//! Named input presets.
//!
//! # Responsibility
//! - Describe fixed bundles of isotope and slot values.
//! - Resolve "current time" slots from a clock value the caller injects.
//!
//! # Invariants
//! - Every preset fills three slots and leaves exactly one of `t1`/`A1` empty.
//! - Resolution never reads the wall clock.

use crate::model::field::Slot;
use crate::model::problem::{DecayRequest, RawFields};
use crate::parse::format_timestamp;
use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Template value of one preset slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetValue {
    Empty,
    Text(&'static str),
    /// Filled with the injected clock at resolution time.
    Now,
}

/// A named, pre-filled calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub isotope_label: &'static str,
    pub t0: PresetValue,
    pub t1: PresetValue,
    pub a0: PresetValue,
    pub a1: PresetValue,
}

const PRESETS: &[Preset] = &[
    Preset {
        name: "FDG vandaag",
        isotope_label: "18-F",
        t0: PresetValue::Now,
        t1: PresetValue::Now,
        a0: PresetValue::Text("100.0"),
        a1: PresetValue::Empty,
    },
    Preset {
        name: "Oude tonnetje",
        isotope_label: "68-Ge",
        t0: PresetValue::Text("10-11-2010 12:00"),
        t1: PresetValue::Now,
        a0: PresetValue::Text("83.58"),
        a1: PresetValue::Empty,
    },
    Preset {
        name: "Nieuwe tonnetje",
        isotope_label: "68-Ge",
        t0: PresetValue::Text("01-06-2012 12:00"),
        t1: PresetValue::Now,
        a0: PresetValue::Text("74.41"),
        a1: PresetValue::Empty,
    },
];

/// Preset lookup errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    UnknownPreset(String),
}

impl Display for PresetError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPreset(name) => write!(f, "unknown preset: {name}"),
        }
    }
}

impl Error for PresetError {}

/// Built-in presets in menu order.
pub fn presets() -> &'static [Preset] {
    PRESETS
}

/// Preset selected when a front end starts.
pub fn default_preset() -> &'static Preset {
    &PRESETS[0]
}

/// Finds a preset by exact name (surrounding whitespace ignored).
pub fn preset_by_name(name: &str) -> Result<&'static Preset, PresetError> {
    let name = name.trim();
    PRESETS
        .iter()
        .find(|preset| preset.name == name)
        .ok_or_else(|| PresetError::UnknownPreset(name.to_string()))
}

impl Preset {
    pub fn value(&self, slot: Slot) -> PresetValue {
        match slot {
            Slot::T0 => self.t0,
            Slot::T1 => self.t1,
            Slot::A0 => self.a0,
            Slot::A1 => self.a1,
        }
    }

    /// Fills the template, using `now` for every `Now` slot.
    pub fn resolve(&self, now: NaiveDateTime) -> DecayRequest {
        let now_text = format_timestamp(&now);
        let mut fields = RawFields::default();
        for slot in Slot::ALL {
            match self.value(slot) {
                PresetValue::Empty => {}
                PresetValue::Text(text) => fields.set(slot, text),
                PresetValue::Now => fields.set(slot, now_text.as_str()),
            }
        }
        DecayRequest {
            isotope: self.isotope_label.to_string(),
            fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{default_preset, preset_by_name, presets, PresetError, PresetValue};
    use crate::model::field::Slot;
    use crate::parse::parse_timestamp;

    #[test]
    fn every_preset_leaves_exactly_one_end_slot_empty() {
        for preset in presets() {
            let empty: Vec<Slot> = Slot::ALL
                .into_iter()
                .filter(|slot| preset.value(*slot) == PresetValue::Empty)
                .collect();
            assert_eq!(empty.len(), 1, "{}", preset.name);
            assert!(matches!(empty[0], Slot::T1 | Slot::A1), "{}", preset.name);
        }
    }

    #[test]
    fn resolve_injects_clock() {
        let now = parse_timestamp("19-10-2026 08:30").unwrap();
        let request = preset_by_name("Oude tonnetje").unwrap().resolve(now);
        assert_eq!(request.isotope, "68-Ge");
        assert_eq!(request.fields.t0, "10-11-2010 12:00");
        assert_eq!(request.fields.t1, "19-10-2026 08:30");
        assert_eq!(request.fields.a0, "83.58");
        assert_eq!(request.fields.a1, "");
    }

    #[test]
    fn default_preset_starts_now() {
        let now = parse_timestamp("01-01-2024 00:00").unwrap();
        let request = default_preset().resolve(now);
        assert_eq!(request.fields.t0, request.fields.t1);
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            preset_by_name("Oud").unwrap_err(),
            PresetError::UnknownPreset("Oud".to_string())
        );
    }
}
