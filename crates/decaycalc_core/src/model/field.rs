//! Decay slots and parsed input fields.
//!
//! # Responsibility
//! - Name the four slots of a decay problem.
//! - Keep raw text, parsed value and validity together as one value.
//!
//! # Invariants
//! - An empty (or whitespace-only) raw text is always `FieldValue::Absent`.
//! - `FieldValue::Invalid` is never counted as a present value.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One of the four decay problem fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Start timestamp.
    T0,
    /// End timestamp.
    T1,
    /// Activity at `t0`.
    A0,
    /// Activity at `t1`.
    A1,
}

impl Slot {
    /// All slots in canonical order.
    pub const ALL: [Slot; 4] = [Slot::T0, Slot::T1, Slot::A0, Slot::A1];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::T0 => "t0",
            Self::T1 => "t1",
            Self::A0 => "A0",
            Self::A1 => "A1",
        }
    }

    /// Whether the slot holds a timestamp (as opposed to an activity).
    pub fn is_time(self) -> bool {
        matches!(self, Self::T0 | Self::T1)
    }
}

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validity of one field, as reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Absent,
    Valid,
    Invalid,
}

/// Parsed state of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<T> {
    Absent,
    Valid(T),
    /// Text was present but did not parse; `reason` is diagnostic only.
    Invalid { reason: String },
}

/// Raw field text paired with its parsed state.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedField<T> {
    pub raw: String,
    pub value: FieldValue<T>,
}

impl<T> ParsedField<T> {
    /// Parses `raw` with `parse`, treating blank text as absent.
    pub fn parse_with<F>(raw: impl Into<String>, parse: F) -> Self
    where
        F: FnOnce(&str) -> Result<T, String>,
    {
        let raw = raw.into();
        let trimmed = raw.trim();
        let value = if trimmed.is_empty() {
            FieldValue::Absent
        } else {
            match parse(trimmed) {
                Ok(value) => FieldValue::Valid(value),
                Err(reason) => FieldValue::Invalid { reason },
            }
        };
        Self { raw, value }
    }

    pub fn absent() -> Self {
        Self {
            raw: String::new(),
            value: FieldValue::Absent,
        }
    }

    pub fn status(&self) -> FieldStatus {
        match self.value {
            FieldValue::Absent => FieldStatus::Absent,
            FieldValue::Valid(_) => FieldStatus::Valid,
            FieldValue::Invalid { .. } => FieldStatus::Invalid,
        }
    }

    /// Why the text failed to parse, for invalid fields only.
    pub fn invalid_reason(&self) -> Option<&str> {
        match &self.value {
            FieldValue::Invalid { reason } => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Parsed value when present and valid.
    pub fn valid(&self) -> Option<&T> {
        match &self.value {
            FieldValue::Valid(value) => Some(value),
            _ => None,
        }
    }
}
