//! Solver error taxonomy.

use crate::model::field::Slot;
use crate::registry::RegistryError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SolveResult<T> = Result<T, SolveError>;

/// One present field whose text failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField {
    pub slot: Slot,
    pub reason: String,
}

/// Recoverable calculation error; resubmitting corrected input clears it.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// Present fields whose text failed to parse.
    Parse { fields: Vec<InvalidField> },
    /// Fewer than three valid fields.
    InsufficientInput { present: usize },
    /// All four fields given; nothing left to solve.
    OverspecifiedInput,
    /// `a0 / a1` is not strictly positive, so no elapsed time exists.
    NonPositiveRatio { a0: f64, a1: f64 },
    /// A ratio was requested with a zero denominator.
    DivisionByZero { numerator: Slot, denominator: Slot },
    UnknownIsotope(String),
    /// Registry failure other than a missing label.
    Registry(RegistryError),
    /// A solved timestamp is outside the representable calendar range.
    TimestampOutOfRange { slot: Slot },
    /// A solved activity overflowed or is undefined (`inf`, `NaN`).
    ActivityOutOfRange { slot: Slot },
}

impl SolveError {
    /// Fields a caller should flag for this error.
    pub fn offending_slots(&self) -> Vec<Slot> {
        match self {
            Self::Parse { fields } => fields.iter().map(|field| field.slot).collect(),
            Self::NonPositiveRatio { .. } => vec![Slot::A0, Slot::A1],
            Self::DivisionByZero { denominator, .. } => vec![*denominator],
            Self::TimestampOutOfRange { slot } | Self::ActivityOutOfRange { slot } => vec![*slot],
            Self::InsufficientInput { .. }
            | Self::OverspecifiedInput
            | Self::UnknownIsotope(_)
            | Self::Registry(_) => Vec::new(),
        }
    }
}

impl Display for SolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { fields } => {
                let details = fields
                    .iter()
                    .map(|field| format!("{} ({})", field.slot, field.reason))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "could not parse field(s): {details}")
            }
            Self::InsufficientInput { present } => {
                write!(f, "need more info: {present} of 3 required fields given")
            }
            Self::OverspecifiedInput => write!(f, "clear one value: all four fields are given"),
            Self::NonPositiveRatio { a0, a1 } => write!(
                f,
                "activity ratio A0/A1 must be positive (A0={a0}, A1={a1})"
            ),
            Self::DivisionByZero {
                numerator,
                denominator,
            } => write!(f, "cannot divide {numerator} by zero {denominator}"),
            Self::UnknownIsotope(label) => write!(f, "unknown isotope: {label}"),
            Self::Registry(err) => write!(f, "{err}"),
            Self::TimestampOutOfRange { slot } => {
                write!(f, "solved {slot} is outside the supported date range")
            }
            Self::ActivityOutOfRange { slot } => {
                write!(f, "solved {slot} is not a finite activity")
            }
        }
    }
}

impl Error for SolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Registry(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RegistryError> for SolveError {
    fn from(value: RegistryError) -> Self {
        match value {
            RegistryError::UnknownIsotope(label) => Self::UnknownIsotope(label),
            other => Self::Registry(other),
        }
    }
}
