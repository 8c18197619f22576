//! Exponential decay solver.
//!
//! # Responsibility
//! - Fill the one missing slot of a validated problem via the decay law
//!   `A(t) = A(t_ref) * 2^(-(t - t_ref) / H)`.
//! - Derive elapsed time and activity ratio once all four slots are known.
//!
//! # Invariants
//! - All exponentials and logarithms are base 2.
//! - Pure: output depends only on the target and `H`.
//! - Negative elapsed time is accepted and yields growth.

mod error;

pub use error::{InvalidField, SolveError, SolveResult};

use crate::model::field::Slot;
use crate::model::problem::{DecayResult, SolveTarget};
use crate::parse::{from_epoch_seconds, to_epoch_seconds};
use chrono::NaiveDateTime;

/// Solves `target` for a half-life of `halflife_seconds`.
///
/// # Errors
/// - `NonPositiveRatio` when a timestamp is solved and `a0 / a1 <= 0`
///   (including `a1 == 0`).
/// - `TimestampOutOfRange` when a solved timestamp cannot be represented.
/// - `ActivityOutOfRange` when a solved activity overflows or is `NaN`.
/// - `DivisionByZero` when the final `a1 / a0` ratio has `a0 == 0`.
pub fn solve(target: &SolveTarget, halflife_seconds: f64) -> SolveResult<DecayResult> {
    let solved = target.slot();
    let (t0, t1, s0, s1, a0, a1) = match *target {
        SolveTarget::EndActivity { t0, t1, a0 } => {
            let (s0, s1) = (to_epoch_seconds(&t0), to_epoch_seconds(&t1));
            let a1 = a0 * decay_factor(s1 - s0, halflife_seconds);
            (t0, t1, s0, s1, a0, a1)
        }
        SolveTarget::StartActivity { t0, t1, a1 } => {
            let (s0, s1) = (to_epoch_seconds(&t0), to_epoch_seconds(&t1));
            let a0 = a1 * ((s1 - s0) / halflife_seconds).exp2();
            (t0, t1, s0, s1, a0, a1)
        }
        SolveTarget::StartTime { t1, a0, a1 } => {
            let s1 = to_epoch_seconds(&t1);
            let s0 = s1 - elapsed_between(a0, a1, halflife_seconds)?;
            let t0 = timestamp_at(s0, Slot::T0)?;
            (t0, t1, s0, s1, a0, a1)
        }
        SolveTarget::EndTime { t0, a0, a1 } => {
            let s0 = to_epoch_seconds(&t0);
            let s1 = s0 + elapsed_between(a0, a1, halflife_seconds)?;
            let t1 = timestamp_at(s1, Slot::T1)?;
            (t0, t1, s0, s1, a0, a1)
        }
    };

    let solved_activity = match solved {
        Slot::A0 => Some(a0),
        Slot::A1 => Some(a1),
        Slot::T0 | Slot::T1 => None,
    };
    if solved_activity.is_some_and(|value| !value.is_finite()) {
        return Err(SolveError::ActivityOutOfRange { slot: solved });
    }

    if a0 == 0.0 {
        return Err(SolveError::DivisionByZero {
            numerator: Slot::A1,
            denominator: Slot::A0,
        });
    }

    Ok(DecayResult {
        t0,
        t1,
        a0,
        a1,
        elapsed_seconds: s1 - s0,
        ratio: a1 / a0,
        solved,
    })
}

/// Fraction of activity left after `elapsed` seconds.
pub fn decay_factor(elapsed: f64, halflife_seconds: f64) -> f64 {
    (-elapsed / halflife_seconds).exp2()
}

/// Time for activity to go from `a0` to `a1`: `H * log2(a0 / a1)`.
pub fn elapsed_between(a0: f64, a1: f64, halflife_seconds: f64) -> SolveResult<f64> {
    if a1 == 0.0 {
        return Err(SolveError::NonPositiveRatio { a0, a1 });
    }
    let ratio = a0 / a1;
    if ratio.is_nan() || ratio <= 0.0 {
        return Err(SolveError::NonPositiveRatio { a0, a1 });
    }
    Ok(halflife_seconds * ratio.log2())
}

fn timestamp_at(seconds: f64, slot: Slot) -> SolveResult<NaiveDateTime> {
    from_epoch_seconds(seconds).ok_or(SolveError::TimestampOutOfRange { slot })
}
