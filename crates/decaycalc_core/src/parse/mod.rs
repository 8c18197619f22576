//! Text parsing and display formatting for decay fields.
//!
//! # Responsibility
//! - Turn raw field text into timestamps and activities.
//! - Render solved values back into the fixed wire formats.
//!
//! # Invariants
//! - Timestamps are read and written as `DD-MM-YYYY HH:MM` (24-hour clock).
//! - Parsing never panics on user text.

mod display;
mod timestamp;

pub use display::{format_activity, format_elapsed, format_ratio};
pub use timestamp::{
    format_timestamp, from_epoch_seconds, parse_timestamp, to_epoch_seconds, TIMESTAMP_FORMAT,
};

/// Parses an activity as a finite real number.
///
/// Sign is not checked here; non-positive activities only fail where a
/// logarithm or quotient needs them.
pub fn parse_activity(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|err| format!("`{trimmed}` is not a number: {err}"))?;
    if !value.is_finite() {
        return Err(format!("`{trimmed}` is not a finite number"));
    }
    Ok(value)
}
