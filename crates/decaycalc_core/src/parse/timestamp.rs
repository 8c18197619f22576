//! Timestamp field parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;

/// `chrono` pattern of the timestamp wire format.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M";

// Day, month and hour may be written without zero padding on input.
static TIMESTAMP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,2})-(\d{1,2})-(\d{4})\s+(\d{1,2}):(\d{2})$").expect("valid timestamp regex")
});

/// Parses `DD-MM-YYYY HH:MM` into a calendar timestamp.
///
/// # Errors
/// - Text does not match the pattern.
/// - Components do not form a real date or time (`31-13-2024`, `25:00`).
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    let captures = TIMESTAMP_RE
        .captures(trimmed)
        .ok_or_else(|| format!("`{trimmed}` does not match DD-MM-YYYY HH:MM"))?;

    let number = |index: usize| -> Result<u32, String> {
        captures[index]
            .parse::<u32>()
            .map_err(|err| format!("`{trimmed}` has a bad component: {err}"))
    };
    let day = number(1)?;
    let month = number(2)?;
    let year = number(3)? as i32;
    let hour = number(4)?;
    let minute = number(5)?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| format!("`{trimmed}` is not a valid calendar date"))?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)
        .ok_or_else(|| format!("`{trimmed}` is not a valid time of day"))?;
    Ok(NaiveDateTime::new(date, time))
}

/// Renders a timestamp in wire format, truncated to the minute.
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(TIMESTAMP_FORMAT).to_string()
}

/// Seconds since the Unix epoch, timestamps taken as UTC wall clock.
pub fn to_epoch_seconds(value: &NaiveDateTime) -> f64 {
    let utc = value.and_utc();
    utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) / 1e9
}

/// Inverse of [`to_epoch_seconds`]; `None` when not finite or out of range.
pub fn from_epoch_seconds(seconds: f64) -> Option<NaiveDateTime> {
    if !seconds.is_finite() {
        return None;
    }
    let mut whole = seconds.floor();
    let mut nanos = ((seconds - whole) * 1e9).round();
    if nanos >= 1e9 {
        whole += 1.0;
        nanos = 0.0;
    }
    if whole < i64::MIN as f64 || whole >= i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp(whole as i64, nanos as u32).map(|value| value.naive_utc())
}
