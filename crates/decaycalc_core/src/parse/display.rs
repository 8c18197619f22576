//! Display strings for derived values.

const SECONDS_PER_DAY: i64 = 86_400;

/// Renders a signed duration as `[-][N day(s), ]H:MM:SS`.
///
/// Fractional seconds are truncated toward zero.
pub fn format_elapsed(seconds: f64) -> String {
    if !seconds.is_finite() {
        return format!("{seconds}");
    }
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs().trunc() as i64;
    let days = total / SECONDS_PER_DAY;
    let rest = total % SECONDS_PER_DAY;
    let clock = format!("{}:{:02}:{:02}", rest / 3_600, (rest % 3_600) / 60, rest % 60);
    match days {
        0 => format!("{sign}{clock}"),
        1 => format!("{sign}1 day, {clock}"),
        n => format!("{sign}{n} days, {clock}"),
    }
}

/// Ratio display with three decimals.
pub fn format_ratio(ratio: f64) -> String {
    format!("{ratio:.3}")
}

/// Solved activity display with four decimals.
pub fn format_activity(activity: f64) -> String {
    format!("{activity:.4}")
}
