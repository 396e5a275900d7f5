use chrono::NaiveDateTime;

use super::event::CaptureEvent;

/// Elapsed time between two captures adjacent in the log
#[derive(Debug, Clone, PartialEq)]
pub struct Interval {
    /// Name of the earlier capture in log order
    pub from: String,
    /// Name of the later capture in log order
    pub to: String,
    /// Signed seconds from `from` to `to`
    pub seconds: f64,
}

fn elapsed_seconds(earlier: NaiveDateTime, later: NaiveDateTime) -> f64 {
    // Four-digit years keep any difference well inside i64 microseconds
    let micros = later
        .signed_duration_since(earlier)
        .num_microseconds()
        .unwrap_or_default();
    micros as f64 / 1_000_000.0
}

/// Seconds between each pair of neighbouring events. No sorting, so a clock
/// jump backwards shows up as a negative value.
pub fn compute_intervals(events: &[CaptureEvent]) -> Vec<f64> {
    events
        .windows(2)
        .map(|pair| elapsed_seconds(pair[0].timestamp, pair[1].timestamp))
        .collect()
}

/// Same as [`compute_intervals`] but keeps the names of both ends
pub fn pair_intervals(events: &[CaptureEvent]) -> Vec<Interval> {
    events
        .windows(2)
        .map(|pair| Interval {
            from: pair[0].name.clone(),
            to: pair[1].name.clone(),
            seconds: elapsed_seconds(pair[0].timestamp, pair[1].timestamp),
        })
        .collect()
}

/// Shortest round-trip text of a seconds value. Plain decimals always carry
/// a fractional part; magnitudes below 1e-4 or from 1e16 up switch to
/// exponent form with a signed two-digit exponent (`2e-06`, `1e+16`).
pub fn format_seconds(seconds: f64) -> String {
    if !seconds.is_finite() {
        return seconds.to_string();
    }

    let magnitude = seconds.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        return format_exponent(seconds);
    }

    let text = seconds.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn format_exponent(seconds: f64) -> String {
    let text = format!("{:e}", seconds);
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return text;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{}e{}{:0>2}", mantissa, sign, digits)
}
