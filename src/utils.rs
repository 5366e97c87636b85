use chrono::{SecondsFormat, Utc};

/// Format a number the way a JavaScript template literal would: integral
/// values have no fractional part, everything else uses the shortest
/// round-tripping representation.
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Current time as an RFC 3339 UTC string with millisecond precision
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Scale a 0..=1 score to a whole 0..=100 value
pub fn percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}
