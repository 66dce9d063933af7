//! Result shaping shared by the report operations.
//!
//! Averages are rounded half away from zero to two decimals. A missing
//! average stays missing: "no grades" is never reported as 0.

use chrono::NaiveDateTime;

/// Date format used for grade dates in report rows.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Rounds an average to two decimal digits, half away from zero.
pub fn round_average(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds a present average and passes an absent one through untouched.
pub fn shape_average(value: Option<f64>) -> Option<f64> {
    value.map(round_average)
}

/// Formats a timestamp as a date, discarding the time of day.
pub fn format_date(value: &NaiveDateTime) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// Joins first and last name with a single space.
pub fn full_name(first: &str, last: &str) -> String {
    format!("{first} {last}")
}
