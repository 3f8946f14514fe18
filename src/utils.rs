//! Utility functions for timestamps and log formatting.

use chrono::{DateTime, TimeZone};

/// `strftime` pattern for run directories and the `timestamp_scraped` column.
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Format a run timestamp as `YYYY-MM-DD_HH-MM-SS`.
///
/// Second precision: two runs started in different seconds always get
/// different values.
///
/// # Examples
///
/// ```ignore
/// let now = Local.with_ymd_and_hms(2025, 5, 6, 20, 30, 0).unwrap();
/// assert_eq!(run_timestamp(&now), "2025-05-06_20-30-00");
/// ```
pub fn run_timestamp<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format(RUN_TIMESTAMP_FORMAT).to_string()
}

/// Truncate a string for logging purposes.
///
/// Long strings are cut at a char boundary at or below `max` bytes with an
/// ellipsis and the number of dropped bytes appended.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}
