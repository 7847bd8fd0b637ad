//! Relative-time and read-time estimation.
//!
//! Two small display estimators used during normalization:
//! - [`format_relative_time`] turns an ISO publication timestamp into a
//!   bucketed "2h ago"-style string.
//! - [`estimate_read_time`] turns article text length into a "4 min"
//!   reading-time estimate at 200 words per minute.

use chrono::{DateTime, Utc};

/// Format an ISO timestamp as a relative-time string against the current time.
///
/// Buckets:
/// - under 60 seconds: `"Just now"`
/// - under an hour: `"<N>m ago"`
/// - under a day: `"<N>h ago"`
/// - otherwise: `"<N>d ago"`
///
/// A missing or unparseable timestamp yields an empty string.
pub fn format_relative_time(published_at: &str) -> String {
    relative_time_at(published_at, Utc::now())
}

/// Core of [`format_relative_time`] with an explicit "now" for testability.
///
/// `N` uses nearest-integer rounding, not truncation: 89 elapsed seconds is
/// "1m ago", and 3599 seconds is "60m ago" because the minute count rounds up
/// before the hour bucket is reached.
pub fn relative_time_at(published_at: &str, now: DateTime<Utc>) -> String {
    if published_at.is_empty() {
        return String::new();
    }
    let Ok(parsed) = DateTime::parse_from_rfc3339(published_at) else {
        return String::new();
    };
    let diff_seconds =
        (now - parsed.with_timezone(&Utc)).num_milliseconds() as f64 / 1000.0;

    if diff_seconds < 60.0 {
        "Just now".to_string()
    } else if diff_seconds < 3600.0 {
        format!("{}m ago", (diff_seconds / 60.0).round() as i64)
    } else if diff_seconds < 86400.0 {
        format!("{}h ago", (diff_seconds / 3600.0).round() as i64)
    } else {
        format!("{}d ago", (diff_seconds / 86400.0).round() as i64)
    }
}

/// Estimate reading time from article text at 200 words per minute.
///
/// Counts whitespace-delimited words across content and description combined,
/// rounds to the nearest minute, and never reports less than one.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(estimate_read_time(&"word ".repeat(400), ""), "2 min");
/// assert_eq!(estimate_read_time("a few words", ""), "1 min");
/// ```
pub fn estimate_read_time(content: &str, description: &str) -> String {
    let words = content.split_whitespace().count() + description.split_whitespace().count();
    let minutes = (words as f64 / 200.0).round().max(1.0) as i64;
    format!("{} min", minutes)
}
