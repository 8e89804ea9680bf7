//! Timestamp parsing for event records.
//!
//! Accepted profiles:
//! - RFC 3339 / ISO-8601 with an offset or `Z` (`2024-05-01T09:30:00+02:00`)
//! - ISO-8601 without an offset, read as UTC (`2024-05-01T09:30:00.250`)
//! - The export profile `YYYY-MM-DD HH:MM:SS`, read as UTC
//!
//! Unparseable input is never coerced to "now" or the epoch.

use chrono::{DateTime, NaiveDateTime, Utc};

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a timestamp in any supported profile.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
}
