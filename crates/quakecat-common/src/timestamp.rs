//! Timestamp parsing and normalization
//!
//! Catalogue dates come from two places: the bulk CSV source and API
//! callers. Both go through [`parse`], which accepts:
//!
//! - RFC 3339 with an offset or `Z` (`1970-01-01T00:00:00Z`)
//! - naive date-times with `-` or `/` separators, `T` or a space between
//!   date and time, and optional fractional seconds (`1970/01/04 17:00:40.20`)
//! - naive dates (`2020-01-01`, `2020/01/01`)
//!
//! Naive values are interpreted as UTC. [`normalize`] renders an instant in
//! the fixed `YYYY-MM-DDTHH:MM:SS.sssZ` form stored for ingested records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a raw timestamp into a UTC instant
///
/// Returns `None` when the text matches none of the accepted formats or
/// names an impossible calendar date (e.g. `2021-02-30`).
pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(naive.and_utc());
        }
    }

    NAIVE_DATE_FORMATS.iter().find_map(|format| {
        NaiveDate::parse_from_str(trimmed, format)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    })
}

/// Render an instant as `YYYY-MM-DDTHH:MM:SS.sssZ`
pub fn normalize(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse and normalize in one step
pub fn parse_normalized(raw: &str) -> Option<String> {
    parse(raw).map(|instant| normalize(&instant))
}
