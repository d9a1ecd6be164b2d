//! ISO-8601 timestamp parsing for client-supplied dates.

use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Accepted layouts for timestamps without an offset (interpreted as UTC).
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2026-05-01T10:00:00Z`, `...+02:00`), naive date-times
/// which are taken as UTC, and bare dates (midnight UTC).
pub fn parse_iso8601(input: &str) -> Result<Timestamp, CoreError> {
    let trimmed = input.trim();

    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(CoreError::Validation(format!(
        "Invalid timestamp '{trimmed}'. Expected ISO-8601, e.g. 2026-05-01T10:00:00Z"
    )))
}
