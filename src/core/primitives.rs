use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{ForecastError, ForecastResult};

pub const SECONDS_PER_HOUR: f64 = 3_600.0;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((seconds * 1000.0).round() as i64)
}

#[must_use]
pub fn hours_to_seconds(hours: f64) -> f64 {
    hours * SECONDS_PER_HOUR
}

/// Parses an ISO-8601 instant.
///
/// Strings without an offset are read as UTC.
pub fn parse_timestamp(raw: &str) -> ForecastResult<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(time.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(naive.and_utc());
        }
    }
    Err(ForecastError::InvalidData(format!(
        "unparseable timestamp `{raw}`"
    )))
}
