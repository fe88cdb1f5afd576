use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::models::WireTimestamp;

const NANOS_PER_MILLI: i64 = 1_000_000;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A normalized instant. An unparseable wire value becomes the invalid
/// instant instead of an error, so check [`Timestamp::is_valid`] before
/// rendering it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(Option<DateTime<Utc>>);

impl Timestamp {
    pub fn invalid() -> Self {
        Self(None)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(DateTime::from_timestamp_millis(millis))
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.map(|dt| dt.timestamp_millis())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(Some(dt))
    }
}

/// Converts a wire timestamp into a [`Timestamp`].
///
/// Text is parsed as RFC 3339, then RFC 2822, then an ISO-8601 date-time
/// with optional seconds, with or without offset (taken as UTC when absent),
/// then a bare date (midnight UTC). Numbers are nanoseconds since the Unix
/// epoch, truncated to whole milliseconds.
pub fn normalize(at: &WireTimestamp) -> Timestamp {
    match at {
        WireTimestamp::Text(text) => parse_text(text),
        WireTimestamp::Nanos(nanos) => Timestamp::from_millis(nanos / NANOS_PER_MILLI),
        WireTimestamp::Number(number) => from_number(number),
        WireTimestamp::Other(value) => {
            log::warn!("timestamp {value} is neither text nor a number, keeping it as invalid");
            Timestamp::invalid()
        }
    }
}

fn from_number(number: &serde_json::Number) -> Timestamp {
    if let Some(nanos) = number.as_i64() {
        return Timestamp::from_millis(nanos / NANOS_PER_MILLI);
    }
    if let Some(nanos) = number.as_u64() {
        return match i64::try_from(nanos / NANOS_PER_MILLI as u64) {
            Ok(millis) => Timestamp::from_millis(millis),
            Err(_) => Timestamp::invalid(),
        };
    }
    match number.as_f64().map(|nanos| (nanos / NANOS_PER_MILLI as f64).trunc()) {
        Some(millis) if millis.is_finite() && millis.abs() < i64::MAX as f64 => {
            Timestamp::from_millis(millis as i64)
        }
        _ => Timestamp::invalid(),
    }
}

/// Same as [`normalize`], with an absent field treated as invalid.
pub fn normalize_opt(at: Option<&WireTimestamp>) -> Timestamp {
    at.map(normalize).unwrap_or_else(Timestamp::invalid)
}

fn parse_text(text: &str) -> Timestamp {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return dt.with_timezone(&Utc).into();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return dt.with_timezone(&Utc).into();
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%:z") {
        return dt.with_timezone(&Utc).into();
    }
    let naive_text = text.strip_suffix('Z').unwrap_or(text);
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(naive_text, fmt) {
            return naive.and_utc().into();
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
    {
        return naive.and_utc().into();
    }
    log::warn!("unparseable timestamp {text:?}, keeping it as invalid");
    Timestamp::invalid()
}
