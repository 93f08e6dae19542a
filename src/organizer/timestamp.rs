//! Snapshot timestamp resolution.
//!
//! Producers stamp snapshots as epoch seconds (`int(time.time())`), epoch
//! milliseconds, RFC 3339 strings or naive `isoformat()` strings. The Arduino
//! additionally sends `millis()` uptime under `t`/`timestamp`, which is not a
//! wall-clock time and must not resolve.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Numbers at or above this are epoch milliseconds (Sep 2001 onwards).
const EPOCH_MILLIS_FLOOR: f64 = 1e12;

/// Numbers at or above this (and below the millis floor) are epoch seconds.
const EPOCH_SECONDS_FLOOR: f64 = 1e9;

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Resolve a raw timestamp value to a UTC instant.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_f64().and_then(from_epoch),
        Value::String(s) => parse_timestamp_str(s),
        Value::Object(map) => map.get("value").and_then(parse_timestamp),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(n) = s.parse::<f64>() {
        return from_epoch(n);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn from_epoch(n: f64) -> Option<DateTime<Utc>> {
    if !n.is_finite() {
        return None;
    }
    let millis = if n >= EPOCH_MILLIS_FLOOR {
        n
    } else if n >= EPOCH_SECONDS_FLOOR {
        n * 1000.0
    } else {
        return None;
    };
    DateTime::from_timestamp_millis(millis as i64)
}

/// Age of `timestamp` at `now`. Timestamps from the future have age zero.
pub fn age(now: DateTime<Utc>, timestamp: DateTime<Utc>) -> Duration {
    now.signed_duration_since(timestamp).to_std().unwrap_or(Duration::ZERO)
}
