//! Telemetry sources.
//!
//! A [`DataSource`] hands out raw JSON snapshots as the feeder's bridge
//! produces them: a polled status file, newline-delimited JSON over TCP, or
//! an in-process channel fed by an MQTT/HTTP client. Sources never interpret
//! the snapshot; that is the organizer's job.

mod channel;
mod file;
mod stream;
mod subscription;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use stream::StreamSource;
pub use subscription::{subscribe, FeedEvent, Subscription};

use std::fmt::Debug;

use crate::error::FeederError;

/// A raw telemetry snapshot. Shape is not guaranteed.
pub type RawSnapshot = serde_json::Value;

/// Decode one JSON document into a snapshot. Any valid JSON is accepted.
pub fn parse_snapshot(bytes: &[u8]) -> Result<RawSnapshot, FeederError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Source of raw telemetry snapshots.
///
/// # Example
///
/// ```
/// use feeder_dashboard::{DataSource, FileSource};
///
/// let mut source = FileSource::new("feeder_status.json");
/// if let Some(snapshot) = source.poll() {
///     println!("snapshot is an object: {}", snapshot.is_object());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Next snapshot, if one arrived since the last poll. Never blocks.
    fn poll(&mut self) -> Option<RawSnapshot>;

    /// Human-readable description of where snapshots come from.
    fn description(&self) -> &str;

    /// Error from the most recent poll, if any.
    fn error(&self) -> Option<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_snapshot() {
        assert_eq!(parse_snapshot(b" [1, 2] ").unwrap(), serde_json::json!([1, 2]));

        let err = parse_snapshot(b"SENSORS:feedTemp=27.5").unwrap_err();
        assert!(matches!(err, FeederError::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
