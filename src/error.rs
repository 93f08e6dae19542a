//! Error types.
//!
//! The organizer itself never fails: [`SnapshotIssue`] only names the
//! recoveries it performs so they can be logged. [`FeederError`] covers the
//! collaborators around it (sources, sinks, configuration).

use thiserror::Error;

/// A recovery the organizer performed while reading a snapshot.
///
/// These are reported through `tracing` and never returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotIssue {
    /// None of the candidate keys for a field were present.
    #[error("no candidate key resolved for {field}")]
    MissingField { field: &'static str },

    /// The snapshot was not a mapping and was treated as empty.
    #[error("snapshot is {kind}, not a mapping")]
    MalformedSnapshot { kind: &'static str },

    /// A quality tag outside the known set was mapped to offline.
    #[error("unrecognized quality tag {tag:?}")]
    UnrecognizedQualityTag { tag: String },
}

/// Errors raised by telemetry sources, sinks and configuration loading.
#[derive(Debug, Error)]
pub enum FeederError {
    /// I/O failure on a file, socket or writer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Settings could not be loaded or were invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A command could not be delivered.
    #[error("Command rejected: {0}")]
    Command(String),

    /// An export could not be written.
    #[error("Export failed: {0}")]
    Export(String),

    /// The telemetry source is unavailable.
    #[error("Source unavailable: {0}")]
    Source(String),
}

impl From<config::ConfigError> for FeederError {
    fn from(err: config::ConfigError) -> Self {
        FeederError::Config(err.to_string())
    }
}
