//! Layered settings: defaults, an optional TOML file, then `FEEDER_*`
//! environment variables (`FEEDER_ORGANIZER__FRESHNESS_WINDOW=2m`).

use std::path::Path;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::duration::parse_duration;
use crate::error::FeederError;
use crate::organizer::{GroupCoverage, OrganizerConfig};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub organizer: OrganizerSettings,
    pub display: DisplaySettings,
    pub source: SourceSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrganizerSettings {
    /// Duration string, e.g. "60s".
    pub freshness_window: String,
    pub group_coverage: GroupCoverage,
    pub require_timestamp_for_good: bool,
}

impl Default for OrganizerSettings {
    fn default() -> Self {
        Self {
            freshness_window: "60s".to_string(),
            group_coverage: GroupCoverage::AnyField,
            require_timestamp_for_good: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub precision: usize,
    pub history_size: usize,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            precision: crate::format::DEFAULT_PRECISION,
            history_size: crate::data::history::MAX_HISTORY_SIZE,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Status file to poll.
    pub file: Option<String>,
    /// `host:port` serving newline-delimited JSON.
    pub connect: Option<String>,
    /// `host:port` accepting line-framed commands.
    pub command: Option<String>,
    /// Poll interval, e.g. "500ms".
    pub refresh: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            file: None,
            connect: None,
            command: None,
            refresh: "500ms".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings, reading `path` if given. A given file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, FeederError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        let config = builder
            .add_source(
                Environment::with_prefix("FEEDER")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn organizer_config(&self) -> Result<OrganizerConfig, FeederError> {
        Ok(OrganizerConfig {
            freshness_window: duration_setting(
                "organizer.freshness_window",
                &self.organizer.freshness_window,
            )?,
            group_coverage: self.organizer.group_coverage,
            require_timestamp_for_good: self.organizer.require_timestamp_for_good,
        })
    }

    pub fn refresh_interval(&self) -> Result<Duration, FeederError> {
        duration_setting("source.refresh", &self.source.refresh)
    }
}

fn duration_setting(key: &str, value: &str) -> Result<Duration, FeederError> {
    parse_duration(value).map_err(|e| FeederError::Config(format!("{}: {}", key, e)))
}
