//! Display helpers for organized readings.

use std::str::FromStr;

use feeder_types::QualityLevel;
use tracing::warn;

use crate::error::SnapshotIssue;

/// Shown in place of a reading that is missing or not a finite number.
pub const PLACEHOLDER: &str = "--";

/// Default number of decimals.
pub const DEFAULT_PRECISION: usize = 1;

/// Format a reading with one decimal and an optional unit suffix.
///
/// ```
/// use feeder_dashboard::format::format_value;
///
/// assert_eq!(format_value(Some(12.345), Some("V")), "12.3V");
/// assert_eq!(format_value(None, Some("V")), "--");
/// assert_eq!(format_value(Some(f64::NAN), None), "--");
/// ```
pub fn format_value(value: Option<f64>, unit: Option<&str>) -> String {
    format_value_with(value, unit, DEFAULT_PRECISION)
}

/// Format a reading with `precision` decimals and an optional unit suffix.
pub fn format_value_with(value: Option<f64>, unit: Option<&str>, precision: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}{}", precision, v, unit.unwrap_or("")),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Style class for a quality level.
pub fn get_status_class(quality: QualityLevel) -> &'static str {
    match quality {
        QualityLevel::Good => "status-good",
        QualityLevel::Degraded => "status-degraded",
        QualityLevel::Stale => "status-stale",
        QualityLevel::Offline => "status-offline",
    }
}

/// Style class for a quality tag received as text.
///
/// Unrecognized tags get the offline class.
pub fn status_class_for_tag(tag: &str) -> &'static str {
    match QualityLevel::from_str(tag) {
        Ok(quality) => get_status_class(quality),
        Err(_) => {
            warn!(
                "{}",
                SnapshotIssue::UnrecognizedQualityTag {
                    tag: tag.to_string()
                }
            );
            get_status_class(QualityLevel::Offline)
        }
    }
}
