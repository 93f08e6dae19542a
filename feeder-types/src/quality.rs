//! Snapshot quality classification.

use std::fmt;
use std::str::FromStr;

/// Coarse classification of how trustworthy and current a snapshot is.
///
/// Variants are declared worst-first so the derived ordering is
/// `Offline < Stale < Degraded < Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum QualityLevel {
    /// No recognizable sensor field at all.
    #[default]
    Offline,
    /// Data present but its timestamp is older than the freshness window.
    Stale,
    /// Some sensor groups are missing, or freshness cannot be verified.
    Degraded,
    /// Every sensor group reported and the snapshot is fresh.
    Good,
}

impl QualityLevel {
    /// All levels, worst first.
    pub const ALL: [QualityLevel; 4] = [
        QualityLevel::Offline,
        QualityLevel::Stale,
        QualityLevel::Degraded,
        QualityLevel::Good,
    ];

    /// Lowercase tag used in JSON and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLevel::Offline => "offline",
            QualityLevel::Stale => "stale",
            QualityLevel::Degraded => "degraded",
            QualityLevel::Good => "good",
        }
    }
}

impl fmt::Display for QualityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a [`QualityLevel`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseQualityError {
    /// The tag that failed to parse.
    pub tag: String,
}

impl fmt::Display for ParseQualityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized quality tag: {:?}", self.tag)
    }
}

impl std::error::Error for ParseQualityError {}

impl FromStr for QualityLevel {
    type Err = ParseQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tag = s.trim();
        QualityLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(tag))
            .ok_or_else(|| ParseQualityError {
                tag: tag.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_worst_first() {
        assert!(QualityLevel::Offline < QualityLevel::Stale);
        assert!(QualityLevel::Stale < QualityLevel::Degraded);
        assert!(QualityLevel::Degraded < QualityLevel::Good);
        assert_eq!(QualityLevel::ALL.iter().max(), Some(&QualityLevel::Good));
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("GOOD".parse::<QualityLevel>(), Ok(QualityLevel::Good));
        assert_eq!(" stale ".parse::<QualityLevel>(), Ok(QualityLevel::Stale));
    }

    #[test]
    fn test_parse_unknown_tag() {
        let err = "flaky".parse::<QualityLevel>().unwrap_err();
        assert_eq!(err.tag, "flaky");
        assert!(err.to_string().contains("flaky"));
    }

    #[test]
    fn test_default_is_offline() {
        assert_eq!(QualityLevel::default(), QualityLevel::Offline);
    }
}
