//! Quality classification of an organized sensor view.

use std::time::Duration;

use feeder_types::{QualityLevel, SensorGroup, SensorView};
use serde::Deserialize;

use super::OrganizerConfig;

/// When a sensor group counts as populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupCoverage {
    /// Any non-zero reading in the group.
    #[default]
    AnyField,
    /// Every reading in the group is non-zero.
    AllFields,
}

impl GroupCoverage {
    fn covers(&self, values: [f64; 2]) -> bool {
        match self {
            GroupCoverage::AnyField => values.iter().any(|v| *v != 0.0),
            GroupCoverage::AllFields => values.iter().all(|v| *v != 0.0),
        }
    }
}

/// Number of groups of `view` populated under `coverage`.
pub fn populated_groups(view: &SensorView, coverage: GroupCoverage) -> usize {
    SensorGroup::ALL
        .iter()
        .filter(|group| coverage.covers(view.group_values(**group)))
        .count()
}

/// Classify a view whose readings are already resolved.
///
/// `age` is `None` when the snapshot carried no resolvable timestamp.
/// Staleness outranks coverage: adding readings to a snapshot never lowers
/// its level.
pub fn classify(
    view: &SensorView,
    age: Option<Duration>,
    config: &OrganizerConfig,
) -> QualityLevel {
    let any_reading = SensorGroup::ALL
        .iter()
        .any(|group| GroupCoverage::AnyField.covers(view.group_values(*group)));
    if !any_reading {
        return QualityLevel::Offline;
    }

    if age.is_some_and(|age| age > config.freshness_window) {
        return QualityLevel::Stale;
    }

    if populated_groups(view, config.group_coverage) < SensorGroup::ALL.len() {
        return QualityLevel::Degraded;
    }

    if age.is_none() && config.require_timestamp_for_good {
        return QualityLevel::Degraded;
    }

    QualityLevel::Good
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeder_types::SensorField;

    fn full_view() -> SensorView {
        let mut view = SensorView::default();
        for field in SensorField::ALL {
            view.set(field, 1.0);
        }
        view
    }

    fn fresh() -> Option<Duration> {
        Some(Duration::from_secs(5))
    }

    #[test]
    fn test_empty_is_offline_even_when_fresh() {
        let config = OrganizerConfig::default();
        assert_eq!(classify(&SensorView::default(), fresh(), &config), QualityLevel::Offline);
        assert_eq!(classify(&SensorView::default(), None, &config), QualityLevel::Offline);
    }

    #[test]
    fn test_full_and_fresh_is_good() {
        let config = OrganizerConfig::default();
        assert_eq!(classify(&full_view(), fresh(), &config), QualityLevel::Good);
    }

    #[test]
    fn test_partial_is_degraded() {
        let config = OrganizerConfig::default();
        let mut view = full_view();
        view.mechanical.feeder_weight = 0.0;
        view.mechanical.soil_moisture = 0.0;
        assert_eq!(classify(&view, fresh(), &config), QualityLevel::Degraded);
    }

    #[test]
    fn test_old_timestamp_is_stale() {
        let config = OrganizerConfig::default();
        let old = Some(config.freshness_window + Duration::from_secs(1));
        assert_eq!(classify(&full_view(), old, &config), QualityLevel::Stale);

        let mut partial = full_view();
        partial.temperature = Default::default();
        assert_eq!(classify(&partial, old, &config), QualityLevel::Stale);
    }

    #[test]
    fn test_age_equal_to_window_is_fresh() {
        let config = OrganizerConfig::default();
        let edge = Some(config.freshness_window);
        assert_eq!(classify(&full_view(), edge, &config), QualityLevel::Good);
    }

    #[test]
    fn test_missing_timestamp() {
        let strict = OrganizerConfig::default();
        assert_eq!(classify(&full_view(), None, &strict), QualityLevel::Degraded);

        let lenient = OrganizerConfig {
            require_timestamp_for_good: false,
            ..OrganizerConfig::default()
        };
        assert_eq!(classify(&full_view(), None, &lenient), QualityLevel::Good);
    }

    #[test]
    fn test_all_fields_coverage() {
        let config = OrganizerConfig {
            group_coverage: GroupCoverage::AllFields,
            ..OrganizerConfig::default()
        };
        let mut view = full_view();
        view.humidity.system = 0.0;
        assert_eq!(populated_groups(&view, GroupCoverage::AnyField), 4);
        assert_eq!(populated_groups(&view, GroupCoverage::AllFields), 3);
        assert_eq!(classify(&view, fresh(), &config), QualityLevel::Degraded);
    }
}
