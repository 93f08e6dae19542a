//! Snapshot organizer.
//!
//! Turns one raw telemetry snapshot into the [`SensorView`] and
//! [`ControlView`] records the dashboard displays. The transformation is pure:
//! it holds no state between calls, never fails, and substitutes documented
//! defaults (`0` for readings) for anything it cannot resolve.
//!
//! ## Data Flow
//!
//! ```text
//! RawSnapshot (serde_json::Value)
//!        │
//!        ▼
//! Lookup (root + wrapper scopes)
//!        │
//!        ├──▶ KeyChain per field ──▶ SensorView readings
//!        │                                │
//!        │    timestamp ──▶ age ──────────┴──▶ classify() ──▶ QualityLevel
//!        │
//!        └──▶ KeyChain per actuator ──▶ ControlView
//! ```

pub mod keys;
pub mod lookup;
pub mod quality;
pub mod timestamp;

use std::time::Duration;

use chrono::{DateTime, Utc};
use feeder_types::{
    ActuatorPosition, ActuatorState, AugerDirection, AugerState, BlowerState, ControlView,
    QualityLevel, SensorField, SensorView,
};
use serde_json::Value;
use tracing::{debug, trace};

use crate::command::pwm::clamp_duty;
use crate::data::duration::format_duration;
use crate::error::SnapshotIssue;

pub use lookup::{KeyChain, Lookup};
pub use quality::GroupCoverage;

/// Tuning for quality classification.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizerConfig {
    /// Snapshots older than this are stale.
    pub freshness_window: Duration,
    /// When a sensor group counts as populated.
    pub group_coverage: GroupCoverage,
    /// Whether `good` needs a resolvable timestamp.
    pub require_timestamp_for_good: bool,
}

impl Default for OrganizerConfig {
    fn default() -> Self {
        Self {
            freshness_window: Duration::from_secs(60),
            group_coverage: GroupCoverage::AnyField,
            require_timestamp_for_good: true,
        }
    }
}

/// Stateless snapshot organizer.
///
/// Cheap to clone and safe to share between threads; every call depends
/// only on its input snapshot (and the current time, for freshness).
///
/// # Example
///
/// ```
/// use feeder_dashboard::Organizer;
/// use feeder_types::QualityLevel;
/// use serde_json::json;
///
/// let organizer = Organizer::default();
/// let view = organizer.organize_sensor_data(&json!({
///     "feedTemp": 26.1,
///     "feedHum": 62,
///     "solarV": 13.4
/// }));
///
/// assert_eq!(view.temperature.feeder, 26.1);
/// assert_eq!(view.quality, QualityLevel::Degraded);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Organizer {
    config: OrganizerConfig,
}

impl Organizer {
    pub fn new(config: OrganizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OrganizerConfig {
        &self.config
    }

    /// Organize sensor readings, judging freshness against the wall clock.
    pub fn organize_sensor_data(&self, raw: &Value) -> SensorView {
        self.organize_sensor_data_at(raw, Utc::now())
    }

    /// Organize sensor readings, judging freshness at `now`.
    pub fn organize_sensor_data_at(&self, raw: &Value, now: DateTime<Utc>) -> SensorView {
        let lookup = Lookup::new(raw, keys::SENSOR_WRAPPERS);
        if lookup.is_empty() {
            report_unmapped(raw);
            return SensorView::default();
        }

        let mut view = SensorView::default();
        for field in SensorField::ALL {
            let chain = keys::sensor_chain(field);
            if let Some(value) = resolved(lookup.number(chain), chain) {
                view.set(field, value);
            }
        }

        let age = resolved(
            lookup.resolve(&keys::TIMESTAMP, timestamp::parse_timestamp),
            &keys::TIMESTAMP,
        )
        .map(|ts| timestamp::age(now, ts));

        view.quality = quality::classify(&view, age, &self.config);
        if let (QualityLevel::Stale, Some(age)) = (view.quality, age) {
            debug!(
                age = %format_duration(age),
                window = %format_duration(self.config.freshness_window),
                "snapshot is stale"
            );
        }
        view
    }

    /// Organize actuator state.
    pub fn organize_control_data(&self, raw: &Value) -> ControlView {
        let lookup = Lookup::new(raw, keys::CONTROL_WRAPPERS);
        if lookup.is_empty() {
            report_unmapped(raw);
            return ControlView::default();
        }

        let direction = resolved(
            lookup.resolve(&keys::AUGER_DIRECTION, as_direction),
            &keys::AUGER_DIRECTION,
        )
        .unwrap_or_default();
        let auger_speed = duty(&lookup, &keys::AUGER_SPEED);

        let blower = BlowerState {
            state: resolved(lookup.flag(&keys::BLOWER_STATE), &keys::BLOWER_STATE)
                .unwrap_or(false),
            speed: duty(&lookup, &keys::BLOWER_SPEED),
        };

        let actuator = ActuatorState {
            position: resolved(
                lookup.resolve(&keys::ACTUATOR_POSITION, as_position),
                &keys::ACTUATOR_POSITION,
            )
            .unwrap_or_default(),
            enabled: resolved(lookup.flag(&keys::ACTUATOR_ENABLED), &keys::ACTUATOR_ENABLED)
                .unwrap_or(false),
        };

        let relays = resolved(lookup.mapping(&keys::RELAYS), &keys::RELAYS)
            .map(|relays| {
                relays
                    .iter()
                    .map(|(name, state)| (name.clone(), lookup::truthy(state)))
                    .collect()
            })
            .unwrap_or_default();

        ControlView {
            auger: AugerState::new(direction, auger_speed),
            blower,
            actuator,
            relays,
        }
    }
}

/// Organize sensor readings with the default configuration.
pub fn organize_sensor_data(raw: &Value) -> SensorView {
    Organizer::default().organize_sensor_data(raw)
}

/// Organize actuator state with the default configuration.
pub fn organize_control_data(raw: &Value) -> ControlView {
    Organizer::default().organize_control_data(raw)
}

fn resolved<T>(value: Option<T>, chain: &KeyChain) -> Option<T> {
    if value.is_none() {
        trace!("{}", SnapshotIssue::MissingField { field: chain.field });
    }
    value
}

fn report_unmapped(raw: &Value) {
    if raw.is_null() {
        trace!("empty snapshot");
    } else {
        debug!(
            "{}",
            SnapshotIssue::MalformedSnapshot {
                kind: lookup::kind_of(raw)
            }
        );
    }
}

fn duty(lookup: &Lookup<'_>, chain: &KeyChain) -> u8 {
    resolved(lookup.number(chain), chain).map(clamp_duty).unwrap_or(0)
}

fn as_direction(value: &Value) -> Option<AugerDirection> {
    match value {
        Value::String(s) => Some(match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "fwd" | "on" | "1" => AugerDirection::Forward,
            "reverse" | "rev" | "backward" | "2" => AugerDirection::Reverse,
            _ => AugerDirection::Stopped,
        }),
        Value::Number(n) => Some(match n.as_f64() {
            Some(v) if v == 1.0 => AugerDirection::Forward,
            Some(v) if v == 2.0 => AugerDirection::Reverse,
            _ => AugerDirection::Stopped,
        }),
        _ => None,
    }
}

fn as_position(value: &Value) -> Option<ActuatorPosition> {
    match value {
        Value::Number(_) => lookup::as_number(value).map(ActuatorPosition::Value),
        Value::String(s) => Some(ActuatorPosition::Label(s.clone())),
        Value::Object(map) => map.get("value").and_then(as_position),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    fn arduino_report(timestamp: i64) -> Value {
        json!({
            "status": "active",
            "timestamp": timestamp,
            "sensors": {
                "feedTemp": 27.5,
                "feedHumidity": 65.2,
                "boxTemp": 29.1,
                "boxHumidity": 68.5,
                "weight": 1.245,
                "soilMoisture": 45,
                "solarVoltage": 13.1,
                "batteryVoltage": 12.3
            },
            "controls": {
                "led": true,
                "fan": false,
                "augerSpeed": 200,
                "blowerSpeed": 128,
                "actuatorPos": 0
            }
        })
    }

    #[test]
    fn test_example_partial_snapshot() {
        let view = organize_sensor_data(&json!({
            "feedTemp": 26.1,
            "feedHum": 62,
            "solarV": 13.4
        }));

        assert_eq!(view.temperature.feeder, 26.1);
        assert_eq!(view.temperature.system, 0.0);
        assert_eq!(view.humidity.feeder, 62.0);
        assert_eq!(view.electrical.solar_voltage, 13.4);
        assert_eq!(view.electrical.battery_voltage, 0.0);
        assert_eq!(view.mechanical.feeder_weight, 0.0);
        assert_eq!(view.quality, QualityLevel::Degraded);
    }

    #[test]
    fn test_full_fresh_report_is_good() {
        let organizer = Organizer::default();
        let raw = arduino_report(noon().timestamp() - 5);
        let view = organizer.organize_sensor_data_at(&raw, noon());

        assert_eq!(view.temperature.system, 29.1);
        assert_eq!(view.humidity.system, 68.5);
        assert_eq!(view.mechanical.feeder_weight, 1.245);
        assert_eq!(view.mechanical.soil_moisture, 45.0);
        assert_eq!(view.electrical.battery_voltage, 12.3);
        assert_eq!(view.quality, QualityLevel::Good);
    }

    #[test]
    fn test_full_old_report_is_stale() {
        let organizer = Organizer::default();
        let raw = arduino_report(noon().timestamp() - 3600);
        let view = organizer.organize_sensor_data_at(&raw, noon());
        assert_eq!(view.quality, QualityLevel::Stale);
    }

    #[test]
    fn test_freshness_window_is_configurable() {
        let organizer = Organizer::new(OrganizerConfig {
            freshness_window: Duration::from_secs(2 * 3600),
            ..OrganizerConfig::default()
        });
        let raw = arduino_report(noon().timestamp() - 3600);
        let view = organizer.organize_sensor_data_at(&raw, noon());
        assert_eq!(view.quality, QualityLevel::Good);
    }

    #[test]
    fn test_uptime_timestamp_cannot_prove_freshness() {
        let organizer = Organizer::default();
        let view = organizer.organize_sensor_data_at(&arduino_report(123_456), noon());
        assert_eq!(view.quality, QualityLevel::Degraded);
    }

    #[test]
    fn test_pi_bridge_records() {
        let raw = json!({
            "timestamp": "2024-05-01T11:59:30",
            "DHT22_FEEDER": {
                "temperature": { "value": 26.0, "unit": "°C" },
                "humidity": { "value": 61.0, "unit": "%" }
            },
            "DHT22_SYSTEM": {
                "temperature": { "value": null, "unit": "°C" },
                "humidity": { "value": 55.0, "unit": "%" }
            },
            "BATTERY_STATUS": { "voltage": { "value": 11.85, "unit": "V" } },
            "HX711_FEEDER": { "weight": { "value": 0, "unit": "g" } },
            "SOIL_MOISTURE": { "moisture": { "value": 1, "unit": "%" } }
        });
        let view = Organizer::default().organize_sensor_data_at(&raw, noon());

        assert_eq!(view.temperature.feeder, 26.0);
        assert_eq!(view.temperature.system, 0.0);
        assert_eq!(view.humidity.system, 55.0);
        assert_eq!(view.electrical.battery_voltage, 11.85);
        assert_eq!(view.mechanical.feeder_weight, 0.0);
        assert_eq!(view.mechanical.soil_moisture, 1.0);
        assert_eq!(view.quality, QualityLevel::Good);
    }

    #[test]
    fn test_nested_firmware_layout() {
        let raw = json!({
            "sensors": {
                "feed_tank": { "temperature": 25.5, "humidity": 60 },
                "control_box": { "temperature": 31.0, "humidity": 50 },
                "weight_kg": 2.5,
                "soil_moisture_percent": 40,
                "power": { "solar_voltage": 14.2, "load_voltage": 12.6 }
            }
        });
        let view = organize_sensor_data(&raw);

        assert_eq!(view.temperature.feeder, 25.5);
        assert_eq!(view.humidity.system, 50.0);
        assert_eq!(view.electrical.solar_voltage, 14.2);
        assert_eq!(view.electrical.battery_voltage, 12.6);
        assert_eq!(view.mechanical.feeder_weight, 2.5);
        assert_eq!(view.quality, QualityLevel::Degraded);
    }

    #[test]
    fn test_non_mapping_snapshots_are_offline() {
        for raw in [json!(null), json!({}), json!(3.5), json!("SENSORS:..."), json!([1, 2])] {
            let view = organize_sensor_data(&raw);
            assert_eq!(view, SensorView::default());
            assert_eq!(view.quality, QualityLevel::Offline);
            assert_eq!(organize_control_data(&raw), ControlView::default());
        }
    }

    #[test]
    fn test_zero_readings_are_offline() {
        let view = organize_sensor_data(&json!({ "feedTemp": 0, "solarV": "0.0" }));
        assert_eq!(view.quality, QualityLevel::Offline);
    }

    #[test]
    fn test_control_defaults() {
        let view = organize_control_data(&json!({ "unrelated": 1 }));
        assert_eq!(view.auger.direction, AugerDirection::Stopped);
        assert_eq!(view.auger.speed, 0);
        assert!(!view.auger.enabled);
        assert!(!view.blower.state);
        assert_eq!(view.blower.speed, 0);
        assert_eq!(view.actuator.position, ActuatorPosition::Value(0.0));
        assert!(!view.actuator.enabled);
        assert!(view.relays.is_empty());
    }

    #[test]
    fn test_control_from_arduino_report() {
        let view = organize_control_data(&arduino_report(0));
        assert_eq!(view.auger.speed, 200);
        assert_eq!(view.blower.speed, 128);
        assert_eq!(view.actuator.position, ActuatorPosition::Value(0.0));
        assert_eq!(view.auger.direction, AugerDirection::Stopped);
    }

    #[test]
    fn test_control_nested_objects() {
        let raw = json!({
            "auger": { "direction": "Reverse", "speed": 300 },
            "blower": { "state": "on", "speed": -4 },
            "actuator": { "position": "up", "enabled": 1 }
        });
        let view = organize_control_data(&raw);

        assert_eq!(view.auger.direction, AugerDirection::Reverse);
        assert_eq!(view.auger.speed, 255);
        assert!(view.auger.enabled);
        assert!(view.blower.state);
        assert_eq!(view.blower.speed, 0);
        assert_eq!(view.actuator.position, ActuatorPosition::Label("up".into()));
        assert!(view.actuator.enabled);
    }

    #[test]
    fn test_auger_direction_spellings() {
        let direction = |v: Value| organize_control_data(&json!({ "augerDirection": v })).auger;
        assert_eq!(direction(json!("fwd")).direction, AugerDirection::Forward);
        assert_eq!(direction(json!(2)).direction, AugerDirection::Reverse);
        assert_eq!(direction(json!("stop")).direction, AugerDirection::Stopped);
        assert_eq!(direction(json!("sideways")).direction, AugerDirection::Stopped);
        assert!(!direction(json!("stop")).enabled);
    }

    #[test]
    fn test_motors_node() {
        let raw = json!({
            "controls": {
                "motors": { "auger": "forward", "blower": 180, "actuator": "stop" }
            }
        });
        let view = organize_control_data(&raw);

        assert_eq!(view.auger.direction, AugerDirection::Forward);
        assert!(view.blower.state);
        assert_eq!(view.blower.speed, 180);
        assert_eq!(view.actuator.position, ActuatorPosition::Label("stop".into()));

        let idle = organize_control_data(&json!({
            "controls": { "motors": { "auger": "stop", "blower": 0, "actuator": "stop" } }
        }));
        assert_eq!(idle.auger.direction, AugerDirection::Stopped);
        assert!(!idle.blower.state);
        assert_eq!(idle.blower.speed, 0);
    }

    #[test]
    fn test_unusable_root_value_does_not_hide_wrapper() {
        let view = organize_sensor_data(&json!({
            "feedTemp": "ERR",
            "sensors": { "feedTemp": 27.5 }
        }));
        assert_eq!(view.temperature.feeder, 27.5);

        let view = organize_control_data(&json!({
            "relays": "n/a",
            "controls": { "relays": { "pump": 1 } }
        }));
        assert_eq!(view.relays.get("pump"), Some(&true));
        assert_eq!(view.relays.len(), 1);
    }

    #[test]
    fn test_relays_pass_through() {
        let raw = json!({ "relays": { "pump": 1, "light": 0, "fan_extra": true } });
        let relays = organize_control_data(&raw).relays;

        assert_eq!(relays.len(), 3);
        assert_eq!(relays.get("pump"), Some(&true));
        assert_eq!(relays.get("light"), Some(&false));
        assert_eq!(relays.get("fan_extra"), Some(&true));
    }

    #[test]
    fn test_relays_under_controls_wrapper() {
        let raw = json!({
            "controls": {
                "relays": { "led_pond_light": "on", "control_box_fan": "off" },
                "motors": { "blower_ventilation": 127.6, "auger_food_dispenser": 0 }
            }
        });
        let view = organize_control_data(&raw);

        assert_eq!(view.relays.get("led_pond_light"), Some(&true));
        assert_eq!(view.relays.get("control_box_fan"), Some(&false));
        assert_eq!(view.blower.speed, 128);
    }
}
