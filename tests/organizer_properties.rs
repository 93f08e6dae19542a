//! Property tests for the snapshot organizer: totality over arbitrary JSON,
//! zero-fallback, quality monotonicity and formatting laws.

use chrono::{DateTime, TimeZone, Utc};
use feeder_dashboard::format::{format_value, PLACEHOLDER};
use feeder_dashboard::{ControlView, Organizer, QualityLevel, SensorField, SensorView};
use proptest::prelude::*;
use serde_json::{Map, Value};

const CANONICAL_KEYS: [(SensorField, &str); 8] = [
    (SensorField::FeederTemperature, "feedTemp"),
    (SensorField::SystemTemperature, "boxTemp"),
    (SensorField::FeederHumidity, "feedHumidity"),
    (SensorField::SystemHumidity, "boxHumidity"),
    (SensorField::BatteryVoltage, "batteryVoltage"),
    (SensorField::SolarVoltage, "solarVoltage"),
    (SensorField::FeederWeight, "weight"),
    (SensorField::SoilMoisture, "soilMoisture"),
];

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

fn key() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("sensors".to_string()),
        Just("controls".to_string()),
        Just("relays".to_string()),
        Just("feedTemp".to_string()),
        Just("DHT22_FEEDER".to_string()),
        Just("temperature".to_string()),
        Just("value".to_string()),
        Just("timestamp".to_string()),
        Just("auger".to_string()),
        Just("speed".to_string()),
        Just("bat_v".to_string()),
        "[a-zA-Z_]{1,12}",
    ]
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        any::<f64>().prop_map(Value::from),
        ".{0,12}".prop_map(Value::String),
        (-1e3f64..1e3).prop_map(|v| Value::String(v.to_string())),
    ];
    leaf.prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key(), inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn snapshot(readings: &[Option<f64>; 8], timestamp: Option<i64>) -> Value {
    let mut raw = Map::new();
    for ((_, key), reading) in CANONICAL_KEYS.iter().zip(readings) {
        if let Some(value) = reading {
            raw.insert(key.to_string(), Value::from(*value));
        }
    }
    if let Some(ts) = timestamp {
        raw.insert("timestamp".to_string(), Value::from(ts));
    }
    Value::Object(raw)
}

fn readings() -> impl Strategy<Value = [Option<f64>; 8]> {
    prop::array::uniform8(prop::option::of(0.1f64..500.0))
}

fn timestamp() -> impl Strategy<Value = Option<i64>> {
    prop::option::of((0i64..7200).prop_map(|age| now().timestamp() - age))
}

proptest! {
    /// Any JSON value organizes into finite readings without panicking.
    #[test]
    fn organize_is_total(raw in arb_json()) {
        let organizer = Organizer::default();
        let view = organizer.organize_sensor_data_at(&raw, now());
        for field in SensorField::ALL {
            prop_assert!(view.get(field).is_finite());
        }
        let _ = organizer.organize_control_data(&raw);
    }

    /// Snapshots wrapped under unknown keys resolve nothing.
    #[test]
    fn unknown_keys_fall_back_to_defaults(
        entries in prop::collection::btree_map("zz_[a-z]{1,8}", arb_json(), 0..6),
    ) {
        let raw = Value::Object(entries.into_iter().collect());
        let organizer = Organizer::default();

        prop_assert_eq!(organizer.organize_sensor_data_at(&raw, now()), SensorView::default());
        prop_assert_eq!(organizer.organize_control_data(&raw), ControlView::default());
    }

    /// Unresolved fields are exactly zero; resolved ones keep their value.
    #[test]
    fn zero_fallback_per_field(values in readings(), ts in timestamp()) {
        let view = Organizer::default().organize_sensor_data_at(&snapshot(&values, ts), now());
        for ((field, _), reading) in CANONICAL_KEYS.iter().zip(values) {
            prop_assert_eq!(view.get(*field), reading.unwrap_or(0.0));
        }
    }

    /// Adding readings with the same timestamp never lowers quality.
    #[test]
    fn quality_is_monotonic(
        base in readings(),
        extra in readings(),
        ts in timestamp(),
    ) {
        let mut superset = base;
        for (slot, more) in superset.iter_mut().zip(extra) {
            if slot.is_none() {
                *slot = more;
            }
        }

        let organizer = Organizer::default();
        let lower = organizer.organize_sensor_data_at(&snapshot(&base, ts), now()).quality;
        let upper = organizer.organize_sensor_data_at(&snapshot(&superset, ts), now()).quality;
        prop_assert!(upper >= lower, "{} -> {}", lower, upper);
    }

    /// A snapshot without any reading is offline, whatever its timestamp.
    #[test]
    fn empty_readings_are_offline(ts in timestamp()) {
        let view = Organizer::default().organize_sensor_data_at(&snapshot(&[None; 8], ts), now());
        prop_assert_eq!(view.quality, QualityLevel::Offline);
    }

    /// Relay names are kept verbatim with their boolean state.
    #[test]
    fn relays_pass_through(
        relays in prop::collection::btree_map("[a-z_]{1,10}", any::<bool>(), 0..8),
    ) {
        let raw = serde_json::json!({ "relays": relays.clone() });
        let view = Organizer::default().organize_control_data(&raw);
        prop_assert_eq!(view.relays, relays);
    }

    /// Finite values print with one decimal and the unit; others print the placeholder.
    #[test]
    fn format_value_laws(value in any::<f64>()) {
        let text = format_value(Some(value), Some("V"));
        if value.is_finite() {
            let number = text.strip_suffix('V').unwrap();
            prop_assert_eq!(number.split('.').nth(1).map(str::len), Some(1));
            let parsed: f64 = number.parse().unwrap();
            prop_assert!((parsed - value).abs() <= 0.05 + value.abs() * 1e-12);
        } else {
            prop_assert_eq!(text, PLACEHOLDER);
        }
    }
}

#[test]
fn format_value_none_is_placeholder() {
    assert_eq!(format_value(None, Some("°C")), PLACEHOLDER);
}
