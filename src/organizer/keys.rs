//! Candidate key chains for every organized field.
//!
//! The same reading reaches the dashboard under different names depending on
//! which producer wrote it: the Arduino JSON report (`feedTemp`,
//! `solarVoltage`), the Pi bridge's per-sensor records (`DHT22_FEEDER`,
//! `HX711_FEEDER`), the nested firmware layout (`feed_tank`, `power`) or the
//! compact MQTT keys (`sol_v`, `bat_v`). Chains list the most specific
//! spelling first.

use feeder_types::SensorField;

use super::lookup::KeyChain;

/// Wrapper sub-mappings searched for sensor fields.
pub const SENSOR_WRAPPERS: &[&str] = &["sensors"];

/// Wrapper sub-mappings searched for control fields.
pub const CONTROL_WRAPPERS: &[&str] = &["controls", "control"];

pub const FEEDER_TEMPERATURE: KeyChain = KeyChain {
    field: "temperature.feeder",
    paths: &[
        "feedTemp",
        "feed_temp",
        "feederTemp",
        "DHT22_FEEDER.temperature",
        "feed_tank.temperature",
        "FEED_TEMPERATURE.temperature",
    ],
};

pub const SYSTEM_TEMPERATURE: KeyChain = KeyChain {
    field: "temperature.system",
    paths: &[
        "boxTemp",
        "box_temp",
        "systemTemp",
        "DHT22_SYSTEM.temperature",
        "control_box.temperature",
        "BOX_TEMPERATURE.temperature",
    ],
};

pub const FEEDER_HUMIDITY: KeyChain = KeyChain {
    field: "humidity.feeder",
    paths: &[
        "feedHum",
        "feedHumidity",
        "feed_humidity",
        "DHT22_FEEDER.humidity",
        "feed_tank.humidity",
        "FEED_HUMIDITY.humidity",
    ],
};

pub const SYSTEM_HUMIDITY: KeyChain = KeyChain {
    field: "humidity.system",
    paths: &[
        "boxHum",
        "boxHumidity",
        "box_humidity",
        "systemHumidity",
        "DHT22_SYSTEM.humidity",
        "control_box.humidity",
        "BOX_HUMIDITY.humidity",
    ],
};

pub const BATTERY_VOLTAGE: KeyChain = KeyChain {
    field: "electrical.batteryVoltage",
    paths: &[
        "batteryVoltage",
        "battery_voltage",
        "bat_v",
        "BATTERY_STATUS.voltage",
        "loadVoltage",
        "load_voltage",
        "power.load_voltage",
    ],
};

pub const SOLAR_VOLTAGE: KeyChain = KeyChain {
    field: "electrical.solarVoltage",
    paths: &[
        "solarV",
        "solarVoltage",
        "solar_voltage",
        "sol_v",
        "SOLAR_VOLTAGE.voltage",
        "SOLAR_POWER.voltage",
        "power.solar_voltage",
    ],
};

pub const FEEDER_WEIGHT: KeyChain = KeyChain {
    field: "mechanical.feederWeight",
    paths: &["feederWeight", "weight", "weight_kg", "HX711_FEEDER.weight"],
};

pub const SOIL_MOISTURE: KeyChain = KeyChain {
    field: "mechanical.soilMoisture",
    paths: &[
        "soilMoisture",
        "soil_moisture",
        "soil_moisture_percent",
        "soil",
        "SOIL_MOISTURE.moisture",
    ],
};

pub const TIMESTAMP: KeyChain = KeyChain {
    field: "timestamp",
    paths: &["timestamp", "t", "datetime", "last_updated", "status.last_updated"],
};

pub const AUGER_DIRECTION: KeyChain = KeyChain {
    field: "auger.direction",
    paths: &[
        "auger.direction",
        "augerDirection",
        "auger_direction",
        "auger_state",
        "auger.action",
        "motors.auger",
        "auger",
    ],
};

pub const AUGER_SPEED: KeyChain = KeyChain {
    field: "auger.speed",
    paths: &["auger.speed", "augerSpeed", "auger_speed", "motors.auger_food_dispenser"],
};

pub const BLOWER_STATE: KeyChain = KeyChain {
    field: "blower.state",
    paths: &[
        "blower.state",
        "blower.on",
        "blowerState",
        "blower_state",
        "blowerOn",
        "motors.blower",
        "blower",
    ],
};

pub const BLOWER_SPEED: KeyChain = KeyChain {
    field: "blower.speed",
    paths: &[
        "blower.speed",
        "blowerSpeed",
        "blower_speed",
        "blowerPWM",
        "motors.blower_ventilation",
        "motors.blower",
    ],
};

pub const ACTUATOR_POSITION: KeyChain = KeyChain {
    field: "actuator.position",
    paths: &[
        "actuator.position",
        "actuatorPos",
        "actuatorPosition",
        "actuator_pos",
        "actuator_state",
        "motors.actuator_feeder",
        "motors.actuator",
    ],
};

pub const ACTUATOR_ENABLED: KeyChain = KeyChain {
    field: "actuator.enabled",
    paths: &["actuator.enabled", "actuatorEnabled", "actuator_enabled"],
};

pub const RELAYS: KeyChain = KeyChain {
    field: "relays",
    paths: &["relays", "relay"],
};

/// Chain used to resolve a sensor field.
pub fn sensor_chain(field: SensorField) -> &'static KeyChain {
    match field {
        SensorField::FeederTemperature => &FEEDER_TEMPERATURE,
        SensorField::SystemTemperature => &SYSTEM_TEMPERATURE,
        SensorField::FeederHumidity => &FEEDER_HUMIDITY,
        SensorField::SystemHumidity => &SYSTEM_HUMIDITY,
        SensorField::BatteryVoltage => &BATTERY_VOLTAGE,
        SensorField::SolarVoltage => &SOLAR_VOLTAGE,
        SensorField::FeederWeight => &FEEDER_WEIGHT,
        SensorField::SoilMoisture => &SOIL_MOISTURE,
    }
}
