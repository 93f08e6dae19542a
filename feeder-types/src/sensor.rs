//! Sensor readings grouped the way the dashboard displays them.
//!
//! A reading of exactly `0.0` is the "no reading" sentinel: the device and the
//! organizer both write zero when a sensor did not report.

use crate::QualityLevel;

/// A pair of readings taken in the feeder tank and in the control box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneReadings {
    /// Reading inside the feed tank.
    pub feeder: f64,
    /// Reading inside the control (system) box.
    pub system: f64,
}

impl ZoneReadings {
    /// Both readings, feeder first.
    pub fn values(&self) -> [f64; 2] {
        [self.feeder, self.system]
    }
}

/// Power readings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ElectricalReadings {
    /// Battery (load side) voltage in volts.
    pub battery_voltage: f64,
    /// Solar panel voltage in volts.
    pub solar_voltage: f64,
}

impl ElectricalReadings {
    /// Both readings, battery first.
    pub fn values(&self) -> [f64; 2] {
        [self.battery_voltage, self.solar_voltage]
    }
}

/// Load-cell and soil probe readings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MechanicalReadings {
    /// Feed remaining in the hopper, in the unit the device reports (kg).
    pub feeder_weight: f64,
    /// Soil moisture in percent.
    pub soil_moisture: f64,
}

impl MechanicalReadings {
    /// Both readings, weight first.
    pub fn values(&self) -> [f64; 2] {
        [self.feeder_weight, self.soil_moisture]
    }
}

/// Normalized sensor readings plus the quality of the snapshot they came from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorView {
    pub temperature: ZoneReadings,
    pub humidity: ZoneReadings,
    pub electrical: ElectricalReadings,
    pub mechanical: MechanicalReadings,
    pub quality: QualityLevel,
}

impl SensorView {
    /// Get a single reading.
    pub fn get(&self, field: SensorField) -> f64 {
        match field {
            SensorField::FeederTemperature => self.temperature.feeder,
            SensorField::SystemTemperature => self.temperature.system,
            SensorField::FeederHumidity => self.humidity.feeder,
            SensorField::SystemHumidity => self.humidity.system,
            SensorField::BatteryVoltage => self.electrical.battery_voltage,
            SensorField::SolarVoltage => self.electrical.solar_voltage,
            SensorField::FeederWeight => self.mechanical.feeder_weight,
            SensorField::SoilMoisture => self.mechanical.soil_moisture,
        }
    }

    /// Set a single reading.
    pub fn set(&mut self, field: SensorField, value: f64) {
        let slot = match field {
            SensorField::FeederTemperature => &mut self.temperature.feeder,
            SensorField::SystemTemperature => &mut self.temperature.system,
            SensorField::FeederHumidity => &mut self.humidity.feeder,
            SensorField::SystemHumidity => &mut self.humidity.system,
            SensorField::BatteryVoltage => &mut self.electrical.battery_voltage,
            SensorField::SolarVoltage => &mut self.electrical.solar_voltage,
            SensorField::FeederWeight => &mut self.mechanical.feeder_weight,
            SensorField::SoilMoisture => &mut self.mechanical.soil_moisture,
        };
        *slot = value;
    }

    /// Readings of one group, in field declaration order.
    pub fn group_values(&self, group: SensorGroup) -> [f64; 2] {
        match group {
            SensorGroup::Temperature => self.temperature.values(),
            SensorGroup::Humidity => self.humidity.values(),
            SensorGroup::Electrical => self.electrical.values(),
            SensorGroup::Mechanical => self.mechanical.values(),
        }
    }
}

/// The four reading groups of a [`SensorView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorGroup {
    Temperature,
    Humidity,
    Electrical,
    Mechanical,
}

impl SensorGroup {
    pub const ALL: [SensorGroup; 4] = [
        SensorGroup::Temperature,
        SensorGroup::Humidity,
        SensorGroup::Electrical,
        SensorGroup::Mechanical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorGroup::Temperature => "temperature",
            SensorGroup::Humidity => "humidity",
            SensorGroup::Electrical => "electrical",
            SensorGroup::Mechanical => "mechanical",
        }
    }
}

/// Every individual reading of a [`SensorView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SensorField {
    FeederTemperature,
    SystemTemperature,
    FeederHumidity,
    SystemHumidity,
    BatteryVoltage,
    SolarVoltage,
    FeederWeight,
    SoilMoisture,
}

impl SensorField {
    pub const ALL: [SensorField; 8] = [
        SensorField::FeederTemperature,
        SensorField::SystemTemperature,
        SensorField::FeederHumidity,
        SensorField::SystemHumidity,
        SensorField::BatteryVoltage,
        SensorField::SolarVoltage,
        SensorField::FeederWeight,
        SensorField::SoilMoisture,
    ];

    /// Dotted path of the field in the serialized view (`electrical.batteryVoltage`).
    pub fn path(&self) -> &'static str {
        match self {
            SensorField::FeederTemperature => "temperature.feeder",
            SensorField::SystemTemperature => "temperature.system",
            SensorField::FeederHumidity => "humidity.feeder",
            SensorField::SystemHumidity => "humidity.system",
            SensorField::BatteryVoltage => "electrical.batteryVoltage",
            SensorField::SolarVoltage => "electrical.solarVoltage",
            SensorField::FeederWeight => "mechanical.feederWeight",
            SensorField::SoilMoisture => "mechanical.soilMoisture",
        }
    }

    /// Short label for text displays.
    pub fn label(&self) -> &'static str {
        match self {
            SensorField::FeederTemperature => "feed temp",
            SensorField::SystemTemperature => "box temp",
            SensorField::FeederHumidity => "feed hum",
            SensorField::SystemHumidity => "box hum",
            SensorField::BatteryVoltage => "battery",
            SensorField::SolarVoltage => "solar",
            SensorField::FeederWeight => "weight",
            SensorField::SoilMoisture => "soil",
        }
    }

    /// Display unit suffix.
    pub fn unit(&self) -> &'static str {
        match self {
            SensorField::FeederTemperature | SensorField::SystemTemperature => "°C",
            SensorField::FeederHumidity
            | SensorField::SystemHumidity
            | SensorField::SoilMoisture => "%",
            SensorField::BatteryVoltage | SensorField::SolarVoltage => "V",
            SensorField::FeederWeight => "kg",
        }
    }

    pub fn group(&self) -> SensorGroup {
        match self {
            SensorField::FeederTemperature | SensorField::SystemTemperature => {
                SensorGroup::Temperature
            }
            SensorField::FeederHumidity | SensorField::SystemHumidity => SensorGroup::Humidity,
            SensorField::BatteryVoltage | SensorField::SolarVoltage => SensorGroup::Electrical,
            SensorField::FeederWeight | SensorField::SoilMoisture => SensorGroup::Mechanical,
        }
    }
}
