//! Actuation state reported by the feeder.

use std::collections::BTreeMap;
use std::fmt;

/// Rotation of the auger (feed screw).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AugerDirection {
    Forward,
    Reverse,
    #[default]
    Stopped,
}

impl AugerDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AugerDirection::Forward => "forward",
            AugerDirection::Reverse => "reverse",
            AugerDirection::Stopped => "stopped",
        }
    }
}

impl fmt::Display for AugerDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Auger motor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AugerState {
    pub direction: AugerDirection,
    /// PWM duty, 0-255.
    pub speed: u8,
    /// True whenever the direction is not [`AugerDirection::Stopped`].
    pub enabled: bool,
}

impl AugerState {
    /// Build an auger state, deriving `enabled` from the direction.
    pub fn new(direction: AugerDirection, speed: u8) -> Self {
        Self {
            direction,
            speed,
            enabled: direction != AugerDirection::Stopped,
        }
    }
}

/// Blower motor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlowerState {
    /// Whether the blower is switched on.
    pub state: bool,
    /// PWM duty, 0-255.
    pub speed: u8,
}

/// Linear actuator position as reported upstream.
///
/// Some firmware revisions report a numeric position, others a label such as
/// `"up"` or `"down"`. Both are kept as-is.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ActuatorPosition {
    Value(f64),
    Label(String),
}

impl Default for ActuatorPosition {
    fn default() -> Self {
        ActuatorPosition::Value(0.0)
    }
}

impl fmt::Display for ActuatorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActuatorPosition::Value(v) => write!(f, "{}", v),
            ActuatorPosition::Label(label) => f.write_str(label),
        }
    }
}

/// Linear actuator state.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActuatorState {
    pub position: ActuatorPosition,
    pub enabled: bool,
}

/// Normalized actuation state of the whole device.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ControlView {
    pub auger: AugerState,
    pub blower: BlowerState,
    pub actuator: ActuatorState,
    /// Switched outputs keyed by the name the device uses. The set is open:
    /// names unknown to this crate are kept verbatim.
    pub relays: BTreeMap<String, bool>,
}

impl ControlView {
    /// Names of relays that are currently on.
    pub fn active_relays(&self) -> impl Iterator<Item = &str> {
        self.relays.iter().filter(|(_, on)| **on).map(|(name, _)| name.as_str())
    }
}
