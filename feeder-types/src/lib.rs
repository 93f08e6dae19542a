//! # feeder-types
//!
//! View-model types for fish feeder dashboards. A raw telemetry snapshot from
//! the device is loosely shaped JSON; these are the stable records that views
//! consume after the snapshot has been organized.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: the records work without any serialization framework
//! - **Optional serialization**: enable the `serde` feature for JSON export
//! - **Closed quality set**: [`QualityLevel`] is ordered so the worst level compares lowest
//! - **Open relay set**: relay names are map keys, not enum variants
//!
//! ## Features
//!
//! - `serde`: `Serialize`/`Deserialize` for every record, using the dashboard's
//!   camelCase field names (`batteryVoltage`, `feederWeight`, ...)
//!
//! ## Example
//!
//! ```rust
//! use feeder_types::{QualityLevel, SensorField, SensorView};
//!
//! let mut view = SensorView::default();
//! view.temperature.feeder = 26.1;
//!
//! assert_eq!(view.get(SensorField::FeederTemperature), 26.1);
//! assert_eq!(view.quality, QualityLevel::Offline);
//! assert!(QualityLevel::Stale < QualityLevel::Good);
//! ```

mod control;
mod quality;
mod sensor;

pub use control::*;
pub use quality::*;
pub use sensor::*;
