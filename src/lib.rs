//! # feeder-dashboard
//!
//! Telemetry organizer and headless dashboard for a solar-powered fish
//! feeder.
//!
//! The feeder's controller and its Raspberry Pi bridge publish JSON status
//! snapshots whose keys, nesting and units drift between firmware
//! revisions. This crate turns any such snapshot into one stable view model
//! ([`SensorView`], [`ControlView`]) with a data-quality verdict, and carries
//! the plumbing around it: sources, subscriptions, command forwarding,
//! export and a small CLI.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  source ──▶ subscribe ──▶ FeedEvent ──▶ app::App             │
//! │ (file/tcp/                                │                  │
//! │  channel)                                 ▼                  │
//! │                              organizer (pure) ──▶ views      │
//! │                                           │                  │
//! │                              format / history / export       │
//! │                                                              │
//! │  command ◀── CommandToken (opaque, forwarded verbatim)       │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`organizer`]**: Key-chain lookups, timestamp resolution and quality
//!   classification
//! - **[`format`]**: Placeholder-aware number formatting and status classes
//! - **[`source`]**: The [`DataSource`] trait, file/stream/channel sources
//!   and push subscriptions
//! - **[`command`]**: Opaque command tokens and sinks
//! - **[`app`]**: Dashboard state: latest views, history, connection status
//!
//! ## Usage
//!
//! ```
//! use feeder_dashboard::{organize_control_data, organize_sensor_data};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "sensors": { "feedTemp": 27.5, "batteryVoltage": 12.3 },
//!     "controls": { "relays": { "pump": 1, "light": 0 } }
//! });
//!
//! let sensors = organize_sensor_data(&raw);
//! let controls = organize_control_data(&raw);
//! assert_eq!(sensors.electrical.battery_voltage, 12.3);
//! assert_eq!(controls.relays.get("pump"), Some(&true));
//! ```

pub mod app;
pub mod command;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod format;
pub mod organizer;
pub mod source;

pub use app::{App, ConnectionStatus};
pub use command::{ChannelCommandSink, CommandSink, CommandToken, WriterCommandSink};
pub use config::Settings;
pub use error::{FeederError, SnapshotIssue};
pub use export::{ExportDocument, ExportSink, FileExportSink};
pub use format::{format_value, get_status_class, status_class_for_tag};
pub use organizer::{organize_control_data, organize_sensor_data, Organizer, OrganizerConfig};
pub use source::{
    subscribe, ChannelSource, DataSource, FeedEvent, FileSource, RawSnapshot, StreamSource,
    Subscription,
};

pub use feeder_types::{
    ActuatorPosition, ActuatorState, AugerDirection, AugerState, BlowerState, ControlView,
    QualityLevel, SensorField, SensorGroup, SensorView,
};
