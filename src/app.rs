//! Dashboard state.

use std::fmt;
use std::time::Instant;

use feeder_types::{ControlView, QualityLevel, SensorField, SensorView};
use tracing::{debug, warn};

use crate::data::duration::format_duration;
use crate::data::History;
use crate::error::FeederError;
use crate::export::{ExportDocument, ExportSink};
use crate::format::{format_value_with, DEFAULT_PRECISION};
use crate::organizer::Organizer;
use crate::source::{DataSource, FeedEvent, RawSnapshot};

/// Link state towards the telemetry source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionStatus {
    #[default]
    Connecting,
    Connected,
    Disconnected,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Main dashboard state.
#[derive(Debug)]
pub struct App {
    organizer: Organizer,
    pub sensors: Option<SensorView>,
    pub controls: Option<ControlView>,
    pub history: History,
    pub status: ConnectionStatus,
    pub last_error: Option<String>,
    pub snapshots_received: u64,
    /// When the current views were organized.
    pub last_snapshot_at: Option<Instant>,
    pub precision: usize,
}

impl App {
    pub fn new(organizer: Organizer) -> Self {
        Self::with_history(organizer, History::new())
    }

    pub fn with_history(organizer: Organizer, history: History) -> Self {
        Self {
            organizer,
            sensors: None,
            controls: None,
            history,
            status: ConnectionStatus::default(),
            last_error: None,
            snapshots_received: 0,
            last_snapshot_at: None,
            precision: DEFAULT_PRECISION,
        }
    }

    pub fn organizer(&self) -> &Organizer {
        &self.organizer
    }

    /// Apply one event from a subscription.
    pub fn handle(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::Snapshot(raw) => self.apply_snapshot(&raw),
            FeedEvent::Disconnected(reason) => {
                warn!(reason = %reason, "telemetry source disconnected");
                self.status = ConnectionStatus::Disconnected;
                self.last_error = Some(reason);
            }
        }
    }

    /// Organize a raw snapshot and make it the current state.
    pub fn apply_snapshot(&mut self, raw: &RawSnapshot) {
        let sensors = self.organizer.organize_sensor_data(raw);
        let controls = self.organizer.organize_control_data(raw);
        debug!(quality = %sensors.quality, "snapshot organized");

        self.history.record(sensors);
        self.sensors = Some(sensors);
        self.controls = Some(controls);
        self.status = ConnectionStatus::Connected;
        self.last_error = None;
        self.snapshots_received += 1;
        self.last_snapshot_at = Some(Instant::now());
    }

    /// Poll `source` once, applying at most one snapshot.
    ///
    /// Returns true if new data was received.
    pub fn reload_data(&mut self, source: &mut dyn DataSource) -> bool {
        if let Some(snapshot) = source.poll() {
            self.apply_snapshot(&snapshot);
            return true;
        }
        if let Some(err) = source.error() {
            self.handle(FeedEvent::Disconnected(err));
        }
        false
    }

    /// Quality of the current state, offline before the first snapshot.
    pub fn quality(&self) -> QualityLevel {
        self.sensors.map(|s| s.quality).unwrap_or_default()
    }

    /// One-line text rendering of the current state.
    pub fn summary_line(&self) -> String {
        let Some(sensors) = self.sensors else {
            return match &self.last_error {
                Some(err) => format!("[{}] no data: {}", self.status, err),
                None => format!("[{}] waiting for data", self.status),
            };
        };

        let reading = |field: SensorField| {
            let value = sensors.get(field);
            let value = (value != 0.0).then_some(value);
            format_value_with(value, Some(field.unit()), self.precision)
        };
        let trend = match self.history.trend(SensorField::BatteryVoltage) {
            Some(delta) if delta > 0.0 => "+",
            Some(delta) if delta < 0.0 => "-",
            _ => "",
        };

        let mut line = format!(
            "[{}] feed {}/{} box {}/{} bat {}{} sol {} weight {} soil {}",
            sensors.quality,
            reading(SensorField::FeederTemperature),
            reading(SensorField::FeederHumidity),
            reading(SensorField::SystemTemperature),
            reading(SensorField::SystemHumidity),
            reading(SensorField::BatteryVoltage),
            trend,
            reading(SensorField::SolarVoltage),
            reading(SensorField::FeederWeight),
            reading(SensorField::SoilMoisture),
        );

        if let Some(controls) = &self.controls {
            line.push_str(&format!(
                " | auger {} {} blower {} {} actuator {}",
                controls.auger.direction,
                controls.auger.speed,
                if controls.blower.state { "on" } else { "off" },
                controls.blower.speed,
                controls.actuator.position,
            ));
            let relays = controls.active_relays().collect::<Vec<_>>();
            if !relays.is_empty() {
                line.push_str(&format!(" relays {}", relays.join(",")));
            }
        }

        if self.status == ConnectionStatus::Disconnected {
            if let Some(at) = self.last_snapshot_at {
                line.push_str(&format!(
                    " | disconnected, last data {} ago",
                    format_duration(at.elapsed())
                ));
            }
        }

        line
    }

    /// Export the current sensor and control views.
    pub fn export_state(&self, sink: &mut dyn ExportSink) -> Result<(), FeederError> {
        let (Some(sensors), Some(controls)) = (self.sensors, &self.controls) else {
            return Err(FeederError::Export("no data to export".to_string()));
        };
        sink.export(&ExportDocument::new(vec![sensors], vec![controls.clone()]))
    }

    /// Export every sample in the history with the current controls.
    pub fn export_history(&self, sink: &mut dyn ExportSink) -> Result<(), FeederError> {
        if self.history.is_empty() {
            return Err(FeederError::Export("no data to export".to_string()));
        }
        let sensors = self.history.samples().copied().collect();
        let controls = self.controls.iter().cloned().collect();
        sink.export(&ExportDocument::new(sensors, controls))
    }
}
