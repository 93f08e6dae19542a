//! Export of the organized dashboard state.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use feeder_types::{ControlView, SensorView};
use serde::Serialize;
use tracing::info;

use crate::error::FeederError;

/// Point-in-time dump of organized views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub timestamp: DateTime<Utc>,
    pub sensors: Vec<SensorView>,
    pub controls: Vec<ControlView>,
}

impl ExportDocument {
    pub fn new(sensors: Vec<SensorView>, controls: Vec<ControlView>) -> Self {
        Self {
            timestamp: Utc::now(),
            sensors,
            controls,
        }
    }
}

/// Destination for export documents.
pub trait ExportSink {
    fn export(&mut self, document: &ExportDocument) -> Result<(), FeederError>;
}

impl ExportSink for Vec<ExportDocument> {
    fn export(&mut self, document: &ExportDocument) -> Result<(), FeederError> {
        self.push(document.clone());
        Ok(())
    }
}

/// Writes each export as pretty-printed JSON, replacing the file.
#[derive(Debug, Clone)]
pub struct FileExportSink {
    path: PathBuf,
}

impl FileExportSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, document: &ExportDocument) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, document)?;
        writeln!(writer)?;
        writer.flush()
    }
}

impl ExportSink for FileExportSink {
    fn export(&mut self, document: &ExportDocument) -> Result<(), FeederError> {
        self.write(document)
            .map_err(|e| FeederError::Export(format!("{}: {}", self.path.display(), e)))?;
        info!(path = %self.path.display(), "exported dashboard state");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feeder_types::QualityLevel;
    use tempfile::TempDir;

    fn document() -> ExportDocument {
        let mut sensors = SensorView::default();
        sensors.electrical.solar_voltage = 13.4;
        sensors.quality = QualityLevel::Degraded;
        ExportDocument::new(vec![sensors], vec![ControlView::default()])
    }

    #[test]
    fn test_file_export_writes_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        let mut sink = FileExportSink::new(&path);

        sink.export(&document()).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert!(written["timestamp"].is_string());
        assert_eq!(written["sensors"][0]["electrical"]["solarVoltage"], 13.4);
        assert_eq!(written["sensors"][0]["quality"], "degraded");
        assert_eq!(written["controls"][0]["auger"]["direction"], "stopped");
    }

    #[test]
    fn test_file_export_unwritable_path() {
        let mut sink = FileExportSink::new("/nonexistent/dir/export.json");
        let err = sink.export(&document()).unwrap_err();
        assert!(matches!(err, FeederError::Export(_)));
    }

    #[test]
    fn test_memory_export() {
        let mut sink: Vec<ExportDocument> = Vec::new();
        let doc = document();
        sink.export(&doc).unwrap();
        assert_eq!(sink, vec![doc]);
    }
}
