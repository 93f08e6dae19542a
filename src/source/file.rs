//! File-based telemetry source.
//!
//! The Pi bridge rewrites a JSON status file on every reading, either in
//! place or by writing a temporary file and renaming it over the old one.
//! A rename can carry an older modification time, so any change in the
//! file's metadata counts as a new snapshot, not only a newer mtime.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, trace};

use super::{parse_snapshot, DataSource, RawSnapshot};

/// What the source remembers about the last file it accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

impl Fingerprint {
    fn of(metadata: &fs::Metadata) -> Self {
        Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        }
    }
}

/// Polls a JSON status file and yields it whenever it changes.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    accepted: Option<Fingerprint>,
    last_error: Option<String>,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            description: format!("file: {}", path.display()),
            path,
            accepted: None,
            last_error: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the file. `Ok(None)` means the file is mid-write.
    fn load(&self) -> Result<Option<RawSnapshot>, String> {
        let bytes = fs::read(&self.path).map_err(|e| format!("Read error: {}", e))?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        parse_snapshot(&bytes).map(Some).map_err(|e| e.to_string())
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<RawSnapshot> {
        let fingerprint = match fs::metadata(&self.path) {
            Ok(metadata) => Fingerprint::of(&metadata),
            // Between unlink and rename the file is briefly missing.
            Err(e) if e.kind() == ErrorKind::NotFound && self.accepted.is_some() => {
                trace!(path = %self.path.display(), "status file is being replaced");
                return None;
            }
            Err(e) => {
                self.last_error = Some(format!("Read error: {}", e));
                return None;
            }
        };

        if self.accepted == Some(fingerprint) {
            return None;
        }

        match self.load() {
            Ok(Some(snapshot)) => {
                self.accepted = Some(fingerprint);
                self.last_error = None;
                Some(snapshot)
            }
            Ok(None) => {
                trace!(path = %self.path.display(), "status file is empty, retrying");
                None
            }
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "unreadable status file");
                self.last_error = Some(e);
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.clone()
    }
}
