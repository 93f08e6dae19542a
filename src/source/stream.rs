//! Stream-based telemetry source.
//!
//! Receives snapshots as newline-delimited JSON from an async byte stream,
//! such as a TCP connection to the Pi bridge.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use super::{parse_snapshot, DataSource, RawSnapshot};

/// Reads newline-delimited JSON snapshots on a background task.
///
/// Must be created inside a tokio runtime.
///
/// ```
/// use std::io::Cursor;
/// use feeder_dashboard::StreamSource;
///
/// # tokio_test::block_on(async {
/// let stream = Cursor::new(b"{\"feedTemp\": 26.1}\n".to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<RawSnapshot>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl StreamSource {
    /// Spawn a reader task over `reader`. Blank lines are skipped and lines
    /// that are not JSON are recorded as errors without ending the stream.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        *error_handle.lock() = Some("Connection closed".to_string());
                        break;
                    }
                    Ok(_) => {
                        let trimmed = line.trim();
                        if trimmed.is_empty() {
                            continue;
                        }
                        match parse_snapshot(trimmed.as_bytes()) {
                            Ok(snapshot) => {
                                *error_handle.lock() = None;
                                if tx.send(snapshot).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                debug!(error = %e, "skipping non-JSON line");
                                *error_handle.lock() = Some(e.to_string());
                            }
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "telemetry stream failed");
                        *error_handle.lock() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
        }
    }

    /// Build a source from a channel of raw payloads, one JSON document each.
    ///
    /// Suits message-bus clients (MQTT, WebSocket) that already frame
    /// messages.
    pub fn from_bytes_channel(mut rx: mpsc::Receiver<Vec<u8>>, description: &str) -> Self {
        let (tx, snapshot_rx) = mpsc::channel(16);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            while let Some(bytes) = rx.recv().await {
                match parse_snapshot(&bytes) {
                    Ok(snapshot) => {
                        *error_handle.lock() = None;
                        if tx.send(snapshot).await.is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        *error_handle.lock() = Some(e.to_string());
                    }
                }
            }
        });

        Self {
            receiver: snapshot_rx,
            description: format!("stream: {}", description),
            last_error,
        }
    }
}

impl DataSource for StreamSource {
    fn poll(&mut self) -> Option<RawSnapshot> {
        match self.receiver.try_recv() {
            Ok(snapshot) => Some(snapshot),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                let mut error = self.last_error.lock();
                if error.is_none() {
                    *error = Some("Stream disconnected".to_string());
                }
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }
}
