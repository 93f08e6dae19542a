//! Channel-based telemetry source.
//!
//! Receives snapshots via a tokio watch channel, for clients that push
//! readings (MQTT, WebSocket) instead of being polled.

use tokio::sync::watch;

use super::{DataSource, RawSnapshot};

/// Yields the latest value of a watch channel whenever it changes.
///
/// ```
/// use feeder_dashboard::ChannelSource;
///
/// let (tx, source) = ChannelSource::create("mqtt://broker:1883/feeder/status");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<RawSnapshot>,
    description: String,
    initial_returned: bool,
}

impl ChannelSource {
    pub fn new(receiver: watch::Receiver<RawSnapshot>, source_description: &str) -> Self {
        Self {
            receiver,
            description: format!("channel: {}", source_description),
            initial_returned: false,
        }
    }

    /// Create a sender and source pair. The initial value is `null`, which
    /// organizes as an empty snapshot.
    pub fn create(source_description: &str) -> (watch::Sender<RawSnapshot>, Self) {
        let (tx, rx) = watch::channel(RawSnapshot::Null);
        (tx, Self::new(rx, source_description))
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<RawSnapshot> {
        if !self.initial_returned {
            self.initial_returned = true;
            self.receiver.mark_changed();
        }

        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<String> {
        if self.receiver.has_changed().is_err() {
            Some("Channel closed".to_string())
        } else {
            None
        }
    }
}
