//! Push-style delivery on top of a polled [`DataSource`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::{DataSource, RawSnapshot};

/// Something a subscription delivers.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// A new raw snapshot.
    Snapshot(RawSnapshot),
    /// The source reported an error. Delivered once per distinct error.
    Disconnected(String),
}

/// Handle to a running subscription.
///
/// Dropping the handle unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    active: Arc<AtomicBool>,
    stop_tx: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Stop delivering events. Safe to call more than once.
    pub fn unsubscribe(&mut self) {
        if self.active.swap(false, Ordering::SeqCst) {
            debug!("unsubscribing from telemetry source");
        }
        let _ = self.stop_tx.send(true);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

/// Poll `source` every `interval` on a background task and pass each event
/// to `callback`, in the order the source yields them.
///
/// Must be called inside a tokio runtime.
pub fn subscribe<F>(
    mut source: Box<dyn DataSource>,
    interval: Duration,
    mut callback: F,
) -> Subscription
where
    F: FnMut(FeedEvent) + Send + 'static,
{
    let active = Arc::new(AtomicBool::new(true));
    let (stop_tx, mut stop_rx) = watch::channel(false);
    let running = active.clone();

    info!(source = source.description(), "subscribing to telemetry");

    let task = tokio::spawn(async move {
        let mut timer = tokio::time::interval(interval);
        let mut reported: Option<String> = None;

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    while let Some(snapshot) = source.poll() {
                        if !running.load(Ordering::SeqCst) {
                            return;
                        }
                        reported = None;
                        callback(FeedEvent::Snapshot(snapshot));
                    }

                    let error = source.error();
                    if error.is_some() && error != reported {
                        if !running.load(Ordering::SeqCst) {
                            return;
                        }
                        reported = error.clone();
                        if let Some(message) = error {
                            callback(FeedEvent::Disconnected(message));
                        }
                    }
                }
                _ = stop_rx.changed() => {
                    if *stop_rx.borrow() {
                        break;
                    }
                }
            }
        }
    });

    Subscription {
        active,
        stop_tx,
        task: Some(task),
    }
}
