//! Recent organized samples, for trend charts and export.

use std::collections::VecDeque;

use feeder_types::{SensorField, SensorView};

/// Default number of samples kept.
pub const MAX_HISTORY_SIZE: usize = 60;

/// Bounded ring of organized sensor views, oldest first.
#[derive(Debug, Clone)]
pub struct History {
    samples: VecDeque<SensorView>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_SIZE)
    }

    /// History keeping at most `capacity` samples (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a sample, evicting the oldest once full.
    pub fn record(&mut self, view: SensorView) {
        self.samples.push_back(view);
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn latest(&self) -> Option<&SensorView> {
        self.samples.back()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> impl Iterator<Item = &SensorView> {
        self.samples.iter()
    }

    /// Values of one field across the history, oldest first.
    ///
    /// Zero readings are kept so the series lines up with the samples.
    pub fn series(&self, field: SensorField) -> Vec<f64> {
        self.samples.iter().map(|view| view.get(field)).collect()
    }

    /// Change of a field between the two most recent non-zero readings.
    ///
    /// Returns None if there's not enough history.
    pub fn trend(&self, field: SensorField) -> Option<f64> {
        let mut readings =
            self.samples.iter().rev().map(|view| view.get(field)).filter(|v| *v != 0.0);
        let current = readings.next()?;
        let previous = readings.next()?;
        Some(current - previous)
    }
}
