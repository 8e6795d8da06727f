use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub struct MetricsRecorder {
    inner: Mutex<MetricsSnapshot>,
}

/// Counters accumulated since the detector started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub ticks_processed: usize,
    pub ticks_skipped: usize,
    pub background_captures: usize,
    pub persons_detected: usize,
    pub recoverable_errors: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(MetricsSnapshot::default()),
        }
    }

    fn update(&self, apply: impl FnOnce(&mut MetricsSnapshot)) {
        if let Ok(mut metrics) = self.inner.lock() {
            apply(&mut metrics);
        }
    }

    pub fn record_processed(&self, persons: usize) {
        self.update(|m| {
            m.ticks_processed += 1;
            m.persons_detected += persons;
        });
    }

    pub fn record_skipped(&self) {
        self.update(|m| m.ticks_skipped += 1);
    }

    pub fn record_capture(&self) {
        self.update(|m| m.background_captures += 1);
    }

    pub fn record_error(&self) {
        self.update(|m| m.recoverable_errors += 1);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        self.inner
            .lock()
            .map(|metrics| *metrics)
            .unwrap_or_default()
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}
