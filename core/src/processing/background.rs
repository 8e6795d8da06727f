use crate::interface::scan::ScanFrame;
use crate::prelude::{StageError, StageResult};
use crate::telemetry::log::LogManager;
use ndarray::{Array1, ArrayView1};

/// Ranges seen at the moment the robot came to rest.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundSnapshot {
    ranges: Array1<f32>,
}

impl BackgroundSnapshot {
    pub fn ranges(&self) -> ArrayView1<'_, f32> {
        self.ranges.view()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

/// Owns the background snapshot across ticks.
pub struct BackgroundModel {
    snapshot: Option<BackgroundSnapshot>,
    logger: LogManager,
}

impl BackgroundModel {
    pub fn new() -> Self {
        Self {
            snapshot: None,
            logger: LogManager::new("background"),
        }
    }

    /// Replaces any earlier snapshot with the ranges of `scan`.
    pub fn capture(&mut self, scan: &ScanFrame) {
        self.snapshot = Some(BackgroundSnapshot {
            ranges: scan.ranges().to_owned(),
        });
        self.logger
            .record(format_args!("background stored ({} beams)", scan.len()));
    }

    pub fn snapshot(&self) -> Option<&BackgroundSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn require(&self) -> StageResult<&BackgroundSnapshot> {
        self.snapshot.as_ref().ok_or(StageError::NoBackground)
    }
}

impl Default for BackgroundModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_replaces_previous_snapshot() {
        let mut model = BackgroundModel::new();
        assert_eq!(model.require(), Err(StageError::NoBackground));

        model.capture(&ScanFrame::from_ranges(&[1.0, 2.0], 0.0, 0.1));
        model.capture(&ScanFrame::from_ranges(&[3.0, 4.0, 5.0], 0.0, 0.1));
        let snapshot = model.require().unwrap();
        assert_eq!(snapshot.ranges().to_vec(), vec![3.0, 4.0, 5.0]);
    }
}
