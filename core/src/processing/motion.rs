use crate::interface::scan::ScanFrame;
use crate::prelude::{DetectorConfig, ProcessingStage, StageError, StageResult};
use crate::processing::background::BackgroundSnapshot;
use crate::telemetry::log::LogManager;
use ndarray::{s, Array1, Zip};

/// Per-beam dynamic/static classification for one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicFlags {
    flags: Array1<bool>,
}

impl DynamicFlags {
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn is_dynamic(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Number of dynamic beams in the inclusive range `[start, end]`.
    pub fn count_in(&self, start: usize, end: usize) -> usize {
        self.flags
            .slice(s![start..=end])
            .iter()
            .filter(|&&dynamic| dynamic)
            .count()
    }

    pub fn dynamic_count(&self) -> usize {
        self.flags.iter().filter(|&&dynamic| dynamic).count()
    }

    pub fn to_vec(&self) -> Vec<bool> {
        self.flags.to_vec()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MotionInput<'a> {
    pub scan: &'a ScanFrame,
    pub background: &'a BackgroundSnapshot,
}

/// Flags beams whose range moved away from the background.
pub struct MotionStage {
    config: Option<DetectorConfig>,
    logger: LogManager,
}

impl MotionStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("motion"),
        }
    }
}

impl Default for MotionStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for MotionStage {
    type Input<'a> = MotionInput<'a>;
    type Output = DynamicFlags;

    fn initialize(&mut self, config: &DetectorConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: Self::Input<'_>) -> StageResult<DynamicFlags> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        let background = input.background.ranges();
        let ranges = input.scan.ranges();
        if background.len() != ranges.len() {
            return Err(StageError::BackgroundMismatch {
                background: background.len(),
                scan: ranges.len(),
            });
        }

        let threshold = config.detection_threshold;
        let flags = Zip::from(&background)
            .and(&ranges)
            .map_collect(|&before, &now| (before - now).abs() > threshold);
        let flags = DynamicFlags { flags };

        self.logger.detail(format_args!(
            "{} of {} beams dynamic",
            flags.dynamic_count(),
            flags.len()
        ));
        Ok(flags)
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
pub(crate) fn flags_from(values: &[bool]) -> DynamicFlags {
    DynamicFlags {
        flags: Array1::from(values.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::background::BackgroundModel;

    fn classify(background: &[f32], current: &[f32]) -> StageResult<DynamicFlags> {
        let mut model = BackgroundModel::new();
        model.capture(&ScanFrame::from_ranges(background, 0.0, 0.01));
        let scan = ScanFrame::from_ranges(current, 0.0, 0.01);

        let mut stage = MotionStage::new();
        stage.initialize(&DetectorConfig::default()).unwrap();
        stage.execute(MotionInput {
            scan: &scan,
            background: model.require()?,
        })
    }

    #[test]
    fn beams_closer_than_background_are_dynamic() {
        let current = [1.0, 1.0, 1.0, 0.3, 0.3, 0.3, 1.0, 1.0, 1.0, 1.0];
        let flags = classify(&[1.0; 10], &current).unwrap();
        let dynamic: Vec<usize> = (0..flags.len()).filter(|&i| flags.is_dynamic(i)).collect();
        assert_eq!(dynamic, vec![3, 4, 5]);
    }

    #[test]
    fn differences_at_threshold_stay_static() {
        let flags = classify(&[1.0, 1.0], &[1.0, 1.5]).unwrap();
        assert_eq!(flags.to_vec(), vec![false, true]);
        let flags = classify(&[2.0], &[2.125]).unwrap();
        assert_eq!(flags.to_vec(), vec![false]);
    }

    #[test]
    fn mismatched_background_is_reported() {
        assert_eq!(
            classify(&[1.0; 3], &[1.0; 4]),
            Err(StageError::BackgroundMismatch {
                background: 3,
                scan: 4
            })
        );
    }
}
