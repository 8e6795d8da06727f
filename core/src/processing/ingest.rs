use crate::interface::scan::{ScanFrame, ScanMessage};
use crate::math::Point2D;
use crate::prelude::{DetectorConfig, ProcessingStage, StageError, StageResult};
use crate::processing::bounded::BoundedBuffer;
use crate::telemetry::log::LogManager;

/// Ingested scan plus the capacity overflow, if the scan had to be cut.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub frame: ScanFrame,
    pub overflow: Option<StageError>,
}

/// Converts raw scan messages into bounded, filtered scan frames.
pub struct ScanIngestor {
    config: Option<DetectorConfig>,
    logger: LogManager,
}

impl ScanIngestor {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("ingest"),
        }
    }
}

impl Default for ScanIngestor {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for ScanIngestor {
    type Input<'a> = &'a ScanMessage;
    type Output = Ingested;

    fn initialize(&mut self, config: &DetectorConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, scan: Self::Input<'_>) -> StageResult<Ingested> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        if !scan.angle_min.is_finite() || !scan.angle_max.is_finite() {
            return Err(StageError::InvalidInput("non-finite scan angles".into()));
        }
        // Out-of-window beams are replaced by range_max, so it must be usable.
        if !scan.range_min.is_finite()
            || !scan.range_max.is_finite()
            || scan.range_min >= scan.range_max
        {
            return Err(StageError::InvalidInput(format!(
                "range window ({}, {}) is not a finite interval",
                scan.range_min, scan.range_max
            )));
        }
        if !(scan.angle_increment > 0.0) {
            return Err(StageError::InvalidInput(format!(
                "angle increment {} is not positive",
                scan.angle_increment
            )));
        }

        let beams = scan.nominal_beams().min(scan.ranges.len());
        if beams == 0 {
            return Err(StageError::InvalidInput("scan has no beams".into()));
        }

        // Out-of-window readings mean "nothing seen" and sit at range_max.
        let filtered = scan.ranges[..beams].iter().map(|&raw| {
            if raw > scan.range_min && raw < scan.range_max {
                raw
            } else {
                scan.range_max
            }
        });
        let mut ranges = BoundedBuffer::with_capacity(config.max_beams);
        let overflow = ranges.extend_truncating(filtered).err();
        if let Some(err) = &overflow {
            self.logger.warn(format_args!("{}, dropping the tail", err));
        }

        let ranges = ranges.into_inner();
        let points = ranges
            .iter()
            .enumerate()
            .map(|(i, &range)| {
                Point2D::from_polar(range, scan.angle_min + i as f32 * scan.angle_increment)
            })
            .collect();

        self.logger
            .detail(format_args!("{} beams ingested", ranges.len()));
        Ok(Ingested {
            frame: ScanFrame::new(ranges, points),
            overflow,
        })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
