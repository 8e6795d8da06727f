//! Gated per-tick detection over the latest scan and motion state.

pub mod sink;
pub mod tracker;

pub use sink::{DetectionSink, RecordingSink};
pub use tracker::MotionStateTracker;

use crate::interface::detection::{Cluster, GoalPoint, Leg, Person};
use crate::interface::markers::{FieldOfView, MarkerFrame};
use crate::interface::motion::MotionUpdate;
use crate::interface::scan::{ScanFrame, ScanMessage};
use crate::math::Point2D;
use crate::prelude::{DetectorConfig, ProcessingStage, StageError, StageResult};
use crate::processing::{
    BackgroundModel, ClusterInput, ClusterStage, LegStage, MotionInput, MotionStage,
    PairingStage, ScanIngestor,
};
use crate::telemetry::{InputStream, LogManager, MetricsRecorder, ReadinessLog};
use std::sync::Arc;

/// Everything one stationary tick produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub background_captured: bool,
    pub clusters: Vec<Cluster>,
    pub legs: Vec<Leg>,
    pub persons: Vec<Person>,
    pub goal: Option<Point2D>,
    pub markers: MarkerFrame,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// At least one input stream has never delivered data.
    Waiting,
    /// The robot is moving; nothing was detected.
    Moving,
    Detected(TickReport),
}

/// Moving-person detector.
///
/// Only the background snapshot, the motion flags and the latest scan live
/// across ticks; every other result is rebuilt by [`tick`](Self::tick).
pub struct MovingPersonDetector {
    config: DetectorConfig,
    field_of_view: FieldOfView,
    tracker: MotionStateTracker,
    background: BackgroundModel,
    scan: Option<ScanFrame>,
    ingestor: ScanIngestor,
    motion: MotionStage,
    clustering: ClusterStage,
    legs: LegStage,
    pairing: PairingStage,
    readiness: ReadinessLog,
    logger: LogManager,
    metrics: Arc<MetricsRecorder>,
}

impl MovingPersonDetector {
    pub fn new(config: DetectorConfig, field_of_view: FieldOfView) -> StageResult<Self> {
        config.validate()?;

        let mut detector = Self {
            config,
            field_of_view,
            tracker: MotionStateTracker::new(),
            background: BackgroundModel::new(),
            scan: None,
            ingestor: ScanIngestor::new(),
            motion: MotionStage::new(),
            clustering: ClusterStage::new(),
            legs: LegStage::new(),
            pairing: PairingStage::new(),
            readiness: ReadinessLog::new(),
            logger: LogManager::new("detector"),
            metrics: Arc::new(MetricsRecorder::new()),
        };
        detector.ingestor.initialize(&detector.config)?;
        detector.motion.initialize(&detector.config)?;
        detector.clustering.initialize(&detector.config)?;
        detector.legs.initialize(&detector.config)?;
        detector.pairing.initialize(&detector.config)?;
        Ok(detector)
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.metrics.clone()
    }

    pub fn tracker(&self) -> &MotionStateTracker {
        &self.tracker
    }

    pub fn background(&self) -> &BackgroundModel {
        &self.background
    }

    /// Replaces the current scan.
    ///
    /// `CapacityExceeded` still stores the truncated scan; any other error
    /// leaves the previous scan in place.
    pub fn on_scan(&mut self, message: &ScanMessage) -> StageResult<()> {
        let ingested = match self.ingestor.execute(message) {
            Ok(ingested) => ingested,
            Err(err) => {
                self.metrics.record_error();
                return Err(err);
            }
        };
        self.scan = Some(ingested.frame);
        match ingested.overflow {
            Some(err) => {
                self.metrics.record_error();
                Err(err)
            }
            None => Ok(()),
        }
    }

    pub fn on_motion(&mut self, update: MotionUpdate) {
        self.tracker.update(update.is_moving);
    }

    /// Runs one detection pass and hands results to `sink`.
    ///
    /// Markers go out on every stationary tick; the goal only when at least
    /// one person was found.
    pub fn tick(&mut self, sink: &mut dyn DetectionSink) -> StageResult<TickOutcome> {
        let laser_ready = self.scan.is_some();
        let robot_ready = self.tracker.is_initialized();
        self.readiness.observe(InputStream::Laser, laser_ready);
        self.readiness.observe(InputStream::RobotState, robot_ready);

        if !(laser_ready && robot_ready) {
            self.metrics.record_skipped();
            return Ok(TickOutcome::Waiting);
        }
        if self.tracker.is_moving() {
            self.logger.detail(format_args!("robot is moving"));
            self.metrics.record_skipped();
            return Ok(TickOutcome::Moving);
        }

        match self.detect(sink) {
            Ok(report) => {
                self.metrics.record_processed(report.persons.len());
                Ok(TickOutcome::Detected(report))
            }
            Err(err) => {
                if err.is_recoverable() {
                    self.metrics.record_error();
                }
                Err(err)
            }
        }
    }

    fn detect(&mut self, sink: &mut dyn DetectionSink) -> StageResult<TickReport> {
        let scan = self
            .scan
            .as_ref()
            .ok_or_else(|| StageError::NotReady("no scan received".into()))?;

        let background_captured = self.tracker.capture_pending();
        if background_captured {
            self.background.capture(scan);
            self.tracker.acknowledge_capture();
            self.metrics.record_capture();
        }

        let dynamic = self.motion.execute(MotionInput {
            scan,
            background: self.background.require()?,
        })?;
        let clusters = self.clustering.execute(ClusterInput {
            scan,
            dynamic: &dynamic,
        })?;
        let legs = self.legs.execute(clusters.as_slice())?;
        let pairing = self.pairing.execute(legs.as_slice())?;

        let (markers, marker_status) = MarkerFrame::build(
            scan,
            &clusters,
            &legs,
            &pairing.persons,
            &self.field_of_view,
            self.config.max_display_points,
        );
        if let Err(err) = marker_status {
            self.logger
                .warn(format_args!("display truncated: {}", err));
            self.metrics.record_error();
        }

        sink.publish_markers(&markers);
        if let Some(goal) = pairing.goal {
            self.logger.record(format_args!(
                "{} moving persons, goal ({:.3}, {:.3})",
                pairing.persons.len(),
                goal.x,
                goal.y
            ));
            sink.publish_goal(GoalPoint::from(goal));
        }

        Ok(TickReport {
            background_captured,
            clusters,
            legs,
            persons: pairing.persons,
            goal: pairing.goal,
            markers,
        })
    }
}
