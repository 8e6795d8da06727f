use crate::workflow::config::WorkflowConfig;
use crate::workflow::mailbox::Inbox;
use crate::workflow::rate::FixedRate;
use anyhow::Context;
use log::warn;
use mpdcore::detector::{DetectionSink, MovingPersonDetector, TickOutcome};
use mpdcore::interface::GoalPoint;
use mpdcore::telemetry::MetricsRecorder;
use std::sync::Arc;

/// Totals over a bounded run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub ticks: usize,
    pub detection_ticks: usize,
    pub persons: usize,
    pub last_goal: Option<GoalPoint>,
}

/// Drains the inbox into the detector once per tick.
pub struct Runner {
    detector: MovingPersonDetector,
    inbox: Inbox,
}

impl Runner {
    pub fn new(config: &WorkflowConfig) -> anyhow::Result<Self> {
        let detector =
            MovingPersonDetector::new(config.detector.clone(), config.field_of_view.clone())
                .context("building detector")?;
        Ok(Self {
            detector,
            inbox: Inbox::new(),
        })
    }

    pub fn inbox(&self) -> Inbox {
        self.inbox.clone()
    }

    pub fn metrics(&self) -> Arc<MetricsRecorder> {
        self.detector.metrics()
    }

    /// One tick: take at most one message per stream, then detect.
    ///
    /// Returns `None` when the tick was skipped after a recoverable error.
    pub fn tick(&mut self, sink: &mut dyn DetectionSink) -> anyhow::Result<Option<TickOutcome>> {
        if let Some(scan) = self.inbox.scans.take() {
            if let Err(err) = self.detector.on_scan(&scan) {
                warn!("scan update: {}", err);
            }
        }
        if let Some(update) = self.inbox.motion.take() {
            self.detector.on_motion(update);
        }

        match self.detector.tick(sink) {
            Ok(outcome) => Ok(Some(outcome)),
            Err(err) if err.is_recoverable() => {
                warn!("tick skipped: {}", err);
                Ok(None)
            }
            Err(err) => Err(anyhow::Error::new(err).context("detector invariant violated")),
        }
    }

    /// Runs `ticks` paced ticks, letting `feed` post messages before each.
    pub fn run<F>(
        &mut self,
        ticks: usize,
        pacer: &mut FixedRate,
        sink: &mut dyn DetectionSink,
        mut feed: F,
    ) -> anyhow::Result<RunSummary>
    where
        F: FnMut(usize, &Inbox),
    {
        let mut summary = RunSummary::default();
        for tick in 0..ticks {
            feed(tick, &self.inbox);
            let outcome = self
                .tick(sink)
                .with_context(|| format!("running tick {}", tick))?;
            summary.ticks += 1;
            if let Some(TickOutcome::Detected(report)) = outcome {
                if let Some(goal) = report.goal {
                    summary.detection_ticks += 1;
                    summary.persons += report.persons.len();
                    summary.last_goal = Some(GoalPoint::from(goal));
                }
            }
            pacer.sleep();
        }
        Ok(summary)
    }
}
