use crate::interface::detection::GoalPoint;
use crate::interface::markers::MarkerFrame;

/// Receiver of the detector's outbound streams.
pub trait DetectionSink {
    fn publish_goal(&mut self, goal: GoalPoint);
    fn publish_markers(&mut self, markers: &MarkerFrame);
}

/// Sink that keeps everything it was handed, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub goals: Vec<GoalPoint>,
    pub markers: Vec<MarkerFrame>,
}

impl DetectionSink for RecordingSink {
    fn publish_goal(&mut self, goal: GoalPoint) {
        self.goals.push(goal);
    }

    fn publish_markers(&mut self, markers: &MarkerFrame) {
        self.markers.push(markers.clone());
    }
}
