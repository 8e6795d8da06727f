use mpdcore::interface::{GoalPoint, MarkerColor, MarkerFrame};
use serde::{Deserialize, Serialize};

/// Latest detector output as served to display clients.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct VisualizationModel {
    pub markers: MarkerFrame,
    pub person_count: usize,
    pub goal: Option<GoalPoint>,
    pub goals_published: usize,
}

impl VisualizationModel {
    pub fn apply_markers(&mut self, markers: &MarkerFrame) {
        self.markers = markers.clone();
        self.person_count = markers.count(MarkerColor::Yellow);
    }

    pub fn apply_goal(&mut self, goal: GoalPoint) {
        self.goal = Some(goal);
        self.goals_published += 1;
    }
}
