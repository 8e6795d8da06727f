use crate::math::Point2D;
use serde::{Deserialize, Serialize};

/// Maximal run of beams whose neighbouring ranges are continuous.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub start_index: usize,
    pub end_index: usize,
    /// Sum of distances between consecutive member points.
    pub arc_length: f32,
    /// Half-way point between the first and last member points.
    pub midpoint: Point2D,
    /// Percentage of member beams classified dynamic, in `[0, 100]`.
    pub dynamic_ratio: f32,
}

impl Cluster {
    pub fn beam_count(&self) -> usize {
        self.end_index - self.start_index + 1
    }
}

/// Cluster shaped and moving like a leg.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub midpoint: Point2D,
    /// Index of the source cluster in the same tick's cluster list.
    pub cluster: usize,
}

/// Two legs close enough to belong to one walking person.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub midpoint: Point2D,
    pub legs: (usize, usize),
}

/// Navigation goal handed to the downstream planner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GoalPoint {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Point2D> for GoalPoint {
    fn from(point: Point2D) -> Self {
        Self {
            x: point.x,
            y: point.y,
            z: 0.0,
        }
    }
}
