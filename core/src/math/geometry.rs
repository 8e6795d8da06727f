use serde::{Deserialize, Serialize};

/// Planar point in the sensor frame (x forward, y left), in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

impl Point2D {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `range` along the ray at `angle` from the sensor origin.
    pub fn from_polar(range: f32, angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(range * cos, range * sin)
    }

    pub fn distance(&self, other: &Point2D) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Half-way point, computed as `self + (other - self) / 2`.
    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new(
            self.x + (other.x - self.x) / 2.0,
            self.y + (other.y - self.y) / 2.0,
        )
    }
}
