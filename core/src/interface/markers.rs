use crate::interface::detection::{Cluster, Leg, Person};
use crate::interface::scan::ScanFrame;
use crate::math::Point2D;
use crate::prelude::StageResult;
use crate::processing::bounded::BoundedBuffer;
use serde::{Deserialize, Serialize};

/// Marker colours used by the detector display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerColor {
    /// First beam of a cluster.
    Green,
    /// Last beam of a cluster.
    Red,
    /// Member beam of a moving leg.
    White,
    /// Detected person.
    Yellow,
}

impl MarkerColor {
    pub fn rgba(self) -> [f32; 4] {
        match self {
            MarkerColor::Green => [0.0, 1.0, 0.0, 1.0],
            MarkerColor::Red => [1.0, 0.0, 0.0, 1.0],
            MarkerColor::White => [1.0, 1.0, 1.0, 1.0],
            MarkerColor::Yellow => [1.0, 1.0, 0.0, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColoredPoint {
    pub point: Point2D,
    pub color: MarkerColor,
}

/// Angular coverage drawn as a reference outline around the detections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldOfView {
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_increment: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl Default for FieldOfView {
    fn default() -> Self {
        Self {
            angle_min: -2.356194,
            angle_max: 2.092350,
            angle_increment: 0.006136,
            inner_radius: 0.02,
            outer_radius: 5.6,
        }
    }
}

impl FieldOfView {
    /// Closed outline: in along the first edge, around the outer arc, and
    /// back along the last edge.
    pub fn polyline(&self) -> Vec<Point2D> {
        let interior = if self.angle_increment > 0.0 {
            let span = ((self.angle_max - self.angle_min) / self.angle_increment).floor();
            if span.is_finite() && span > 1.0 {
                span as usize - 1
            } else {
                0
            }
        } else {
            0
        };

        let mut points = Vec::with_capacity(interior + 4);
        points.push(Point2D::from_polar(self.inner_radius, self.angle_min));
        points.push(Point2D::from_polar(self.outer_radius, self.angle_min));
        points.extend((1..=interior).map(|k| {
            Point2D::from_polar(
                self.outer_radius,
                self.angle_min + k as f32 * self.angle_increment,
            )
        }));
        points.push(Point2D::from_polar(self.outer_radius, self.angle_max));
        points.push(Point2D::from_polar(self.inner_radius, self.angle_max));
        points
    }
}

/// Everything the display sink draws for one tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerFrame {
    pub points: Vec<ColoredPoint>,
    pub field_of_view: Vec<Point2D>,
}

impl MarkerFrame {
    /// Lays out cluster bounds, then leg members, then persons.
    ///
    /// Points past `capacity` are dropped; the overflow is returned alongside
    /// the truncated frame.
    pub fn build(
        scan: &ScanFrame,
        clusters: &[Cluster],
        legs: &[Leg],
        persons: &[Person],
        field_of_view: &FieldOfView,
        capacity: usize,
    ) -> (Self, StageResult<()>) {
        let points = scan.points();
        let bounds = clusters.iter().flat_map(|cluster| {
            [
                ColoredPoint {
                    point: points[cluster.start_index],
                    color: MarkerColor::Green,
                },
                ColoredPoint {
                    point: points[cluster.end_index],
                    color: MarkerColor::Red,
                },
            ]
        });
        let leg_members = legs
            .iter()
            .filter_map(|leg| clusters.get(leg.cluster))
            .flat_map(|cluster| points[cluster.start_index..=cluster.end_index].iter())
            .map(|&point| ColoredPoint {
                point,
                color: MarkerColor::White,
            });
        let people = persons.iter().map(|person| ColoredPoint {
            point: person.midpoint,
            color: MarkerColor::Yellow,
        });

        let mut buffer = BoundedBuffer::with_capacity(capacity);
        let status = buffer.extend_truncating(bounds.chain(leg_members).chain(people));
        let frame = Self {
            points: buffer.into_inner(),
            field_of_view: field_of_view.polyline(),
        };
        (frame, status)
    }

    pub fn count(&self, color: MarkerColor) -> usize {
        self.points.iter().filter(|p| p.color == color).count()
    }
}
