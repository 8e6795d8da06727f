use crate::math::Point2D;
use ndarray::{Array1, ArrayView1};
use serde::{Deserialize, Serialize};

/// Raw planar range scan as delivered by the sensor driver.
///
/// `ranges` holds one sample per beam in ascending angle order, starting at
/// `angle_min` and stepping by `angle_increment` radians.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanMessage {
    pub range_min: f32,
    pub range_max: f32,
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_increment: f32,
    pub ranges: Vec<f32>,
}

impl ScanMessage {
    /// Beam count implied by the angular bounds, before any clamping.
    pub fn nominal_beams(&self) -> usize {
        let span = (self.angle_max - self.angle_min) / self.angle_increment;
        if span.is_finite() && span > 0.0 {
            span.floor() as usize
        } else {
            0
        }
    }
}

/// One beam of an ingested scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSample {
    pub angle_index: usize,
    pub range: f32,
    pub point: Point2D,
}

/// Ingested scan: filtered ranges and their Cartesian points, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanFrame {
    ranges: Array1<f32>,
    points: Vec<Point2D>,
}

impl ScanFrame {
    pub(crate) fn new(ranges: Vec<f32>, points: Vec<Point2D>) -> Self {
        debug_assert_eq!(ranges.len(), points.len());
        Self {
            ranges: Array1::from(ranges),
            points,
        }
    }

    /// Builds a frame straight from ranges already in the sensor's valid
    /// window, with beam `i` at `angle_min + i * angle_increment`.
    pub fn from_ranges(ranges: &[f32], angle_min: f32, angle_increment: f32) -> Self {
        let points = ranges
            .iter()
            .enumerate()
            .map(|(i, &r)| Point2D::from_polar(r, angle_min + i as f32 * angle_increment))
            .collect();
        Self::new(ranges.to_vec(), points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn ranges(&self) -> ArrayView1<'_, f32> {
        self.ranges.view()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    pub fn samples(&self) -> impl Iterator<Item = RangeSample> + '_ {
        self.ranges
            .iter()
            .zip(&self.points)
            .enumerate()
            .map(|(angle_index, (&range, &point))| RangeSample {
                angle_index,
                range,
                point,
            })
    }
}
