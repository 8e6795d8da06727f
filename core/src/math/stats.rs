use super::geometry::Point2D;

pub struct StatsHelper;

impl StatsHelper {
    /// Share of `count` in `total`, as a percentage in `[0, 100]`.
    pub fn percentage(count: usize, total: usize) -> f32 {
        if total == 0 {
            return 0.0;
        }
        (count.min(total) as f32 / total as f32) * 100.0
    }

    /// Length of the polyline through `points`, in order.
    pub fn path_length(points: &[Point2D]) -> f32 {
        points
            .windows(2)
            .map(|pair| pair[0].distance(&pair[1]))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_empty_total_is_zero() {
        assert_eq!(StatsHelper::percentage(0, 0), 0.0);
        assert_eq!(StatsHelper::percentage(3, 3), 100.0);
    }

    #[test]
    fn path_length_of_single_point_is_zero() {
        assert_eq!(StatsHelper::path_length(&[Point2D::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn path_length_follows_the_polyline() {
        let points = [
            Point2D::new(0.0, 0.0),
            Point2D::new(3.0, 0.0),
            Point2D::new(3.0, 4.0),
        ];
        assert!((StatsHelper::path_length(&points) - 7.0).abs() < 1e-6);
    }
}
