pub mod geometry;
pub mod stats;

pub use geometry::Point2D;
pub use stats::StatsHelper;
