pub mod detection;
pub mod markers;
pub mod motion;
pub mod scan;

pub use detection::{Cluster, GoalPoint, Leg, Person};
pub use markers::{ColoredPoint, FieldOfView, MarkerColor, MarkerFrame};
pub use motion::MotionUpdate;
pub use scan::{RangeSample, ScanFrame, ScanMessage};
