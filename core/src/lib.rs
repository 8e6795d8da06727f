//! Moving-person detection from a planar laser scanner.
//!
//! While the robot stands still, each scan is compared against the
//! background captured when it stopped; moving, leg-sized clusters are paired
//! into persons and the last pair becomes the goal to reach.

pub mod detector;
pub mod interface;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use detector::{DetectionSink, MovingPersonDetector, TickOutcome, TickReport};
pub use prelude::{DetectorConfig, ProcessingStage, StageError, StageResult};
