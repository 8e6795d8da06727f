use serde::{Deserialize, Serialize};

/// Tuning shared by every detection stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Upper bound on the number of beams kept from one scan.
    pub max_beams: usize,
    /// Maximum range jump between neighbouring beams of one cluster.
    pub cluster_threshold: f32,
    /// Range difference against the background above which a beam is dynamic.
    pub detection_threshold: f32,
    /// Percentage of dynamic beams a cluster needs to count as moving.
    pub dynamic_threshold: f32,
    pub leg_size_min: f32,
    pub leg_size_max: f32,
    /// Maximum distance between the two legs of one person.
    pub legs_distance_max: f32,
    pub max_display_points: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            max_beams: 1000,
            cluster_threshold: 0.2,
            detection_threshold: 0.2,
            dynamic_threshold: 75.0,
            leg_size_min: 0.05,
            leg_size_max: 0.25,
            legs_distance_max: 0.7,
            max_display_points: 2000,
        }
    }
}

impl DetectorConfig {
    pub fn validate(&self) -> StageResult<()> {
        if self.max_beams == 0 {
            return Err(StageError::InvalidInput("max_beams must be positive".into()));
        }
        if self.max_display_points == 0 {
            return Err(StageError::InvalidInput(
                "max_display_points must be positive".into(),
            ));
        }
        let thresholds = [
            ("cluster_threshold", self.cluster_threshold),
            ("detection_threshold", self.detection_threshold),
            ("leg_size_min", self.leg_size_min),
            ("legs_distance_max", self.legs_distance_max),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(StageError::InvalidInput(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if !(self.leg_size_max > self.leg_size_min) {
            return Err(StageError::InvalidInput(format!(
                "leg size window ({}, {}) is empty",
                self.leg_size_min, self.leg_size_max
            )));
        }
        if !(0.0..=100.0).contains(&self.dynamic_threshold) {
            return Err(StageError::InvalidInput(format!(
                "dynamic_threshold {} outside [0, 100]",
                self.dynamic_threshold
            )));
        }
        Ok(())
    }
}

/// Common error type for stage execution.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StageError {
    #[error("scan has {requested} beams, capacity is {capacity}")]
    CapacityExceeded { requested: usize, capacity: usize },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not ready: {0}")]
    NotReady(String),
    #[error("no background captured before motion classification")]
    NoBackground,
    #[error("background has {background} beams but scan has {scan}")]
    BackgroundMismatch { background: usize, scan: usize },
    #[error("internal failure: {0}")]
    Internal(String),
}

impl StageError {
    /// Errors after which the next tick may proceed normally.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StageError::NoBackground | StageError::Internal(_))
    }
}

pub type StageResult<T> = Result<T, StageError>;

/// A step of the detection pipeline.
///
/// Inputs borrow the previous stage's output so per-tick data is never
/// retained by a stage between ticks.
pub trait ProcessingStage {
    type Input<'a>;
    type Output;

    fn initialize(&mut self, config: &DetectorConfig) -> StageResult<()>;
    fn execute(&mut self, input: Self::Input<'_>) -> StageResult<Self::Output>;
    fn cleanup(&mut self);
}
