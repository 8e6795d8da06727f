use crate::interface::detection::{Leg, Person};
use crate::math::Point2D;
use crate::prelude::{DetectorConfig, ProcessingStage, StageError, StageResult};
use crate::telemetry::log::LogManager;

/// Persons found in one tick and the goal left by the last accepted pair.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pairing {
    pub persons: Vec<Person>,
    pub goal: Option<Point2D>,
}

/// Pairs legs standing close enough to belong to one person.
///
/// Every pair `i < j` is tested and a leg may join several persons. The goal
/// is overwritten by each accepted pair, so only the last one survives.
pub struct PairingStage {
    config: Option<DetectorConfig>,
    logger: LogManager,
}

impl PairingStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("pairing"),
        }
    }
}

impl Default for PairingStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for PairingStage {
    type Input<'a> = &'a [Leg];
    type Output = Pairing;

    fn initialize(&mut self, config: &DetectorConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, legs: Self::Input<'_>) -> StageResult<Pairing> {
        let max_distance = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?
            .legs_distance_max;

        let mut pairing = Pairing::default();
        for (i, first) in legs.iter().enumerate() {
            for (j, second) in legs.iter().enumerate().skip(i + 1) {
                if first.midpoint.distance(&second.midpoint) >= max_distance {
                    continue;
                }
                let midpoint = first.midpoint.midpoint(&second.midpoint);
                self.logger.record(format_args!(
                    "moving person [{}]: leg [{}] + leg [{}] -> ({:.3}, {:.3})",
                    pairing.persons.len(),
                    i,
                    j,
                    midpoint.x,
                    midpoint.y
                ));
                pairing.persons.push(Person {
                    midpoint,
                    legs: (i, j),
                });
                pairing.goal = Some(midpoint);
            }
        }
        Ok(pairing)
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
