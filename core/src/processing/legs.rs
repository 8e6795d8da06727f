use crate::interface::detection::{Cluster, Leg};
use crate::prelude::{DetectorConfig, ProcessingStage, StageError, StageResult};
use crate::telemetry::log::LogManager;

/// Keeps clusters whose size and motion match a walking leg.
pub struct LegStage {
    config: Option<DetectorConfig>,
    logger: LogManager,
}

impl LegStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("legs"),
        }
    }
}

impl Default for LegStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for LegStage {
    type Input<'a> = &'a [Cluster];
    type Output = Vec<Leg>;

    fn initialize(&mut self, config: &DetectorConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, clusters: Self::Input<'_>) -> StageResult<Vec<Leg>> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?;

        let legs: Vec<Leg> = clusters
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                c.arc_length > config.leg_size_min
                    && c.arc_length < config.leg_size_max
                    && c.dynamic_ratio >= config.dynamic_threshold
            })
            .map(|(index, c)| Leg {
                midpoint: c.midpoint,
                cluster: index,
            })
            .collect();

        for (index, leg) in legs.iter().enumerate() {
            self.logger
                .detail(format_args!("moving leg [{}]: cluster [{}]", index, leg.cluster));
        }

        if !legs.is_empty() {
            self.logger
                .record(format_args!("{} moving legs detected", legs.len()));
        }
        Ok(legs)
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2D;

    fn cluster(start_index: usize, arc_length: f32, dynamic_ratio: f32) -> Cluster {
        Cluster {
            start_index,
            end_index: start_index,
            arc_length,
            midpoint: Point2D::new(start_index as f32, 0.0),
            dynamic_ratio,
        }
    }

    fn classify(clusters: &[Cluster]) -> Vec<Leg> {
        let mut stage = LegStage::new();
        stage.initialize(&DetectorConfig::default()).unwrap();
        stage.execute(clusters).unwrap()
    }

    #[test]
    fn size_window_is_exclusive() {
        let clusters = [
            cluster(0, 0.05, 100.0),
            cluster(1, 0.10, 100.0),
            cluster(2, 0.25, 100.0),
            cluster(3, 0.0, 100.0),
        ];
        let legs = classify(&clusters);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].cluster, 1);
        assert_eq!(legs[0].midpoint, Point2D::new(1.0, 0.0));
    }

    #[test]
    fn dynamic_threshold_is_inclusive() {
        let clusters = [cluster(0, 0.1, 75.0), cluster(1, 0.1, 74.9)];
        let legs = classify(&clusters);
        assert_eq!(legs.len(), 1);
        assert_eq!(legs[0].cluster, 0);
    }

    #[test]
    fn adjacent_legs_are_kept_in_cluster_order() {
        let clusters = [
            cluster(0, 0.1, 80.0),
            cluster(1, 0.1, 90.0),
            cluster(2, 1.0, 100.0),
        ];
        let legs: Vec<usize> = classify(&clusters).iter().map(|l| l.cluster).collect();
        assert_eq!(legs, vec![0, 1]);
    }
}
