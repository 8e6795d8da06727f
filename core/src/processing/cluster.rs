use crate::interface::detection::Cluster;
use crate::interface::scan::ScanFrame;
use crate::math::stats::StatsHelper;
use crate::prelude::{DetectorConfig, ProcessingStage, StageError, StageResult};
use crate::processing::motion::DynamicFlags;
use crate::telemetry::log::LogManager;

#[derive(Debug, Clone, Copy)]
pub struct ClusterInput<'a> {
    pub scan: &'a ScanFrame,
    pub dynamic: &'a DynamicFlags,
}

/// Splits a scan into runs of beams with continuous range.
pub struct ClusterStage {
    config: Option<DetectorConfig>,
    logger: LogManager,
}

impl ClusterStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("clustering"),
        }
    }

    fn close(&self, input: &ClusterInput<'_>, start: usize, end: usize) -> Cluster {
        let points = input.scan.points();
        let cluster = Cluster {
            start_index: start,
            end_index: end,
            arc_length: StatsHelper::path_length(&points[start..=end]),
            midpoint: points[start].midpoint(&points[end]),
            dynamic_ratio: StatsHelper::percentage(
                input.dynamic.count_in(start, end),
                end - start + 1,
            ),
        };
        self.logger.detail(format_args!(
            "cluster [{}]({:.3}, {:.3}) -> [{}]({:.3}, {:.3}), size {:.3}, dynamic {:.0}%",
            start,
            points[start].x,
            points[start].y,
            end,
            points[end].x,
            points[end].y,
            cluster.arc_length,
            cluster.dynamic_ratio
        ));
        cluster
    }
}

impl Default for ClusterStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for ClusterStage {
    type Input<'a> = ClusterInput<'a>;
    type Output = Vec<Cluster>;

    fn initialize(&mut self, config: &DetectorConfig) -> StageResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: Self::Input<'_>) -> StageResult<Vec<Cluster>> {
        let threshold = self
            .config
            .as_ref()
            .ok_or_else(|| StageError::Internal("stage not initialized".into()))?
            .cluster_threshold;

        let beams = input.scan.len();
        if beams == 0 {
            return Err(StageError::InvalidInput("no beams to cluster".into()));
        }
        if input.dynamic.len() != beams {
            return Err(StageError::Internal(format!(
                "{} dynamic flags for {} beams",
                input.dynamic.len(),
                beams
            )));
        }

        let mut clusters = Vec::new();
        let mut start = 0;
        let neighbours = input.scan.samples().zip(input.scan.samples().skip(1));
        for (previous, next) in neighbours {
            if (previous.range - next.range).abs() < threshold {
                continue;
            }
            clusters.push(self.close(&input, start, previous.angle_index));
            start = next.angle_index;
        }
        // The open cluster always ends at the last beam.
        clusters.push(self.close(&input, start, beams - 1));

        self.logger
            .record(format_args!("{} clusters over {} beams", clusters.len(), beams));
        Ok(clusters)
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::motion::flags_from;

    fn cluster(ranges: &[f32], dynamic: &[bool]) -> Vec<Cluster> {
        let scan = ScanFrame::from_ranges(ranges, 0.0, 0.01);
        let flags = flags_from(dynamic);
        let mut stage = ClusterStage::new();
        stage.initialize(&DetectorConfig::default()).unwrap();
        stage
            .execute(ClusterInput {
                scan: &scan,
                dynamic: &flags,
            })
            .unwrap()
    }

    fn spans(clusters: &[Cluster]) -> Vec<(usize, usize)> {
        clusters
            .iter()
            .map(|c| (c.start_index, c.end_index))
            .collect()
    }

    #[test]
    fn range_jumps_split_clusters() {
        let ranges = [1.0, 1.0, 1.0, 0.3, 0.3, 0.3, 1.0, 1.0, 1.0, 1.0];
        let dynamic = [
            false, false, false, true, true, true, false, false, false, false,
        ];
        let clusters = cluster(&ranges, &dynamic);
        assert_eq!(spans(&clusters), vec![(0, 2), (3, 5), (6, 9)]);
        assert_eq!(clusters[1].dynamic_ratio, 100.0);
        assert_eq!(clusters[0].dynamic_ratio, 0.0);
    }

    #[test]
    fn clusters_partition_every_beam() {
        let ranges = [2.0, 2.1, 0.5, 3.0, 3.05, 3.1, 1.0, 4.0, 4.1];
        let clusters = cluster(&ranges, &[false; 9]);
        assert_eq!(clusters[0].start_index, 0);
        assert_eq!(clusters.last().unwrap().end_index, ranges.len() - 1);
        for pair in clusters.windows(2) {
            assert_eq!(pair[0].end_index + 1, pair[1].start_index);
        }
        let covered: usize = clusters.iter().map(Cluster::beam_count).sum();
        assert_eq!(covered, ranges.len());
    }

    #[test]
    fn partition_and_ratio_bounds_hold_across_scans() {
        let scans: Vec<(Vec<f32>, Vec<bool>)> = vec![
            (vec![1.0], vec![false]),
            (vec![1.0, 3.0], vec![true, false]),
            (vec![2.0; 12], vec![true; 12]),
            (
                (0..25).map(|i| 1.0 + 0.35 * i as f32).collect(),
                (0..25).map(|i| i % 3 == 0).collect(),
            ),
            (
                (0..40)
                    .map(|i| if (i / 5) % 2 == 0 { 4.0 } else { 1.5 })
                    .collect(),
                (0..40).map(|i| i % 7 < 4).collect(),
            ),
            (
                vec![0.5, 0.55, 0.6, 2.0, 2.1, 5.0, 5.05, 5.1, 5.15, 0.3],
                vec![false, true, true, true, false, false, true, false, true, true],
            ),
        ];

        for (ranges, dynamic) in scans {
            let clusters = cluster(&ranges, &dynamic);
            assert!(!clusters.is_empty());
            assert_eq!(clusters[0].start_index, 0);
            assert_eq!(clusters.last().unwrap().end_index, ranges.len() - 1);
            for pair in clusters.windows(2) {
                assert_eq!(pair[0].end_index + 1, pair[1].start_index);
            }
            let covered: usize = clusters.iter().map(Cluster::beam_count).sum();
            assert_eq!(covered, ranges.len());
            for c in &clusters {
                assert!(
                    (0.0..=100.0).contains(&c.dynamic_ratio),
                    "ratio {} out of bounds",
                    c.dynamic_ratio
                );
            }
        }
    }

    #[test]
    fn jumps_above_threshold_break_continuity() {
        let clusters = cluster(&[1.0, 1.25, 1.5], &[false; 3]);
        assert_eq!(spans(&clusters), vec![(0, 0), (1, 1), (2, 2)]);
    }

    #[test]
    fn single_beam_scan_yields_one_point_cluster() {
        let clusters = cluster(&[1.0], &[true]);
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].arc_length, 0.0);
        assert_eq!(clusters[0].dynamic_ratio, 100.0);
    }

    #[test]
    fn arc_length_sums_steps_and_midpoint_uses_endpoints() {
        let scan = ScanFrame::from_ranges(&[1.0, 1.0, 1.0], 0.0, std::f32::consts::FRAC_PI_2);
        let flags = flags_from(&[false, true, false]);
        let mut stage = ClusterStage::new();
        stage.initialize(&DetectorConfig::default()).unwrap();
        let clusters = stage
            .execute(ClusterInput {
                scan: &scan,
                dynamic: &flags,
            })
            .unwrap();

        assert_eq!(clusters.len(), 1);
        let c = &clusters[0];
        // (1,0) -> (0,1) -> (-1,0): two steps of sqrt(2).
        assert!((c.arc_length - 2.0 * 2f32.sqrt()).abs() < 1e-5);
        assert!(c.midpoint.x.abs() < 1e-6);
        assert!(c.midpoint.y.abs() < 1e-6);
        assert!((c.dynamic_ratio - 100.0 / 3.0).abs() < 1e-4);
    }
}
