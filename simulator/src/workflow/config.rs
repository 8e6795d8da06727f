use crate::generator::profile::GeneratorConfig;
use anyhow::{bail, Context};
use mpdcore::interface::FieldOfView;
use mpdcore::prelude::DetectorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub detector: DetectorConfig,
    pub field_of_view: FieldOfView,
    pub generator: GeneratorConfig,
    pub rate_hz: f32,
    pub ticks: usize,
    pub bind: SocketAddr,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            detector: DetectorConfig::default(),
            field_of_view: FieldOfView::default(),
            generator: GeneratorConfig::default(),
            rate_hz: 10.0,
            ticks: 30,
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(
        cluster_threshold: f32,
        detection_threshold: f32,
        legs_distance_max: f32,
        rate_hz: f32,
        ticks: usize,
    ) -> Self {
        Self {
            detector: DetectorConfig {
                cluster_threshold,
                detection_threshold,
                legs_distance_max,
                ..Default::default()
            },
            rate_hz,
            ticks,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.detector
            .validate()
            .context("validating detector config")?;
        if !(self.rate_hz.is_finite() && self.rate_hz > 0.0) {
            bail!("rate_hz must be positive, got {}", self.rate_hz);
        }
        Ok(())
    }
}
