use crate::generator::template::ray_circle_distance;
use crate::workflow::mailbox::Inbox;
use mpdcore::interface::{MotionUpdate, ScanMessage};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Synthetic scene: a round room with one person walking past the robot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub angle_min: f32,
    pub angle_max: f32,
    pub angle_increment: f32,
    pub range_min: f32,
    pub range_max: f32,
    /// Radius of the room wall around the sensor.
    pub wall_distance: f32,
    pub leg_radius: f32,
    /// Distance between the two legs along the walking direction.
    pub stride: f32,
    pub person_start: [f32; 2],
    /// Person displacement per tick.
    pub person_velocity: [f32; 2],
    /// First tick at which the robot reports standing still.
    pub stop_tick: usize,
    pub noise: f32,
    pub seed: u64,
    pub scenario: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            angle_min: -2.356194,
            angle_max: 2.356194,
            angle_increment: 0.006136,
            range_min: 0.02,
            range_max: 5.6,
            wall_distance: 4.0,
            leg_radius: 0.06,
            stride: 0.3,
            person_start: [2.0, -0.5],
            person_velocity: [0.0, 0.08],
            stop_tick: 2,
            noise: 0.002,
            seed: 0,
            scenario: None,
        }
    }
}

impl GeneratorConfig {
    fn beam_count(&self) -> usize {
        let span = (self.angle_max - self.angle_min) / self.angle_increment;
        if span.is_finite() && span > 0.0 {
            // Drivers report both bounding beams.
            span.floor() as usize + 1
        } else {
            0
        }
    }

    pub fn person_center(&self, tick: usize) -> [f32; 2] {
        let t = tick as f32;
        [
            self.person_start[0] + self.person_velocity[0] * t,
            self.person_start[1] + self.person_velocity[1] * t,
        ]
    }

    pub fn leg_centers(&self, tick: usize) -> [[f32; 2]; 2] {
        let center = self.person_center(tick);
        let [vx, vy] = self.person_velocity;
        let speed = vx.hypot(vy);
        let heading = if speed > f32::EPSILON {
            [vx / speed, vy / speed]
        } else {
            [0.0, 1.0]
        };
        let half = self.stride / 2.0;
        [
            [center[0] - heading[0] * half, center[1] - heading[1] * half],
            [center[0] + heading[0] * half, center[1] + heading[1] * half],
        ]
    }
}

/// Seeded source of scan and motion messages, one pair per tick.
pub struct Scenario {
    config: GeneratorConfig,
    rng: StdRng,
}

impl Scenario {
    pub fn new(config: GeneratorConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn scan_at(&mut self, tick: usize) -> ScanMessage {
        let legs = self.config.leg_centers(tick);
        let beams = self.config.beam_count();
        let mut ranges = Vec::with_capacity(beams);

        for beam in 0..beams {
            let angle = self.config.angle_min + beam as f32 * self.config.angle_increment;
            let hit = legs
                .iter()
                .filter_map(|&leg| ray_circle_distance(angle, leg, self.config.leg_radius))
                .fold(self.config.wall_distance, f32::min);
            let jitter = if self.config.noise > 0.0 {
                self.rng.gen_range(-self.config.noise..self.config.noise)
            } else {
                0.0
            };
            ranges.push(hit + jitter);
        }

        ScanMessage {
            range_min: self.config.range_min,
            range_max: self.config.range_max,
            angle_min: self.config.angle_min,
            angle_max: self.config.angle_max,
            angle_increment: self.config.angle_increment,
            ranges,
        }
    }

    pub fn motion_at(&self, tick: usize) -> MotionUpdate {
        MotionUpdate::new(tick < self.config.stop_tick)
    }

    /// Posts this tick's messages, as the sensor and base drivers would.
    pub fn feed(&mut self, tick: usize, inbox: &Inbox) {
        inbox.scans.post(self.scan_at(tick));
        inbox.motion.post(self.motion_at(tick));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_reports_both_bounding_beams() {
        let mut scenario = Scenario::new(GeneratorConfig::default());
        let scan = scenario.scan_at(0);
        assert_eq!(scan.ranges.len(), scan.nominal_beams() + 1);
    }

    #[test]
    fn legs_are_closer_than_the_wall() {
        let config = GeneratorConfig {
            noise: 0.0,
            ..Default::default()
        };
        let mut scenario = Scenario::new(config.clone());
        let scan = scenario.scan_at(0);
        let nearest = scan.ranges.iter().cloned().fold(f32::MAX, f32::min);
        assert!(nearest < 2.0);
        assert!(scan
            .ranges
            .iter()
            .all(|&r| r <= config.wall_distance + f32::EPSILON));
    }

    #[test]
    fn robot_stops_at_configured_tick() {
        let scenario = Scenario::new(GeneratorConfig {
            stop_tick: 3,
            ..Default::default()
        });
        assert!(scenario.motion_at(2).is_moving);
        assert!(!scenario.motion_at(3).is_moving);
    }

    #[test]
    fn same_seed_replays_same_scans() {
        let mut a = Scenario::new(GeneratorConfig::default());
        let mut b = Scenario::new(GeneratorConfig::default());
        assert_eq!(a.scan_at(5), b.scan_at(5));
    }

    #[test]
    fn legs_straddle_the_person_along_heading() {
        let config = GeneratorConfig::default();
        let [back, front] = config.leg_centers(0);
        assert!((back[1] - (-0.65)).abs() < 1e-6);
        assert!((front[1] - (-0.35)).abs() < 1e-6);
        assert_eq!(back[0], front[0]);
    }
}
