use log::{debug, info, warn};
use std::fmt;

/// Stage-boundary logger shared by the pipeline stages.
pub struct LogManager {
    stage: &'static str,
}

impl LogManager {
    pub fn new(stage: &'static str) -> Self {
        Self { stage }
    }

    pub fn record(&self, message: fmt::Arguments<'_>) {
        info!("[{}] {}", self.stage, message);
    }

    pub fn detail(&self, message: fmt::Arguments<'_>) {
        debug!("[{}] {}", self.stage, message);
    }

    pub fn warn(&self, message: fmt::Arguments<'_>) {
        warn!("[{}] {}", self.stage, message);
    }
}

/// Input streams the detector waits on before it can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputStream {
    Laser,
    RobotState,
}

impl InputStream {
    fn waiting_message(self) -> &'static str {
        match self {
            InputStream::Laser => "waiting for laser data",
            InputStream::RobotState => "waiting for robot state",
        }
    }

    fn ready_message(self) -> &'static str {
        match self {
            InputStream::Laser => "laser data are ok",
            InputStream::RobotState => "robot state is ok",
        }
    }
}

/// Logs readiness of each input stream only when it changes.
#[derive(Debug, Default)]
pub struct ReadinessLog {
    laser_announced: bool,
    robot_announced: bool,
}

impl ReadinessLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports the current availability of `stream`; returns whether a line
    /// was logged.
    pub fn observe(&mut self, stream: InputStream, available: bool) -> bool {
        let announced = match stream {
            InputStream::Laser => &mut self.laser_announced,
            InputStream::RobotState => &mut self.robot_announced,
        };
        match (available, *announced) {
            (false, false) => {
                info!("{}", stream.waiting_message());
                *announced = true;
                true
            }
            (true, true) => {
                info!("{}", stream.ready_message());
                *announced = false;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn readiness_is_logged_on_edges_only() {
        let mut log = ReadinessLog::new();
        assert!(log.observe(InputStream::Laser, false));
        assert!(!log.observe(InputStream::Laser, false));
        assert!(log.observe(InputStream::Laser, true));
        assert!(!log.observe(InputStream::Laser, true));
    }

    #[test]
    fn streams_are_tracked_independently() {
        let mut log = ReadinessLog::new();
        assert!(log.observe(InputStream::Laser, false));
        assert!(log.observe(InputStream::RobotState, false));
        assert!(log.observe(InputStream::RobotState, true));
        assert!(!log.observe(InputStream::Laser, false));
    }

    #[test]
    fn stream_available_from_the_start_is_silent() {
        let mut log = ReadinessLog::new();
        assert!(!log.observe(InputStream::RobotState, true));
    }
}
