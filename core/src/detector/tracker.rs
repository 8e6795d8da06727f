/// Tracks the robot's moving flag and the stops that call for a new
/// background.
#[derive(Debug, Clone)]
pub struct MotionStateTracker {
    previous_moving: bool,
    current_moving: bool,
    initialized: bool,
    capture_pending: bool,
}

impl MotionStateTracker {
    /// The robot counts as moving until told otherwise, so the first
    /// stationary report is a stop.
    pub fn new() -> Self {
        Self {
            previous_moving: true,
            current_moving: true,
            initialized: false,
            capture_pending: false,
        }
    }

    pub fn update(&mut self, is_moving: bool) {
        self.previous_moving = self.current_moving;
        self.current_moving = is_moving;
        self.initialized = true;

        if self.just_stopped() {
            self.capture_pending = true;
        } else if is_moving {
            self.capture_pending = false;
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_moving(&self) -> bool {
        self.current_moving
    }

    pub fn previous_moving(&self) -> bool {
        self.previous_moving
    }

    /// True right after a moving -> stationary update.
    pub fn just_stopped(&self) -> bool {
        self.previous_moving && !self.current_moving
    }

    /// A stop has been seen and its background not yet stored.
    pub fn capture_pending(&self) -> bool {
        self.capture_pending
    }

    pub fn acknowledge_capture(&mut self) {
        self.capture_pending = false;
    }
}

impl Default for MotionStateTracker {
    fn default() -> Self {
        Self::new()
    }
}
