use serde::{Deserialize, Serialize};

/// Robot motion state as published by the base controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionUpdate {
    pub is_moving: bool,
}

impl MotionUpdate {
    pub fn new(is_moving: bool) -> Self {
        Self { is_moving }
    }
}
