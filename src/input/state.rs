use egui::{Pos2, Vec2};

/// Tracked state of one touch, from its start signal to its end signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSession {
    start: Pos2,
    active: bool,
}

impl GestureSession {
    pub fn new(start: Pos2) -> Self {
        Self {
            start,
            active: false,
        }
    }

    pub fn start_position(&self) -> Pos2 {
        self.start
    }

    /// True once the contact has moved past the start threshold
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Mark the session as a swipe in progress. There is no way back.
    pub fn activate(&mut self) {
        self.active = true;
    }

    pub fn delta_to(&self, point: Pos2) -> Vec2 {
        point - self.start
    }
}
