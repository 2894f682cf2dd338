use egui::{Pos2, Vec2};

use super::state::GestureSession;
use crate::config::SwipeConfig;
use crate::event::{SwipeEvent, SwipeKind};

/// Classify a finished gesture's displacement.
///
/// The dominant axis is picked first; equal magnitudes fall through to the
/// vertical axis. The displacement along that axis must then strictly exceed
/// `threshold`.
pub fn classify(delta: Vec2, threshold: f32) -> Option<SwipeKind> {
    if delta.x.abs() > delta.y.abs() {
        if delta.x > threshold {
            Some(SwipeKind::Right)
        } else if delta.x < -threshold {
            Some(SwipeKind::Left)
        } else {
            None
        }
    } else if delta.y > threshold {
        Some(SwipeKind::Down)
    } else if delta.y < -threshold {
        Some(SwipeKind::Up)
    } else {
        None
    }
}

/// Follows at most one gesture at a time and classifies it when it ends
#[derive(Debug, Clone)]
pub struct SwipeTracker {
    config: SwipeConfig,
    session: Option<GestureSession>,
}

impl Default for SwipeTracker {
    fn default() -> Self {
        Self::new(SwipeConfig::default())
    }
}

impl SwipeTracker {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    pub fn config(&self) -> &SwipeConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    pub fn is_swiping(&self) -> bool {
        self.session.is_some_and(|s| s.is_active())
    }

    /// Begin a new gesture, discarding any unfinished one
    pub fn start(&mut self, point: Pos2) {
        if self.session.is_some() {
            log::trace!("Discarding unfinished gesture");
        }
        self.session = Some(GestureSession::new(point));
    }

    /// Update the current gesture.
    ///
    /// Returns true when the host should suppress its default handling of this
    /// move. That only happens once the session was already active before this
    /// signal arrived.
    pub fn track(&mut self, point: Pos2) -> bool {
        let Some(session) = self.session.as_mut() else {
            log::trace!("Move at {:?} without a gesture, ignored", point);
            return false;
        };

        let suppress = session.is_active();
        if !suppress {
            let delta = session.delta_to(point);
            let threshold = self.config.start_threshold;
            if delta.x.abs() > threshold || delta.y.abs() > threshold {
                session.activate();
            }
        }
        suppress
    }

    /// Finish the current gesture and classify it. The session is consumed
    /// whether or not a swipe is recognized.
    pub fn finish(&mut self, point: Pos2) -> Option<SwipeEvent> {
        let Some(session) = self.session.take() else {
            log::trace!("End at {:?} without a gesture, ignored", point);
            return None;
        };

        let delta = session.delta_to(point);
        match classify(delta, self.config.swipe_threshold) {
            Some(kind) => Some(SwipeEvent::new(kind, session.start_position(), point)),
            None => {
                log::trace!("Gesture {:?} below swipe threshold", delta);
                None
            }
        }
    }

    /// Forget the current gesture, if any
    pub fn reset(&mut self) {
        self.session = None;
    }
}
