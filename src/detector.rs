//! Swipe detection bound to a pointer surface.
//!
//! A [`GestureDetector`] registers one listener per signal phase on its surface
//! when attached, follows one gesture at a time, and emits at most one
//! [`SwipeEvent`] per gesture to the listeners subscribed for its [`SwipeKind`].
//!
//! ```rust,no_run
//! use std::rc::Rc;
//! use touch_swipe::{GestureDetector, SwipeKind, TouchSurface};
//!
//! let surface = Rc::new(TouchSurface::new());
//! let mut detector = GestureDetector::attach(Rc::clone(&surface));
//! detector.subscribe(SwipeKind::Left, |swipe| println!("left by {}", swipe.diff_x()));
//!
//! // each frame:
//! // surface.feed_context(ctx);
//!
//! detector.destroy();
//! ```
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use egui::Pos2;

use crate::config::SwipeConfig;
use crate::error::ConfigResult;
use crate::error::ListenerResult;
use crate::event::{EmitReport, EventBus, Listener, SwipeEvent, SwipeKind};
use crate::input::{PointerSurface, SignalPhase, SurfaceEvent, SwipeTracker};

#[derive(Debug)]
struct DetectorState {
    tracker: SwipeTracker,
    destroyed: bool,
}

type SwipeBus = EventBus<SwipeKind, SwipeEvent>;

/// A recognized swipe together with what happened when it was emitted
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeDispatch {
    pub swipe: SwipeEvent,
    pub report: EmitReport,
}

/// Recognizes left/right/up/down swipes on a pointer surface
pub struct GestureDetector<S: PointerSurface> {
    surface: Rc<S>,
    state: Rc<RefCell<DetectorState>>,
    swipes: Rc<SwipeBus>,
    /// The exact handles registered on the surface, kept for removal
    signal_listeners: Vec<(SignalPhase, Listener<SurfaceEvent>)>,
}

impl<S: PointerSurface> GestureDetector<S> {
    /// Attach a detector with default thresholds to `surface`
    pub fn attach(surface: Rc<S>) -> Self {
        Self::attach_with(surface, SwipeConfig::default())
    }

    /// Attach a detector with custom thresholds. The config is validated first.
    pub fn with_config(surface: Rc<S>, config: SwipeConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::attach_with(surface, config))
    }

    fn attach_with(surface: Rc<S>, config: SwipeConfig) -> Self {
        let state = Rc::new(RefCell::new(DetectorState {
            tracker: SwipeTracker::new(config),
            destroyed: false,
        }));
        let swipes = Rc::new(SwipeBus::new());

        let signal_listeners: Vec<_> = [SignalPhase::Start, SignalPhase::Move, SignalPhase::End]
            .into_iter()
            .map(|phase| {
                let listener = signal_listener(Rc::downgrade(&state), Rc::downgrade(&swipes));
                surface.add_signal_listener(phase, &listener);
                (phase, listener)
            })
            .collect();

        log::info!("Gesture detector attached ({:?})", config);

        Self {
            surface,
            state,
            swipes,
            signal_listeners,
        }
    }

    /// Subscribe `listener` to swipes of `kind`
    pub fn on(&self, kind: SwipeKind, listener: &Listener<SwipeEvent>) -> &Self {
        self.swipes.on(kind, listener);
        self
    }

    /// Remove `listener` from `kind`, or every listener of `kind` when `None`
    pub fn off(&self, kind: SwipeKind, listener: Option<&Listener<SwipeEvent>>) -> &Self {
        self.swipes.off(kind, listener);
        self
    }

    /// Subscribe a closure and return the handle that unsubscribes it
    pub fn subscribe(
        &self,
        kind: SwipeKind,
        callback: impl Fn(&SwipeEvent) + 'static,
    ) -> Listener<SwipeEvent> {
        let listener = Listener::new(callback);
        self.swipes.on(kind, &listener);
        listener
    }

    /// Subscribe a closure that may fail; failures show up in [`SwipeDispatch::report`]
    pub fn subscribe_fallible(
        &self,
        kind: SwipeKind,
        callback: impl Fn(&SwipeEvent) -> ListenerResult + 'static,
    ) -> Listener<SwipeEvent> {
        let listener = Listener::fallible(callback);
        self.swipes.on(kind, &listener);
        listener
    }

    pub fn listener_count(&self, kind: SwipeKind) -> usize {
        self.swipes.listener_count(kind)
    }

    /// Begin a gesture at `point`, replacing any unfinished one
    pub fn touch_start(&self, point: Pos2) {
        start(&self.state, point);
    }

    /// Track movement of the current gesture.
    ///
    /// Returns true when the host should suppress default scrolling for this move.
    pub fn touch_move(&self, point: Pos2) -> bool {
        track(&self.state, point)
    }

    /// End the current gesture, emitting the recognized swipe if any.
    ///
    /// The returned dispatch carries the emission report, so callers can see
    /// which listeners failed.
    pub fn touch_end(&self, point: Pos2) -> Option<SwipeDispatch> {
        finish(&self.state, &self.swipes, point)
    }

    pub fn is_swiping(&self) -> bool {
        self.state.borrow().tracker.is_swiping()
    }

    pub fn has_session(&self) -> bool {
        self.state.borrow().tracker.session().is_some()
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.borrow().destroyed
    }

    pub fn config(&self) -> SwipeConfig {
        *self.state.borrow().tracker.config()
    }

    pub fn surface(&self) -> &Rc<S> {
        &self.surface
    }

    /// Detach from the surface and drop every swipe listener.
    ///
    /// Calling this more than once is a no-op.
    pub fn destroy(&mut self) {
        if self.state.borrow().destroyed {
            return;
        }

        for (phase, listener) in self.signal_listeners.drain(..) {
            self.surface.remove_signal_listener(phase, &listener);
        }
        self.swipes.clear();

        let mut state = self.state.borrow_mut();
        state.tracker.reset();
        state.destroyed = true;

        log::info!("Gesture detector destroyed");
    }
}

impl<S: PointerSurface> Drop for GestureDetector<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<S: PointerSurface> std::fmt::Debug for GestureDetector<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GestureDetector")
            .field("state", &self.state.borrow())
            .field("swipes", &self.swipes)
            .finish()
    }
}

fn signal_listener(
    state: Weak<RefCell<DetectorState>>,
    swipes: Weak<SwipeBus>,
) -> Listener<SurfaceEvent> {
    Listener::new(move |event: &SurfaceEvent| {
        let (Some(state), Some(swipes)) = (state.upgrade(), swipes.upgrade()) else {
            return;
        };

        match event.phase() {
            SignalPhase::Start => start(&state, event.position()),
            SignalPhase::Move => {
                if track(&state, event.position()) {
                    event.prevent_default();
                }
            }
            SignalPhase::End => {
                // Surface hosts see failures through the bus log only
                let _ = finish(&state, &swipes, event.position());
            }
        }
    })
}

fn start(state: &RefCell<DetectorState>, point: Pos2) {
    let mut state = state.borrow_mut();
    if state.destroyed {
        log::debug!("Start signal after destroy, ignored");
        return;
    }
    state.tracker.start(point);
}

fn track(state: &RefCell<DetectorState>, point: Pos2) -> bool {
    let mut state = state.borrow_mut();
    if state.destroyed {
        return false;
    }
    state.tracker.track(point)
}

fn finish(state: &RefCell<DetectorState>, swipes: &SwipeBus, point: Pos2) -> Option<SwipeDispatch> {
    // Release the state borrow before running listeners
    let swipe = {
        let mut state = state.borrow_mut();
        if state.destroyed {
            return None;
        }
        state.tracker.finish(point)?
    };

    log::debug!(
        "Swipe {} recognized (dx={}, dy={})",
        swipe.kind,
        swipe.diff_x(),
        swipe.diff_y()
    );
    let report = swipes.emit(swipe.kind, &swipe);
    Some(SwipeDispatch { swipe, report })
}
