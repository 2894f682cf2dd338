use std::cell::Cell;

use egui::{PointerButton, TouchId, TouchPhase};

use super::{PointerSignal, PointerSurface, SignalPhase, SurfaceEvent};
use crate::event::{EventBus, Listener};

/// A pointer surface fed from egui input.
///
/// Touch events are followed for one finger at a time. A new finger takes over
/// while the followed one has not moved yet, so a touch whose end was never
/// delivered cannot block later gestures; once the followed finger moves, other
/// fingers are ignored until it lifts. Losing window focus drops all tracking.
/// Mouse input (primary button) can be turned on for desktop hosts that do not
/// report touches.
#[derive(Debug)]
pub struct TouchSurface {
    listeners: EventBus<SignalPhase, SurfaceEvent>,
    primary_touch: Cell<Option<PrimaryTouch>>,
    mouse_input: bool,
    mouse_down: Cell<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PrimaryTouch {
    id: TouchId,
    moved: bool,
}

impl Default for TouchSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl TouchSurface {
    pub fn new() -> Self {
        Self {
            listeners: EventBus::new(),
            primary_touch: Cell::new(None),
            mouse_input: false,
            mouse_down: Cell::new(false),
        }
    }

    /// Also translate primary mouse button presses, drags and releases.
    ///
    /// Leave this off when the host already forwards touches as `Event::Touch`,
    /// since egui integrations usually emit both for the same finger.
    pub fn with_mouse_input(mut self, enabled: bool) -> Self {
        self.mouse_input = enabled;
        self
    }

    pub fn listener_count(&self, phase: SignalPhase) -> usize {
        self.listeners.listener_count(phase)
    }

    /// Deliver one signal to the listeners registered for its phase.
    ///
    /// Returns true when a listener asked for default handling to be skipped.
    pub fn deliver(&self, signal: PointerSignal) -> bool {
        let event = SurfaceEvent::new(signal);
        // Failures are logged by the bus; the host only needs the suppression flag
        let _ = self.listeners.emit(signal.phase, &event);
        event.default_prevented()
    }

    /// Translate and deliver a batch of egui events, in order
    pub fn feed_events(&self, events: &[egui::Event]) -> bool {
        let mut prevented = false;
        for event in events {
            if let Some(signal) = self.translate(event) {
                prevented |= self.deliver(signal);
            }
        }
        prevented
    }

    /// Forget the followed touch and any held mouse button.
    ///
    /// Hosts call this when they know input was interrupted; the next start
    /// signal is followed regardless of what came before.
    pub fn reset_tracking(&self) {
        self.primary_touch.set(None);
        self.mouse_down.set(false);
    }

    /// Feed this frame's input events from an egui context
    pub fn feed_context(&self, ctx: &egui::Context) -> bool {
        // Clone first so listeners never run while egui holds its input lock
        let events = ctx.input(|i| i.events.clone());
        self.feed_events(&events)
    }

    fn translate(&self, event: &egui::Event) -> Option<PointerSignal> {
        match event {
            egui::Event::Touch { id, phase, pos, .. } => self.translate_touch(*id, *phase, *pos),
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } if self.mouse_input => {
                if *pressed {
                    self.mouse_down.set(true);
                    Some(PointerSignal::start(*pos))
                } else if self.mouse_down.replace(false) {
                    Some(PointerSignal::end(*pos))
                } else {
                    None
                }
            }
            egui::Event::PointerMoved(pos) if self.mouse_input && self.mouse_down.get() => {
                Some(PointerSignal::moved(*pos))
            }
            egui::Event::WindowFocused(false) => {
                self.reset_tracking();
                None
            }
            _ => None,
        }
    }

    fn translate_touch(&self, id: TouchId, phase: TouchPhase, pos: egui::Pos2) -> Option<PointerSignal> {
        let primary = self.primary_touch.get();
        let is_primary = primary.is_some_and(|p| p.id == id);
        match phase {
            TouchPhase::Start => {
                // A finger that is already dragging keeps the gesture
                if primary.is_some_and(|p| p.moved && p.id != id) {
                    return None;
                }
                self.primary_touch.set(Some(PrimaryTouch { id, moved: false }));
                Some(PointerSignal::start(pos))
            }
            TouchPhase::Move => {
                if !is_primary {
                    return None;
                }
                self.primary_touch.set(Some(PrimaryTouch { id, moved: true }));
                Some(PointerSignal::moved(pos))
            }
            TouchPhase::End => {
                if !is_primary {
                    return None;
                }
                self.primary_touch.set(None);
                Some(PointerSignal::end(pos))
            }
            TouchPhase::Cancel => {
                if is_primary {
                    self.primary_touch.set(None);
                }
                None
            }
        }
    }
}

impl PointerSurface for TouchSurface {
    fn add_signal_listener(&self, phase: SignalPhase, listener: &Listener<SurfaceEvent>) {
        self.listeners.on(phase, listener);
    }

    fn remove_signal_listener(&self, phase: SignalPhase, listener: &Listener<SurfaceEvent>) {
        self.listeners.off(phase, Some(listener));
    }
}
