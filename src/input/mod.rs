use std::cell::Cell;

use egui::Pos2;

use crate::event::Listener;

mod gestures;
mod state;
mod surface;

pub use gestures::{SwipeTracker, classify};
pub use state::GestureSession;
pub use surface::TouchSurface;

/// Phase of a raw pointer signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalPhase {
    /// First contact of a new gesture
    Start,
    /// Contact moved while held down
    Move,
    /// Contact lifted
    End,
}

/// A single pointer signal as delivered by a host surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSignal {
    pub phase: SignalPhase,
    pub position: Pos2,
}

impl PointerSignal {
    pub fn new(phase: SignalPhase, position: Pos2) -> Self {
        Self { phase, position }
    }

    pub fn start(position: Pos2) -> Self {
        Self::new(SignalPhase::Start, position)
    }

    pub fn moved(position: Pos2) -> Self {
        Self::new(SignalPhase::Move, position)
    }

    pub fn end(position: Pos2) -> Self {
        Self::new(SignalPhase::End, position)
    }

    /// Build a signal from every contact point reported by the host.
    ///
    /// Only the first (primary) contact is used. Returns `None` when the host
    /// reported no contacts at all.
    pub fn from_contacts(phase: SignalPhase, contacts: &[Pos2]) -> Option<Self> {
        contacts.first().map(|&position| Self::new(phase, position))
    }
}

/// A signal in flight on a surface, with a flag listeners can set to ask the
/// host to skip its default handling (scrolling, navigation).
#[derive(Debug)]
pub struct SurfaceEvent {
    signal: PointerSignal,
    default_prevented: Cell<bool>,
}

impl SurfaceEvent {
    pub fn new(signal: PointerSignal) -> Self {
        Self {
            signal,
            default_prevented: Cell::new(false),
        }
    }

    pub fn signal(&self) -> PointerSignal {
        self.signal
    }

    pub fn phase(&self) -> SignalPhase {
        self.signal.phase
    }

    pub fn position(&self) -> Pos2 {
        self.signal.position
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Something that produces pointer signals and lets listeners attach to them
pub trait PointerSurface {
    /// Register `listener` for signals of the given phase
    fn add_signal_listener(&self, phase: SignalPhase, listener: &Listener<SurfaceEvent>);

    /// Remove a listener previously passed to [`add_signal_listener`](Self::add_signal_listener)
    fn remove_signal_listener(&self, phase: SignalPhase, listener: &Listener<SurfaceEvent>);
}
