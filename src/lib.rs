#![warn(clippy::all, rust_2018_idioms)]

pub mod config;
pub mod detector;
pub mod error;
pub mod event;
pub mod input;

pub use config::SwipeConfig;
pub use detector::{GestureDetector, SwipeDispatch};
pub use error::{ConfigError, ListenerError, ListenerFailure, ListenerResult, ParseKindError};
pub use event::{EmitReport, EventBus, Listener, ListenerId, SwipeEvent, SwipeKind};
pub use input::{PointerSignal, PointerSurface, SignalPhase, SurfaceEvent, TouchSurface};
