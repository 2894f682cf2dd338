mod bus;
mod events;

pub use bus::{EmitReport, EventBus, Listener, ListenerId};
pub use events::{SwipeEvent, SwipeKind};
