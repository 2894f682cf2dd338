use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::rc::Rc;

use uuid::Uuid;

use crate::error::{ListenerFailure, ListenerResult};

/// Stable identity of a [`Listener`], assigned once when the handle is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(Uuid);

impl ListenerId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A callback handle that can be registered on an [`EventBus`].
///
/// Clones share the same identity, so the handle used to register a callback is
/// also the handle that removes it.
pub struct Listener<E> {
    id: ListenerId,
    callback: Rc<dyn Fn(&E) -> ListenerResult>,
}

impl<E: 'static> Listener<E> {
    /// Wraps an infallible callback in a new handle with a fresh identity
    pub fn new(callback: impl Fn(&E) + 'static) -> Self {
        Self::fallible(move |event: &E| {
            callback(event);
            Ok(())
        })
    }

    /// Wraps a callback that can report failure by returning `Err`
    pub fn fallible(callback: impl Fn(&E) -> ListenerResult + 'static) -> Self {
        Self {
            id: ListenerId::new(),
            callback: Rc::new(callback),
        }
    }
}

impl<E> Listener<E> {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    fn call(&self, event: &E) -> ListenerResult {
        (self.callback)(event)
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<E> PartialEq for Listener<E> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<E> Eq for Listener<E> {}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}

/// Outcome of a single [`EventBus::emit`] call
#[must_use = "listener failures are only reported through the report"]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EmitReport {
    /// Number of listeners that returned `Ok`
    pub delivered: usize,
    /// Listeners that returned `Err` or panicked, in invocation order
    pub failures: Vec<ListenerFailure>,
}

impl EmitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A per-instance listener table keyed by a closed set of event kinds.
///
/// Listeners run in registration order. Registering the same handle twice makes it
/// run twice; removing a handle removes every occurrence.
pub struct EventBus<K, E> {
    listeners: RefCell<HashMap<K, Vec<Listener<E>>>>,
}

impl<K, E> fmt::Debug for EventBus<K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count: usize = self.listeners.borrow().values().map(Vec::len).sum();
        f.debug_struct("EventBus")
            .field("listeners", &format!("<{} listeners>", count))
            .finish()
    }
}

impl<K: Eq + Hash + Copy + fmt::Debug, E> Default for EventBus<K, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Copy + fmt::Debug, E> EventBus<K, E> {
    /// Creates a new, empty event bus
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Append a listener to the sequence for `kind`
    pub fn on(&self, kind: K, listener: &Listener<E>) {
        self.listeners
            .borrow_mut()
            .entry(kind)
            .or_default()
            .push(listener.clone());
    }

    /// Remove `listener` from `kind`, or clear `kind` entirely when no listener is given
    pub fn off(&self, kind: K, listener: Option<&Listener<E>>) {
        let mut listeners = self.listeners.borrow_mut();
        let Some(registered) = listeners.get_mut(&kind) else {
            return;
        };

        match listener {
            Some(listener) => registered.retain(|l| l != listener),
            None => registered.clear(),
        }
    }

    /// Drop every listener of every kind
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }

    pub fn listener_count(&self, kind: K) -> usize {
        self.listeners.borrow().get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.borrow().values().all(Vec::is_empty)
    }

    /// Invoke every listener registered for `kind`, in registration order.
    ///
    /// The listener sequence is snapshotted first, so listeners may register or
    /// remove handles while running; those changes apply from the next emission.
    /// A listener returning `Err` is recorded in the report and the loop
    /// continues. On native targets a panicking listener is caught and recorded
    /// the same way; where panics abort (wasm), listeners should return `Err`.
    pub fn emit(&self, kind: K, event: &E) -> EmitReport {
        let Some(snapshot) = self.listeners.borrow().get(&kind).cloned() else {
            return EmitReport::default();
        };

        let mut report = EmitReport::default();
        for listener in &snapshot {
            match invoke(listener, event) {
                Ok(()) => report.delivered += 1,
                Err(failure) => {
                    log::error!("{:?} listener failed: {}", kind, failure);
                    report.failures.push(failure);
                }
            }
        }
        report
    }
}

fn returned_error(listener: ListenerId, result: ListenerResult) -> Result<(), ListenerFailure> {
    result.map_err(|err| ListenerFailure {
        listener,
        message: err.to_string(),
        panicked: false,
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn invoke<E>(listener: &Listener<E>, event: &E) -> Result<(), ListenerFailure> {
    use std::panic::{self, AssertUnwindSafe};

    match panic::catch_unwind(AssertUnwindSafe(|| listener.call(event))) {
        Ok(result) => returned_error(listener.id(), result),
        Err(payload) => Err(ListenerFailure {
            listener: listener.id(),
            message: panic_message(payload.as_ref()),
            panicked: true,
        }),
    }
}

#[cfg(target_arch = "wasm32")]
fn invoke<E>(listener: &Listener<E>, event: &E) -> Result<(), ListenerFailure> {
    returned_error(listener.id(), listener.call(event))
}

#[cfg(not(target_arch = "wasm32"))]
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "listener panicked".to_string()
    }
}
