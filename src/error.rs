use std::path::PathBuf;
use thiserror::Error;

use crate::event::ListenerId;

/// Errors that can occur while loading or validating a [`SwipeConfig`](crate::SwipeConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid {name}: {value} (must be finite and non-negative)")]
    InvalidThreshold { name: &'static str, value: f32 },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Returned when a string does not name a swipe direction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown swipe kind: {0:?}")]
pub struct ParseKindError(pub String);

/// Error a fallible listener returns to report that it could not handle an event
pub type ListenerError = Box<dyn std::error::Error>;

/// Result type for listener callbacks
pub type ListenerResult = Result<(), ListenerError>;

/// A listener that returned an error (or panicked) during an emission.
///
/// The failure is recorded and logged; the remaining listeners still run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Listener {listener} failed: {message}")]
pub struct ListenerFailure {
    pub listener: ListenerId,
    pub message: String,
    /// True when the listener panicked instead of returning an error
    pub panicked: bool,
}
