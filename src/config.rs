use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Movement (in logical points) after which a gesture counts as a swipe in progress
pub const DEFAULT_START_THRESHOLD: f32 = 10.0;

/// Displacement (in logical points) a finished gesture needs to emit a swipe
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 50.0;

/// Thresholds used by the swipe detector.
///
/// Missing fields fall back to their defaults when deserializing, so a partial
/// JSON document such as `{"swipe_threshold": 80}` is valid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Once either axis moves further than this, default scrolling is suppressed
    pub start_threshold: f32,
    /// Minimum displacement along the dominant axis at gesture end
    pub swipe_threshold: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            start_threshold: DEFAULT_START_THRESHOLD,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD,
        }
    }
}

impl SwipeConfig {
    /// Parse and validate a config from JSON
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded swipe config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        check_threshold("start_threshold", self.start_threshold)?;
        check_threshold("swipe_threshold", self.swipe_threshold)
    }
}

fn check_threshold(name: &'static str, value: f32) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = SwipeConfig::from_json_str(r#"{"swipe_threshold": 80.0}"#).unwrap();
        assert_eq!(config.start_threshold, DEFAULT_START_THRESHOLD);
        assert_eq!(config.swipe_threshold, 80.0);
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = SwipeConfig::from_json_str(r#"{"start_threshold": -1.0}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold { name: "start_threshold", .. }
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = SwipeConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
