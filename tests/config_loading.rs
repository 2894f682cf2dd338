use std::fs;
use std::rc::Rc;

use touch_swipe::{ConfigError, GestureDetector, SwipeConfig, SwipeKind, TouchSurface};
use uuid::Uuid;

// Helper to write a config file into a unique temp path
fn write_config(contents: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("touch_swipe_{}.json", Uuid::new_v4()));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_default_thresholds() {
    let config = SwipeConfig::default();
    assert_eq!(config.start_threshold, 10.0);
    assert_eq!(config.swipe_threshold, 50.0);
}

#[test]
fn test_load_from_file() {
    let path = write_config(r#"{"start_threshold": 4.0, "swipe_threshold": 120.0}"#);
    let config = SwipeConfig::load(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(config.start_threshold, 4.0);
    assert_eq!(config.swipe_threshold, 120.0);
}

#[test]
fn test_missing_file_is_read_error() {
    let path = std::env::temp_dir().join(format!("touch_swipe_missing_{}.json", Uuid::new_v4()));
    let err = SwipeConfig::load(&path).unwrap_err();
    match err {
        ConfigError::Read { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_detector_rejects_invalid_config() {
    let surface = Rc::new(TouchSurface::new());
    let config = SwipeConfig {
        start_threshold: 10.0,
        swipe_threshold: f32::NAN,
    };
    let err = GestureDetector::with_config(Rc::clone(&surface), config).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidThreshold { name: "swipe_threshold", .. }));
}

#[test]
fn test_detector_uses_configured_threshold() {
    let surface = Rc::new(TouchSurface::new());
    let config = SwipeConfig::from_json_str(r#"{"swipe_threshold": 100.0}"#).unwrap();
    let detector = GestureDetector::with_config(Rc::clone(&surface), config).unwrap();
    assert_eq!(detector.config(), config);

    detector.touch_start(egui::pos2(0.0, 0.0));
    assert!(detector.touch_end(egui::pos2(80.0, 0.0)).is_none());

    detector.touch_start(egui::pos2(0.0, 0.0));
    let swipe = detector.touch_end(egui::pos2(120.0, 0.0)).unwrap().swipe;
    assert_eq!(swipe.kind, SwipeKind::Right);
}

#[test]
fn test_kind_names_parse() {
    assert_eq!("left".parse::<SwipeKind>().unwrap(), SwipeKind::Left);
    assert_eq!("swipeRight".parse::<SwipeKind>().unwrap(), SwipeKind::Right);
    assert_eq!(" UP ".parse::<SwipeKind>().unwrap(), SwipeKind::Up);
    assert!("sideways".parse::<SwipeKind>().is_err());
    assert_eq!(SwipeKind::Down.to_string(), "down");
    assert_eq!(serde_json::to_string(&SwipeKind::Left).unwrap(), "\"left\"");
}
