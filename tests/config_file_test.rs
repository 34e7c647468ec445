//! Tests for loading and saving configuration files

use posture_tracker::{
    config::{Config, EXAMPLE_CONFIG},
    tracker::MajorityPolicy,
    Error,
};
use tempfile::TempDir;

#[test]
fn test_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("posture.yaml");

    let mut config = Config::default();
    config.timing.frame_rate = 24.0;
    config.alerts.reset_counters_on_alert = false;
    config.classification.majority_window = 48;
    config.to_file(&path).unwrap();

    let loaded = Config::from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.tracker_config().majority, MajorityPolicy::Window(48));
    assert!(!loaded.tracker_config().reset_counters_on_alert);
}

#[test]
fn test_example_config_file_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("example.yaml");
    std::fs::write(&path, EXAMPLE_CONFIG).unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(config.validate().is_ok());
    assert_eq!(config.thresholds.neck_limit_deg, 40.0);
    assert_eq!(config.thresholds.torso_limit_deg, 10.0);
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Config::from_file(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_invalid_values_load_but_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "timing:\n  frame_rate: 0\nthresholds:\n  neck_limit_deg: -3\n").unwrap();

    let config = Config::from_file(&path).unwrap();
    assert!(matches!(config.validate(), Err(Error::InvalidConfiguration(_))));
}
