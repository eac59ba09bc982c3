use std::{env, fs, time::Duration};

use crate::{Error, SimulationConfig};

#[test]
fn test_empty_json_uses_defaults() {
    let config = SimulationConfig::from_json_str("{}").unwrap();
    assert_eq!(config, SimulationConfig::default());
    assert_eq!(config.min_dwell(), Duration::from_millis(4000));
    assert_eq!(config.max_dwell(), Duration::from_millis(6000));
    assert_eq!(config.tick(), Duration::from_millis(1));
}

#[test]
fn test_partial_json() {
    let config = SimulationConfig::from_json_str(r#"{ "max_dwell_ms": 9000 }"#).unwrap();
    assert_eq!(config.min_dwell_ms, 4000);
    assert_eq!(config.max_dwell_ms, 9000);
}

#[test]
fn test_invalid_range() {
    let err = SimulationConfig::from_json_str(r#"{ "min_dwell_ms": 7000 }"#).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidDwellRange {
            min_ms: 7000,
            max_ms: 6000
        }
    ));
}

#[test]
fn test_zero_tick() {
    let err = SimulationConfig::from_json_str(r#"{ "tick_ms": 0 }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidTick));
}

#[test]
fn test_tick_above_limit() {
    let err = SimulationConfig::from_json_str(r#"{ "tick_ms": 1001 }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidTick));

    let config = SimulationConfig::from_json_str(r#"{ "tick_ms": 1000 }"#).unwrap();
    assert_eq!(config.tick(), Duration::from_secs(1));
}

#[test]
fn test_unknown_field_is_rejected() {
    let err = SimulationConfig::from_json_str(r#"{ "yellow_ms": 3000 }"#).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn test_missing_file() {
    let path = env::temp_dir().join("traffic_signal_does_not_exist.json");
    let err = SimulationConfig::from_json_file(&path).unwrap_err();
    match err {
        Error::Io { path: p, .. } => assert_eq!(p, path),
        other => panic!("expected io error, got {other:?}"),
    }
}

#[test]
fn test_load_from_file() {
    let path = env::temp_dir().join(format!("traffic_signal_config_{}.json", std::process::id()));
    fs::write(&path, r#"{ "min_dwell_ms": 100, "max_dwell_ms": 200, "tick_ms": 2 }"#).unwrap();

    let config = SimulationConfig::from_json_file(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(
        config,
        SimulationConfig {
            min_dwell_ms: 100,
            max_dwell_ms: 200,
            tick_ms: 2,
        }
    );
}
