//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use plummet::config::AppConfig;
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("PLM_PHYSICS__GRAVITY", "12.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.physics.gravity, 12.5);
    std::env::remove_var("PLM_PHYSICS__GRAVITY");
}

#[test]
#[serial]
fn test_env_override_nested_stuck_table() {
    std::env::set_var("PLM_STUCK__FORCE_TIME", "3.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.stuck.force_time, 3.5);
    std::env::remove_var("PLM_STUCK__FORCE_TIME");
}

#[test]
#[serial]
fn test_default_file_loading() {
    std::env::remove_var("PLM_PHYSICS__GRAVITY");

    let config = AppConfig::load().unwrap();
    // Values checked into config/default.toml
    assert_eq!(config.physics.gravity, 9.8);
    assert_eq!(config.stuck.check_interval, 0.25);
    assert_eq!(config.race.bodies, 6);
}

#[test]
#[serial]
fn test_missing_directory_falls_back_to_defaults() {
    let config = AppConfig::load_from("no/such/config/dir").unwrap();
    assert_eq!(config.physics.gravity, AppConfig::default().physics.gravity);
}

#[test]
#[serial]
fn test_engine_mapping() {
    std::env::set_var("PLM_PHYSICS__MAX_VELOCITY", "22.0");
    let config = AppConfig::load().unwrap();
    let race = config.to_race_config();
    assert_eq!(race.max_velocity, 22.0);
    std::env::remove_var("PLM_PHYSICS__MAX_VELOCITY");
}
