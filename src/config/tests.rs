use std::fs;

use super::validation::validate_config;
use super::*;

fn parse(toml: &str) -> Config {
    toml::from_str(toml).unwrap()
}

#[test]
fn empty_config_uses_defaults() {
    let config = parse("");
    assert_eq!(config.listen_address(), DEFAULT_LISTEN_ADDRESS);
    assert_eq!(config.listen_port(), DEFAULT_LISTEN_PORT);
    let params = config.sunlight_params();
    assert_eq!(params.default_blocker_height, DEFAULT_BLOCKER_HEIGHT);
    assert_eq!(params.blocker_distance, DEFAULT_BLOCKER_DISTANCE);
}

#[test]
fn explicit_fields_override_defaults() {
    let config = parse(
        r#"
        db_path = "/tmp/places.db"
        listen_address = "0.0.0.0"
        listen_port = 9100
        default_blocker_height = 4.5
        blocker_distance = 20.0
        "#,
    );
    assert_eq!(config.db_path().unwrap().to_str(), Some("/tmp/places.db"));
    assert_eq!(config.listen_address(), "0.0.0.0");
    assert_eq!(config.listen_port(), 9100);
    assert_eq!(config.sunlight_params().default_blocker_height, 4.5);
    assert_eq!(config.sunlight_params().blocker_distance, 20.0);
}

#[test]
fn validation_rejects_negative_default_height() {
    let config = parse("default_blocker_height = -1.0");
    assert!(validate_config(&config).is_err());
}

#[test]
fn validation_rejects_non_positive_distance() {
    assert!(validate_config(&parse("blocker_distance = 0.0")).is_err());
    assert!(validate_config(&parse("blocker_distance = -3.0")).is_err());
    assert!(validate_config(&parse("blocker_distance = 0.5")).is_ok());
}

#[test]
fn validation_rejects_empty_address_and_zero_port() {
    assert!(validate_config(&parse("listen_address = \"  \"")).is_err());
    assert!(validate_config(&parse("listen_port = 0")).is_err());
}

#[test]
fn default_config_file_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sunnyside.toml");
    create_default_config(&path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("#[Shade model]"));
    assert!(content.contains("default_blocker_height = 10.0"));

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.listen_port(), DEFAULT_LISTEN_PORT);
    assert_eq!(
        config.sunlight_params().default_blocker_height,
        DEFAULT_BLOCKER_HEIGHT
    );
}

#[test]
fn malformed_toml_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sunnyside.toml");
    fs::write(&path, "listen_port = \"not a port\"").unwrap();
    assert!(load_from_path(&path).is_err());
}
