use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_succeeds_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.sheet_id, DEFAULT_SHEET_ID);
    assert_eq!(cfg.sheet_range, "Lista!A:N");
    assert_eq!(cfg.csv_gid, 0);
    assert!(cfg.sheets_api_key.is_none());
    assert!(cfg.maps_api_key.is_none());
    assert!(cfg.sheets_key_endpoint.is_none());
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "barbometro/0.1 (restaurant-directory)");
    assert_eq!(cfg.map_load_timeout_ms, 10_000);
    assert_eq!(cfg.map_poll_interval_ms, 100);
    assert_eq!(cfg.guides_path.to_string_lossy(), "./config/guides.yaml");
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("BARBOMETRO_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BARBOMETRO_BIND_ADDR"),
        "expected InvalidEnvVar(BARBOMETRO_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn secrets_are_read_and_blank_secrets_are_unset() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_SHEETS_API_KEY", "sheets-secret");
    map.insert("GOOGLE_MAPS_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.sheets_api_key.as_deref(), Some("sheets-secret"));
    assert!(cfg.maps_api_key.is_none());
}

#[test]
fn debug_output_redacts_secrets() {
    let mut map = HashMap::new();
    map.insert("GOOGLE_SHEETS_API_KEY", "sheets-secret");
    map.insert("GOOGLE_MAPS_API_KEY", "maps-secret");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let debug = format!("{cfg:?}");
    assert!(!debug.contains("sheets-secret"));
    assert!(!debug.contains("maps-secret"));
    assert!(debug.contains("[redacted]"));
}

#[test]
fn csv_gid_override() {
    let mut map = HashMap::new();
    map.insert("BARBOMETRO_CSV_GID", "1842");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.csv_gid, 1842);
}

#[test]
fn csv_gid_invalid() {
    let mut map = HashMap::new();
    map.insert("BARBOMETRO_CSV_GID", "first");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BARBOMETRO_CSV_GID"),
        "expected InvalidEnvVar(BARBOMETRO_CSV_GID), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("BARBOMETRO_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn map_poll_interval_must_be_positive() {
    let mut map = HashMap::new();
    map.insert("BARBOMETRO_MAP_POLL_INTERVAL_MS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BARBOMETRO_MAP_POLL_INTERVAL_MS"),
        "expected InvalidEnvVar(BARBOMETRO_MAP_POLL_INTERVAL_MS), got: {result:?}"
    );
}
