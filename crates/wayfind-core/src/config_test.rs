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

/// Returns a map with the provider credential populated.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("OLA_MAPS_API_KEY", "test-key");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("unknown").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "WAYFIND_ENV"));
}

#[test]
fn build_app_config_succeeds_with_empty_environment() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.places_api_key.is_none());
    assert!(matches!(
        cfg.require_places_api_key(),
        Err(ConfigError::MissingEnvVar(ref v)) if v == "OLA_MAPS_API_KEY"
    ));
}

#[test]
fn build_app_config_applies_defaults() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.require_places_api_key().unwrap(), "test-key");
    assert_eq!(cfg.places_base_url, "https://api.olamaps.io");
    assert_eq!(cfg.places_request_timeout_secs, 15);
    assert_eq!(cfg.places_user_agent, "wayfind/0.1 (local-discovery)");
    assert_eq!(cfg.places_max_retries, 2);
    assert_eq!(cfg.places_retry_backoff_base_ms, 250);
    assert!((cfg.dense_radius_km - 7.0).abs() < f64::EPSILON);
    assert!((cfg.sparse_radius_km - 30.0).abs() < f64::EPSILON);
    assert!((cfg.similarity_threshold - 0.8).abs() < f64::EPSILON);
    assert_eq!(cfg.detail_concurrency, 4);
}

#[test]
fn blank_api_key_is_treated_as_missing() {
    let mut map = full_env();
    map.insert("OLA_MAPS_API_KEY", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.places_api_key.is_none());
}

#[test]
fn debug_output_redacts_api_key() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("test-key"));
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn dense_radius_override() {
    let mut map = full_env();
    map.insert("WAYFIND_DENSE_RADIUS_KM", "5.5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!((cfg.dense_radius_km - 5.5).abs() < f64::EPSILON);
}

#[test]
fn dense_radius_rejects_zero() {
    let mut map = full_env();
    map.insert("WAYFIND_DENSE_RADIUS_KM", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAYFIND_DENSE_RADIUS_KM"),
        "expected InvalidEnvVar(WAYFIND_DENSE_RADIUS_KM), got: {result:?}"
    );
}

#[test]
fn sparse_radius_rejects_garbage() {
    let mut map = full_env();
    map.insert("WAYFIND_SPARSE_RADIUS_KM", "far");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAYFIND_SPARSE_RADIUS_KM"),
        "expected InvalidEnvVar(WAYFIND_SPARSE_RADIUS_KM), got: {result:?}"
    );
}

#[test]
fn similarity_threshold_above_one_fails() {
    let mut map = full_env();
    map.insert("WAYFIND_SIMILARITY_THRESHOLD", "1.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAYFIND_SIMILARITY_THRESHOLD"),
        "expected InvalidEnvVar(WAYFIND_SIMILARITY_THRESHOLD), got: {result:?}"
    );
}

#[test]
fn places_max_retries_override() {
    let mut map = full_env();
    map.insert("WAYFIND_PLACES_MAX_RETRIES", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.places_max_retries, 5);
}

#[test]
fn places_max_retries_invalid() {
    let mut map = full_env();
    map.insert("WAYFIND_PLACES_MAX_RETRIES", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAYFIND_PLACES_MAX_RETRIES"),
        "expected InvalidEnvVar(WAYFIND_PLACES_MAX_RETRIES), got: {result:?}"
    );
}

#[test]
fn detail_concurrency_invalid() {
    let mut map = full_env();
    map.insert("WAYFIND_DETAIL_CONCURRENCY", "-1");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "WAYFIND_DETAIL_CONCURRENCY"),
        "expected InvalidEnvVar(WAYFIND_DETAIL_CONCURRENCY), got: {result:?}"
    );
}

#[test]
fn base_url_override() {
    let mut map = full_env();
    map.insert("WAYFIND_PLACES_BASE_URL", "http://127.0.0.1:9000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.places_base_url, "http://127.0.0.1:9000");
}
