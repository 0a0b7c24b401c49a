use std::collections::HashMap;
use std::env::VarError;

use super::*;
use crate::GeoPoint;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("MAPBOX_TOKEN", "pk.test-token");
    m
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert_eq!(parse_bool("true"), Some(true));
    assert_eq!(parse_bool(" YES "), Some(true));
    assert_eq!(parse_bool("1"), Some(true));
    assert_eq!(parse_bool("false"), Some(false));
    assert_eq!(parse_bool("No"), Some(false));
    assert_eq!(parse_bool("0"), Some(false));
    assert_eq!(parse_bool("maybe"), None);
}

#[test]
fn build_app_config_fails_without_mapbox_token() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "MAPBOX_TOKEN"),
        "expected MissingEnvVar(MAPBOX_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_token_as_missing() {
    let mut map = full_env();
    map.insert("MAPBOX_TOKEN", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "MAPBOX_TOKEN"),
        "expected MissingEnvVar(MAPBOX_TOKEN), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.mapbox_token, "pk.test-token");
    assert_eq!(cfg.office, OfficeSource::default());
    assert!(!cfg.region_lookup);
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.max_concurrent_rows, 4);
    assert_eq!(cfg.user_agent, "bidmiles/0.1 (bid-mileage)");
    assert_eq!(cfg.log_level, "info");
}

#[test]
fn debug_output_redacts_token() {
    let cfg = build_app_config(lookup_from_map(&full_env())).unwrap();
    let rendered = format!("{cfg:?}");
    assert!(!rendered.contains("pk.test-token"), "{rendered}");
    assert!(rendered.contains("[redacted]"));
}

#[test]
fn office_coords_override_default_point() {
    let mut map = full_env();
    map.insert("BIDMILES_OFFICE_COORDS", "Lat: 36.1° N Lon: 97.5° W");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.office,
        OfficeSource::Point(GeoPoint::new(36.1, -97.5).unwrap())
    );
}

#[test]
fn office_coords_invalid() {
    let mut map = full_env();
    map.insert("BIDMILES_OFFICE_COORDS", "somewhere in Oklahoma");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIDMILES_OFFICE_COORDS"),
        "expected InvalidEnvVar(BIDMILES_OFFICE_COORDS), got: {result:?}"
    );
}

#[test]
fn office_address_selects_geocoded_source() {
    let mut map = full_env();
    map.insert("BIDMILES_OFFICE_ADDRESS", " 100 Main St, Crescent, OK ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.office,
        OfficeSource::Address("100 Main St, Crescent, OK".to_string())
    );
}

#[test]
fn office_address_and_coords_conflict() {
    let mut map = full_env();
    map.insert("BIDMILES_OFFICE_ADDRESS", "100 Main St, Crescent, OK");
    map.insert("BIDMILES_OFFICE_COORDS", "35.8, -97.6");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIDMILES_OFFICE_ADDRESS"),
        "expected InvalidEnvVar(BIDMILES_OFFICE_ADDRESS), got: {result:?}"
    );
}

#[test]
fn region_lookup_override() {
    let mut map = full_env();
    map.insert("BIDMILES_REGION_LOOKUP", "true");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.region_lookup);
}

#[test]
fn region_lookup_invalid() {
    let mut map = full_env();
    map.insert("BIDMILES_REGION_LOOKUP", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIDMILES_REGION_LOOKUP"),
        "expected InvalidEnvVar(BIDMILES_REGION_LOOKUP), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_override() {
    let mut map = full_env();
    map.insert("BIDMILES_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_secs_invalid() {
    let mut map = full_env();
    map.insert("BIDMILES_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIDMILES_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BIDMILES_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn request_timeout_secs_zero_is_rejected() {
    let mut map = full_env();
    map.insert("BIDMILES_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIDMILES_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(BIDMILES_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn max_concurrent_rows_override() {
    let mut map = full_env();
    map.insert("BIDMILES_MAX_CONCURRENT_ROWS", "8");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_concurrent_rows, 8);
}

#[test]
fn max_concurrent_rows_zero_is_rejected() {
    let mut map = full_env();
    map.insert("BIDMILES_MAX_CONCURRENT_ROWS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "BIDMILES_MAX_CONCURRENT_ROWS"),
        "expected InvalidEnvVar(BIDMILES_MAX_CONCURRENT_ROWS), got: {result:?}"
    );
}

#[test]
fn user_agent_and_log_level_override() {
    let mut map = full_env();
    map.insert("BIDMILES_USER_AGENT", "custom-agent/2.0");
    map.insert("BIDMILES_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
    assert_eq!(cfg.log_level, "debug");
}
