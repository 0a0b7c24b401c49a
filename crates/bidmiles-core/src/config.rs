use crate::app_config::AppConfig;
use crate::coords::parse_coordinates;
use crate::office::OfficeSource;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let mapbox_token = require("MAPBOX_TOKEN")?;

    let office_coords = optional("BIDMILES_OFFICE_COORDS");
    let office_address = optional("BIDMILES_OFFICE_ADDRESS");
    let office = match (office_coords, office_address) {
        (Some(_), Some(_)) => {
            return Err(invalid(
                "BIDMILES_OFFICE_ADDRESS",
                "cannot be combined with BIDMILES_OFFICE_COORDS".to_string(),
            ))
        }
        (Some(coords), None) => OfficeSource::Point(
            parse_coordinates(&coords).map_err(|e| invalid("BIDMILES_OFFICE_COORDS", e.to_string()))?,
        ),
        (None, Some(address)) => OfficeSource::Address(address),
        (None, None) => OfficeSource::default(),
    };

    let region_lookup = parse_bool(&or_default("BIDMILES_REGION_LOOKUP", "false"))
        .ok_or_else(|| {
            invalid(
                "BIDMILES_REGION_LOOKUP",
                "expected true/false, yes/no or 1/0".to_string(),
            )
        })?;

    let request_timeout_secs = parse_u64("BIDMILES_REQUEST_TIMEOUT_SECS", "30")?;
    if request_timeout_secs == 0 {
        return Err(invalid(
            "BIDMILES_REQUEST_TIMEOUT_SECS",
            "must be at least 1".to_string(),
        ));
    }

    let max_concurrent_rows = parse_usize("BIDMILES_MAX_CONCURRENT_ROWS", "4")?;
    if max_concurrent_rows == 0 {
        return Err(invalid(
            "BIDMILES_MAX_CONCURRENT_ROWS",
            "must be at least 1".to_string(),
        ));
    }

    let user_agent = or_default("BIDMILES_USER_AGENT", "bidmiles/0.1 (bid-mileage)");
    let log_level = or_default("BIDMILES_LOG_LEVEL", "info");

    Ok(AppConfig {
        mapbox_token,
        office,
        region_lookup,
        request_timeout_secs,
        max_concurrent_rows,
        user_agent,
        log_level,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
