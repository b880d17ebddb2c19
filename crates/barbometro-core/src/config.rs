use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Spreadsheet that backs the public directory.
pub const DEFAULT_SHEET_ID: &str = "13GPoFZElET7dZAKcUrUuMggOab-8qtwAP4ZmWDTWE1I";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; secrets are optional and an empty value is
/// treated the same as an unset one.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default = |var: &str, default: &str| -> String {
        optional(var).unwrap_or_else(|| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        or_default(var, default)
            .parse::<SocketAddr>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("BARBOMETRO_ENV", "development"));
    let bind_addr = parse_addr("BARBOMETRO_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("BARBOMETRO_LOG_LEVEL", "info");

    let sheet_id = or_default("BARBOMETRO_SHEET_ID", DEFAULT_SHEET_ID);
    let sheet_range = or_default("BARBOMETRO_SHEET_RANGE", "Lista!A:N");
    let csv_gid = parse_u32("BARBOMETRO_CSV_GID", "0")?;

    let sheets_api_key = optional("GOOGLE_SHEETS_API_KEY");
    let maps_api_key = optional("GOOGLE_MAPS_API_KEY");
    let sheets_key_endpoint = optional("BARBOMETRO_SHEETS_KEY_ENDPOINT");

    let request_timeout_secs = parse_u64("BARBOMETRO_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default(
        "BARBOMETRO_USER_AGENT",
        "barbometro/0.1 (restaurant-directory)",
    );

    let map_load_timeout_ms = parse_u64("BARBOMETRO_MAP_LOAD_TIMEOUT_MS", "10000")?;
    let map_poll_interval_ms = parse_u64("BARBOMETRO_MAP_POLL_INTERVAL_MS", "100")?;
    if map_poll_interval_ms == 0 {
        return Err(invalid(
            "BARBOMETRO_MAP_POLL_INTERVAL_MS",
            "must be greater than zero".to_string(),
        ));
    }

    let guides_path = PathBuf::from(or_default(
        "BARBOMETRO_GUIDES_PATH",
        "./config/guides.yaml",
    ));

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        sheet_id,
        sheet_range,
        csv_gid,
        sheets_api_key,
        maps_api_key,
        sheets_key_endpoint,
        request_timeout_secs,
        user_agent,
        map_load_timeout_ms,
        map_poll_interval_ms,
        guides_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
