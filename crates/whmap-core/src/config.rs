use crate::app_config::{AppConfig, Environment};
use crate::geo::WarehouseFallback;
use crate::ConfigError;

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
/// Every variable is optional; a missing map credential is not an error.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let env = parse_environment(&or_default("WHMAP_ENV", "development"))?;

    let bind_addr = or_default("WHMAP_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("WHMAP_BIND_ADDR", e.to_string()))?;

    let log_level = or_default("WHMAP_LOG_LEVEL", "info");

    let mapbox_api_key = lookup("MAPBOX_API_KEY")
        .ok()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty());

    let warehouse_fallback =
        parse_warehouse_fallback(&or_default("WHMAP_WAREHOUSE_FALLBACK", "drop"))?;

    let max_upload_bytes = or_default("WHMAP_MAX_UPLOAD_BYTES", "10485760")
        .parse::<usize>()
        .map_err(|e| invalid("WHMAP_MAX_UPLOAD_BYTES", e.to_string()))?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        mapbox_api_key,
        warehouse_fallback,
        max_upload_bytes,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WHMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_warehouse_fallback(s: &str) -> Result<WarehouseFallback, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "drop" => Ok(WarehouseFallback::Drop),
        "centroid" => Ok(WarehouseFallback::Centroid),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WHMAP_WAREHOUSE_FALLBACK".to_string(),
            reason: format!("expected 'drop' or 'centroid', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
