use crate::app_config::{AppConfig, Environment};
use crate::geo::{Coordinate, DEFAULT_COORDINATE};
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

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
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

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let amap_web_key = require("AMAP_WEB_KEY")?;

    let env = parse_environment(&or_default("ESTATE_ENV", "development"));
    let log_level = or_default("ESTATE_LOG_LEVEL", "info");
    let amap_base_url = or_default("AMAP_BASE_URL", "https://restapi.amap.com/");
    let amap_js_key = lookup("AMAP_JS_KEY").ok();
    let amap_security_code = lookup("AMAP_SECURITY_CODE").ok();
    let provider_timeout_secs = parse_u64("ESTATE_PROVIDER_TIMEOUT_SECS", "30")?;
    let geocode_city = or_default("ESTATE_GEOCODE_CITY", "全国");

    let api_url = or_default("ESTATE_API_URL", "http://localhost:8080");
    let api_timeout_secs = parse_u64("ESTATE_API_TIMEOUT_SECS", "10")?;

    let default_coordinate = Coordinate::new(
        parse_f64("ESTATE_DEFAULT_LONGITUDE", DEFAULT_COORDINATE.longitude)?,
        parse_f64("ESTATE_DEFAULT_LATITUDE", DEFAULT_COORDINATE.latitude)?,
    );
    let map_zoom = parse_u8("ESTATE_MAP_ZOOM", "11")?;

    Ok(AppConfig {
        env,
        log_level,
        amap_web_key,
        amap_base_url,
        amap_js_key,
        amap_security_code,
        provider_timeout_secs,
        geocode_city,
        api_url,
        api_timeout_secs,
        default_coordinate,
        map_zoom,
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
