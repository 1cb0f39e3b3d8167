use crate::app_config::{AppConfig, Environment, BASE_URL_VAR};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is invalid.
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
/// Returns `ConfigError` if a value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
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

    // Only backend commands need the URL; a malformed one is still rejected up front.
    let base_url = optional(BASE_URL_VAR)
        .map(|url| {
            if url.starts_with("http://") || url.starts_with("https://") {
                Ok(url.trim_end_matches('/').to_string())
            } else {
                Err(ConfigError::InvalidEnvVar {
                    var: BASE_URL_VAR.to_string(),
                    reason: format!("expected an http(s) URL, got '{url}'"),
                })
            }
        })
        .transpose()?;

    let env = parse_environment(&or_default("PANTRYMAP_ENV", "development"))?;
    let log_level = or_default("PANTRYMAP_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("PANTRYMAP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PANTRYMAP_USER_AGENT", "pantrymap/0.1 (pantry-locator)");
    let geolocation_timeout_ms = parse_u64("PANTRYMAP_GEOLOCATION_TIMEOUT_MS", "10000")?;
    let views_path = PathBuf::from(or_default("PANTRYMAP_VIEWS_PATH", "./config/views.yaml"));
    let view = or_default("PANTRYMAP_VIEW", "default");

    Ok(AppConfig {
        base_url,
        env,
        log_level,
        request_timeout_secs,
        user_agent,
        geolocation_timeout_ms,
        views_path,
        view,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PANTRYMAP_ENV".to_string(),
            reason: format!("expected development, test, or production; got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
