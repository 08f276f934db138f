use crate::app_config::{AppConfig, Environment};
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
/// Unlike [`load_app_config`], this does NOT load `.env` files; useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    // Radii and the similarity cutoff must be finite and positive; a zero or
    // negative radius would silently reject every live candidate.
    let parse_positive_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let value = or_default(var, default)
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(invalid(var, format!("expected a positive number, got {value}")));
        }
        Ok(value)
    };

    let env = parse_environment(&or_default("WAYFIND_ENV", "development"))?;
    let log_level = or_default("WAYFIND_LOG_LEVEL", "info");
    let places_api_key = lookup("OLA_MAPS_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty());
    let places_base_url = or_default("WAYFIND_PLACES_BASE_URL", "https://api.olamaps.io");

    let places_request_timeout_secs = parse_u64("WAYFIND_PLACES_REQUEST_TIMEOUT_SECS", "15")?;
    let places_user_agent = or_default(
        "WAYFIND_PLACES_USER_AGENT",
        "wayfind/0.1 (local-discovery)",
    );
    let places_max_retries = parse_u32("WAYFIND_PLACES_MAX_RETRIES", "2")?;
    let places_retry_backoff_base_ms = parse_u64("WAYFIND_PLACES_RETRY_BACKOFF_BASE_MS", "250")?;

    let dense_radius_km = parse_positive_f64("WAYFIND_DENSE_RADIUS_KM", "7.0")?;
    let sparse_radius_km = parse_positive_f64("WAYFIND_SPARSE_RADIUS_KM", "30.0")?;
    let similarity_threshold = parse_positive_f64("WAYFIND_SIMILARITY_THRESHOLD", "0.8")?;
    if similarity_threshold > 1.0 {
        return Err(invalid(
            "WAYFIND_SIMILARITY_THRESHOLD",
            format!("expected a ratio in (0, 1], got {similarity_threshold}"),
        ));
    }
    let detail_concurrency = parse_usize("WAYFIND_DETAIL_CONCURRENCY", "4")?;

    Ok(AppConfig {
        env,
        log_level,
        places_api_key,
        places_base_url,
        places_request_timeout_secs,
        places_user_agent,
        places_max_retries,
        places_retry_backoff_base_ms,
        dense_radius_km,
        sparse_radius_km,
        similarity_threshold,
        detail_concurrency,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidEnvVar`] for anything other than
/// `development`, `test` or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "WAYFIND_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
