use crate::app_config::{AppConfig, Environment};
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
/// Decoupled from the process environment so tests can drive it with a plain
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let printify_api_key = require("PRINTIFY_API_KEY")?;

    let env = parse_environment(&or_default("PODPRICER_ENV", "development"))?;
    let log_level = or_default("PODPRICER_LOG_LEVEL", "info");

    let mut api_base_url = or_default("PODPRICER_API_BASE_URL", "https://api.printify.com/v1/");
    if !api_base_url.ends_with('/') {
        api_base_url.push('/');
    }

    let request_timeout_secs = parse_u64("PODPRICER_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PODPRICER_USER_AGENT", "podpricer/0.1 (catalog-pricing)");
    let max_retries = parse_u32("PODPRICER_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("PODPRICER_RETRY_BACKOFF_BASE_MS", "500")?;

    let products_page_limit = parse_u32("PODPRICER_PRODUCTS_PAGE_LIMIT", "50")?;
    if products_page_limit == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "PODPRICER_PRODUCTS_PAGE_LIMIT".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    let shipping_country = or_default("PODPRICER_SHIPPING_COUNTRY", "US")
        .trim()
        .to_uppercase();

    Ok(AppConfig {
        env,
        log_level,
        printify_api_key,
        api_base_url,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_ms,
        products_page_limit,
        shipping_country,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for anything other than
/// `development`, `test`, or `production`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "PODPRICER_ENV".to_string(),
            reason: format!("expected development, test, or production; got {other:?}"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
