use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_FIRECRAWL_BASE_URL: &str = "https://api.firecrawl.dev/";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
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

    let env = parse_environment(&or_default("YMPARSE_ENV", "development"));

    let bind_addr = or_default("YMPARSE_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("YMPARSE_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("YMPARSE_LOG_LEVEL", "info");

    // An empty key in `.env` is treated the same as an absent one.
    let firecrawl_api_key = lookup("FIRECRAWL_API_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    let firecrawl_base_url = or_default("YMPARSE_FIRECRAWL_BASE_URL", DEFAULT_FIRECRAWL_BASE_URL);
    let firecrawl_wait_for_ms = parse_u64("YMPARSE_FIRECRAWL_WAIT_FOR_MS", "3000")?;
    let firecrawl_timeout_secs = parse_u64("YMPARSE_FIRECRAWL_TIMEOUT_SECS", "60")?;

    let market_domain = or_default("YMPARSE_MARKET_DOMAIN", "market.yandex");
    if market_domain.trim().is_empty() {
        return Err(invalid(
            "YMPARSE_MARKET_DOMAIN",
            "must not be empty".to_string(),
        ));
    }

    let rate_limit_max_requests = parse_usize("YMPARSE_RATE_LIMIT_MAX_REQUESTS", "30")?;
    let rate_limit_window_secs = parse_u64("YMPARSE_RATE_LIMIT_WINDOW_SECS", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        firecrawl_api_key,
        firecrawl_base_url,
        firecrawl_wait_for_ms,
        firecrawl_timeout_secs,
        market_domain,
        rate_limit_max_requests,
        rate_limit_window_secs,
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
