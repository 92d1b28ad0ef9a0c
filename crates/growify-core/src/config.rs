use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// The secret value shipped in example configs. Treated as "no secret":
/// webhook signature validation is skipped when it is set.
pub const PLACEHOLDER_WEBHOOK_SECRET: &str = "your-webhook-secret-here";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in
/// the process, without touching `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests use a plain `HashMap`
/// lookup instead of `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
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

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("GROWIFY_ENV", "development"));
    let bind_addr = parse_addr("GROWIFY_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("GROWIFY_LOG_LEVEL", "info");

    // The placeholder secret counts as unset: validation must not run
    // against a value everyone can read in the example config.
    let webhook_secret = lookup("HUBSPOT_WEBHOOK_SECRET")
        .ok()
        .filter(|s| !s.is_empty() && s != PLACEHOLDER_WEBHOOK_SECRET);
    let hubspot_api_key = lookup("HUBSPOT_API_KEY").ok().filter(|s| !s.is_empty());
    let hubspot_base_url = or_default("HUBSPOT_BASE_URL", "https://api.hubapi.com");

    let read_timeout_ms = parse_u64("GROWIFY_READ_TIMEOUT_MS", "2000")?;
    let sync_page_size = parse_usize("GROWIFY_SYNC_PAGE_SIZE", "100")?;
    let rate_limit_backoff_secs = parse_u64("GROWIFY_RATE_LIMIT_BACKOFF_SECS", "10")?;
    let sync_max_retries = parse_u32("GROWIFY_SYNC_MAX_RETRIES", "3")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        webhook_secret,
        hubspot_api_key,
        hubspot_base_url,
        read_timeout_ms,
        sync_page_size,
        rate_limit_backoff_secs,
        sync_max_retries,
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
