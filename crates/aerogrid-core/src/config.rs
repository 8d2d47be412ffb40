use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Highest supported `AEROGRID_CACHE_COORD_DECIMALS`.
const MAX_CACHE_COORD_DECIMALS: u32 = 8;

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
/// Decoupled from the process environment so tests can pass a `HashMap` lookup.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("AEROGRID_ENV", "development"))?;

    let bind_addr = or_default("AEROGRID_BIND_ADDR", "0.0.0.0:3000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("AEROGRID_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("AEROGRID_LOG_LEVEL", "info");

    let cache_capacity = parse_usize("AEROGRID_CACHE_CAPACITY", "256")?;
    let cache_coord_decimals = or_default("AEROGRID_CACHE_COORD_DECIMALS", "4")
        .parse::<u32>()
        .map_err(|e| invalid("AEROGRID_CACHE_COORD_DECIMALS", e.to_string()))?;
    if cache_coord_decimals > MAX_CACHE_COORD_DECIMALS {
        return Err(invalid(
            "AEROGRID_CACHE_COORD_DECIMALS",
            format!("must be at most {MAX_CACHE_COORD_DECIMALS}, got {cache_coord_decimals}"),
        ));
    }

    let rate_limit_per_minute = parse_usize("AEROGRID_RATE_LIMIT_PER_MINUTE", "120")?;
    if rate_limit_per_minute == 0 {
        return Err(invalid(
            "AEROGRID_RATE_LIMIT_PER_MINUTE",
            "must be greater than zero".to_string(),
        ));
    }

    let rng_seed = match lookup("AEROGRID_RNG_SEED") {
        Ok(raw) => Some(
            raw.parse::<u64>()
                .map_err(|e| invalid("AEROGRID_RNG_SEED", e.to_string()))?,
        ),
        Err(_) => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        cache_capacity,
        cache_coord_decimals,
        rate_limit_per_minute,
        rng_seed,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "AEROGRID_ENV".to_string(),
            reason: format!("unknown environment \"{other}\""),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
