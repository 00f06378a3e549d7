use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable holds an invalid value. Every
/// variable has a default, so an empty environment yields a dev config.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("CROWDMAP_ENV", "development"));
    let bind_addr = parse_addr("CROWDMAP_BIND_ADDR", "0.0.0.0:8000")?;
    let log_level = or_default("CROWDMAP_LOG_LEVEL", "info");

    let nominatim_base_url = or_default(
        "CROWDMAP_NOMINATIM_BASE_URL",
        "https://nominatim.openstreetmap.org",
    );
    let overpass_base_url = or_default("CROWDMAP_OVERPASS_BASE_URL", "https://overpass-api.de");
    let osm_user_agent = or_default("CROWDMAP_OSM_USER_AGENT", "crowdmap/0.1 (crowd-heatmap)");
    let osm_timeout_secs = parse_u64("CROWDMAP_OSM_TIMEOUT_SECS", "30")?;
    let osm_max_retries = parse_u32("CROWDMAP_OSM_MAX_RETRIES", "3")?;
    let osm_retry_backoff_base_ms = parse_u64("CROWDMAP_OSM_RETRY_BACKOFF_BASE_MS", "300")?;
    let search_radius_m = parse_u32("CROWDMAP_SEARCH_RADIUS_M", "5000")?;
    let rate_limit_max_requests = parse_usize("CROWDMAP_RATE_LIMIT_MAX_REQUESTS", "120")?;
    let rate_limit_window_secs = parse_u64("CROWDMAP_RATE_LIMIT_WINDOW_SECS", "60")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        nominatim_base_url,
        overpass_base_url,
        osm_user_agent,
        osm_timeout_secs,
        osm_max_retries,
        osm_retry_backoff_base_ms,
        search_radius_m,
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
