use crate::app_config::{AppConfig, DEFAULT_IMAGE_BASE_URL, DEFAULT_PRODUCT_BASE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are invalid.
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
/// Returns `ConfigError` if values are invalid.
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
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_base_url = |var: &str, default: &str| -> Result<String, ConfigError> {
        let raw = or_default(var, default);
        validate_base_url(&raw).map_err(|reason| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason,
        })
    };

    let catalog_path = lookup("SHOPGUIDE_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let log_level = or_default("SHOPGUIDE_LOG_LEVEL", "info");
    let image_base_url = parse_base_url("SHOPGUIDE_IMAGE_BASE_URL", DEFAULT_IMAGE_BASE_URL)?;
    let product_base_url =
        parse_base_url("SHOPGUIDE_PRODUCT_BASE_URL", DEFAULT_PRODUCT_BASE_URL)?;

    Ok(AppConfig {
        catalog_path,
        log_level,
        image_base_url,
        product_base_url,
    })
}

/// Checks that `raw` is an absolute http(s) URL and strips trailing slashes,
/// since link formatting appends its own separators.
fn validate_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim();
    if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
        return Err(format!("expected an http(s) URL, got \"{trimmed}\""));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
