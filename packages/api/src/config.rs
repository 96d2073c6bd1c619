//! Endpoint table loading.
//!
//! The default table is embedded at compile time from
//! `config/endpoints.toml`. Only the origin and API base may be overridden
//! from the environment; the table is never mutated after startup.

use flood_viz_api_models::ApiConfig;

/// Environment variable overriding [`ApiConfig::origin`].
pub const ORIGIN_ENV: &str = "FLOOD_VIZ_ORIGIN";

/// Environment variable overriding [`ApiConfig::api_base`].
pub const API_BASE_ENV: &str = "FLOOD_VIZ_API_BASE";

const DEFAULT_ENDPOINTS_TOML: &str = include_str!("../config/endpoints.toml");

/// Errors that can occur while loading the endpoint table.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML document is malformed or missing fields.
    #[error("Invalid endpoint configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parses an endpoint table from TOML.
///
/// # Errors
///
/// Returns [`ConfigError`] if the document does not describe a complete
/// [`ApiConfig`].
pub fn from_toml_str(toml_str: &str) -> Result<ApiConfig, ConfigError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Returns the embedded default endpoint table.
///
/// # Errors
///
/// Returns [`ConfigError`] if the embedded TOML is malformed.
pub fn default_config() -> Result<ApiConfig, ConfigError> {
    from_toml_str(DEFAULT_ENDPOINTS_TOML)
}

/// Returns the default endpoint table with [`ORIGIN_ENV`] and
/// [`API_BASE_ENV`] applied.
///
/// # Errors
///
/// Returns [`ConfigError`] if the embedded TOML is malformed.
pub fn from_env() -> Result<ApiConfig, ConfigError> {
    let config = default_config()?;
    Ok(apply_overrides(
        config,
        std::env::var(ORIGIN_ENV).ok(),
        std::env::var(API_BASE_ENV).ok(),
    ))
}

/// Replaces the origin and API base when overrides are given.
///
/// Blank overrides are ignored.
#[must_use]
pub fn apply_overrides(
    mut config: ApiConfig,
    origin: Option<String>,
    api_base: Option<String>,
) -> ApiConfig {
    if let Some(origin) = origin.filter(|s| !s.trim().is_empty()) {
        log::debug!("Using backend origin {origin} from {ORIGIN_ENV}");
        config.origin = origin;
    }
    if let Some(api_base) = api_base.filter(|s| !s.trim().is_empty()) {
        log::debug!("Using API base {api_base} from {API_BASE_ENV}");
        config.api_base = api_base;
    }
    config
}
