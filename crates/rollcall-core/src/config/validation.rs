//! Configuration validation.

use crate::config::types::RollcallConfig;
use crate::errors::ConfigError;

/// Recognized values for `[device] geo_source`.
pub const VALID_GEO_SOURCES: &[&str] = &["off", "fixed", "command"];

/// Validate a loaded configuration.
///
/// # Errors
///
/// Returns `ConfigError::InvalidConfiguration` describing the first
/// offending setting.
pub fn validate_config(config: &RollcallConfig) -> Result<(), ConfigError> {
    if let Some(url) = &config.api.base_url
        && !(url.starts_with("http://") || url.starts_with("https://"))
    {
        return Err(ConfigError::InvalidConfiguration {
            message: format!("api.base_url must be an http(s) URL, got '{}'", url),
        });
    }

    if config.watch.token_refresh_secs() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "watch.token_refresh_secs must be greater than zero".to_string(),
        });
    }

    if config.watch.stats_poll_secs() == 0 {
        return Err(ConfigError::InvalidConfiguration {
            message: "watch.stats_poll_secs must be greater than zero".to_string(),
        });
    }

    let geo_source = config.device.geo_source();
    if !VALID_GEO_SOURCES.contains(&geo_source) {
        return Err(ConfigError::InvalidConfiguration {
            message: format!(
                "device.geo_source must be one of {:?}, got '{}'",
                VALID_GEO_SOURCES, geo_source
            ),
        });
    }

    if geo_source == "fixed" && (config.device.latitude.is_none() || config.device.longitude.is_none())
    {
        return Err(ConfigError::InvalidConfiguration {
            message: "device.geo_source = \"fixed\" requires latitude and longitude".to_string(),
        });
    }

    if geo_source == "command" && config.device.geo_command.is_none() {
        return Err(ConfigError::InvalidConfiguration {
            message: "device.geo_source = \"command\" requires geo_command".to_string(),
        });
    }

    Ok(())
}
