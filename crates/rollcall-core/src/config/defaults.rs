//! Default implementations for configuration types.
//!
//! This module contains all `Default` implementations and helper functions
//! for providing default values in serde deserialization.

use crate::config::types::{ApiConfig, Config, DeviceConfig, WatchConfig};
use std::path::PathBuf;

/// Base URL used when neither ROLLCALL_API_URL nor a config file sets one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Returns the default for `[device] wifi_lookup` (true).
///
/// Used by serde `#[serde(default = "...")]` attribute.
pub fn default_wifi_lookup() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        let rollcall_dir = match dirs::home_dir() {
            Some(home) => home.join(".rollcall"),
            None => {
                eprintln!(
                    "Warning: Could not find home directory. Set HOME environment variable. \
                    Using fallback directory."
                );
                std::env::temp_dir().join(".rollcall")
            }
        };

        Self {
            rollcall_dir,
            log_level: std::env::var("ROLLCALL_LOG_LEVEL").unwrap_or("info".to_string()),
            api_url: parse_api_url_override(),
        }
    }
}

/// Parse ROLLCALL_API_URL env var, ignoring empty values.
fn parse_api_url_override() -> Option<String> {
    match std::env::var("ROLLCALL_API_URL") {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => None,
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the stored credential file.
    pub fn credentials_path(&self) -> PathBuf {
        self.rollcall_dir.join("credentials.json")
    }
}

impl ApiConfig {
    /// Returns the configured base URL, defaulting to localhost.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Returns the request timeout in seconds, defaulting to 30.
    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs.unwrap_or(30)
    }
}

impl WatchConfig {
    /// Returns the token refresh period in seconds, defaulting to 6.
    pub fn token_refresh_secs(&self) -> u64 {
        self.token_refresh_secs.unwrap_or(6)
    }

    /// Returns the stats poll period in seconds, defaulting to 3.
    pub fn stats_poll_secs(&self) -> u64 {
        self.stats_poll_secs.unwrap_or(3)
    }

    /// Returns the dependent-view refresh delay in seconds, defaulting to 2.
    pub fn view_refresh_delay_secs(&self) -> u64 {
        self.view_refresh_delay_secs.unwrap_or(2)
    }
}

impl DeviceConfig {
    /// Returns the geolocation source name, defaulting to "off".
    pub fn geo_source(&self) -> &str {
        self.geo_source.as_deref().unwrap_or("off")
    }

    /// Returns the geolocation acquisition timeout in seconds, defaulting to 5.
    pub fn geo_timeout_secs(&self) -> u64 {
        self.geo_timeout_secs.unwrap_or(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::RollcallConfig;

    #[test]
    fn test_config_default() {
        let config = Config::new();
        assert!(config.rollcall_dir.to_string_lossy().contains(".rollcall"));
    }

    #[test]
    fn test_config_paths() {
        let config = Config::new();
        assert!(
            config
                .credentials_path()
                .to_string_lossy()
                .ends_with("credentials.json")
        );
    }

    #[test]
    fn test_api_config_defaults() {
        let config = RollcallConfig::default();
        assert_eq!(config.api.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs(), 30);
    }

    #[test]
    fn test_watch_config_defaults() {
        let config = RollcallConfig::default();
        assert_eq!(config.watch.token_refresh_secs(), 6);
        assert_eq!(config.watch.stats_poll_secs(), 3);
        assert_eq!(config.watch.view_refresh_delay_secs(), 2);
    }

    #[test]
    fn test_device_config_defaults() {
        let config = RollcallConfig::default();
        assert_eq!(config.device.geo_source(), "off");
        assert_eq!(config.device.geo_timeout_secs(), 5);
        assert!(config.device.wifi_lookup);
    }

    #[test]
    fn test_watch_config_serde_defaults() {
        // TOML deserialization with missing fields must use the documented
        // defaults, not zero
        let toml_str = r#"
[watch]
token_refresh_secs = 10
"#;
        let config: RollcallConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.watch.token_refresh_secs(), 10);
        assert_eq!(
            config.watch.stats_poll_secs(),
            3,
            "stats_poll_secs should default to 3 when unset"
        );
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: RollcallConfig = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.watch.token_refresh_secs(), 6);
        assert!(config.device.wifi_lookup);
    }
}
