//! Configuration loading and merging logic.
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.rollcall/config.toml` (global user preferences)
//! 3. **Project config** - `./.rollcall/config.toml` (project-specific overrides)
//! 4. **Environment** - `ROLLCALL_API_URL` (highest priority for the base URL)

use crate::config::types::{ApiConfig, DeviceConfig, RollcallConfig, WatchConfig};
use crate::config::validation::validate_config;
use std::fs;
use std::path::PathBuf;

/// Check if an error is a "file not found" error.
fn is_file_not_found(e: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
        return io_err.kind() == std::io::ErrorKind::NotFound;
    }

    let err_str = e.to_string();
    err_str.contains("No such file or directory") || err_str.contains("cannot find the path")
}

/// Load configuration from the hierarchy of config files.
///
/// # Errors
///
/// Returns an error if parsing or validation fails. Missing config files
/// are not errors.
pub fn load_hierarchy() -> Result<RollcallConfig, Box<dyn std::error::Error>> {
    let mut config = RollcallConfig::default();

    // Load user config (file not found is expected, parse errors fail)
    match load_user_config() {
        Ok(user_config) => config = merge_configs(config, user_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {} // File not found - continue with defaults
    }

    // Load project config (file not found is expected, parse errors fail)
    match load_project_config() {
        Ok(project_config) => config = merge_configs(config, project_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {} // File not found - continue with merged config
    }

    validate_config(&config)?;

    Ok(config)
}

/// Load the user configuration from ~/.rollcall/config.toml.
fn load_user_config() -> Result<RollcallConfig, Box<dyn std::error::Error>> {
    let home_dir = dirs::home_dir().ok_or("Could not find home directory")?;
    let config_path = home_dir.join(".rollcall").join("config.toml");
    load_config_file(&config_path)
}

/// Load the project configuration from ./.rollcall/config.toml.
fn load_project_config() -> Result<RollcallConfig, Box<dyn std::error::Error>> {
    let config_path = std::env::current_dir()?.join(".rollcall").join("config.toml");
    load_config_file(&config_path)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &PathBuf) -> Result<RollcallConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
    let config: RollcallConfig = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional fields replace base values only when present in the override.
pub fn merge_configs(base: RollcallConfig, override_config: RollcallConfig) -> RollcallConfig {
    RollcallConfig {
        api: ApiConfig {
            base_url: override_config.api.base_url.or(base.api.base_url),
            timeout_secs: override_config.api.timeout_secs.or(base.api.timeout_secs),
        },
        watch: WatchConfig {
            token_refresh_secs: override_config
                .watch
                .token_refresh_secs
                .or(base.watch.token_refresh_secs),
            stats_poll_secs: override_config
                .watch
                .stats_poll_secs
                .or(base.watch.stats_poll_secs),
            view_refresh_delay_secs: override_config
                .watch
                .view_refresh_delay_secs
                .or(base.watch.view_refresh_delay_secs),
        },
        device: DeviceConfig {
            geo_source: override_config.device.geo_source.or(base.device.geo_source),
            latitude: override_config.device.latitude.or(base.device.latitude),
            longitude: override_config.device.longitude.or(base.device.longitude),
            geo_command: override_config.device.geo_command.or(base.device.geo_command),
            geo_timeout_secs: override_config
                .device
                .geo_timeout_secs
                .or(base.device.geo_timeout_secs),
            wifi_lookup: override_config.device.wifi_lookup && base.device.wifi_lookup,
        },
    }
}
