//! Configuration type definitions for the rollcall CLI.
//!
//! These types are serialized/deserialized from TOML config files.
//!
//! # Example Configuration
//!
//! ```toml
//! [api]
//! base_url = "https://attendance.example.edu/api"
//! timeout_secs = 30
//!
//! [watch]
//! token_refresh_secs = 6
//! stats_poll_secs = 3
//!
//! [device]
//! geo_source = "fixed"
//! latitude = 12.9716
//! longitude = 77.5946
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Runtime configuration for the rollcall CLI.
///
/// Holds paths and settings derived from environment variables and system
/// defaults, not from config files.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base directory for all rollcall data (default: ~/.rollcall)
    pub rollcall_dir: PathBuf,
    /// Log level for the application
    pub log_level: String,
    /// API base URL override from ROLLCALL_API_URL (wins over config files)
    pub api_url: Option<String>,
}

/// Main configuration loaded from TOML config files.
///
/// Loaded from:
/// 1. User config: `~/.rollcall/config.toml`
/// 2. Project config: `./.rollcall/config.toml`
///
/// Project config values override user config values.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RollcallConfig {
    /// Backend API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Watch loop timing
    #[serde(default)]
    pub watch: WatchConfig,

    /// Device signal acquisition for attendance submission
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Backend API settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// Base URL of the attendance backend.
    /// Default: `http://localhost:5000/api`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    /// Default: 30 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

/// Timing for the session watch loop.
///
/// The stats poll is intentionally faster than the token refresh so the
/// present count stays responsive between token rotations.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WatchConfig {
    /// Seconds between rotating-token fetches.
    /// Default: 6 seconds (matches the backend's token expiry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_refresh_secs: Option<u64>,

    /// Seconds between liveness stat polls.
    /// Default: 3 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats_poll_secs: Option<u64>,

    /// Seconds to wait after a successful submission before refreshing
    /// dependent read views. Default: 2 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_refresh_delay_secs: Option<u64>,
}

/// Device signal acquisition for attendance submission.
///
/// All signals are best-effort: an unavailable source means the
/// corresponding fields are omitted from the submission, never an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Geolocation source: "off", "fixed", or "command".
    /// Default: "off".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_source: Option<String>,

    /// Latitude for `geo_source = "fixed"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,

    /// Longitude for `geo_source = "fixed"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,

    /// External command for `geo_source = "command"`. Must print
    /// `<latitude> <longitude>` on stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_command: Option<String>,

    /// Seconds to wait for a geolocation fix before omitting it.
    /// Default: 5 seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo_timeout_secs: Option<u64>,

    /// Whether to detect the current WiFi network for submission.
    /// Default: true.
    #[serde(default = "super::defaults::default_wifi_lookup")]
    pub wifi_lookup: bool,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            geo_source: None,
            latitude: None,
            longitude: None,
            geo_command: None,
            geo_timeout_secs: None,
            wifi_lookup: super::defaults::default_wifi_lookup(),
        }
    }
}
