//! # Configuration System
//!
//! Hierarchical TOML configuration for the rollcall CLI.
//!
//! ## Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.rollcall/config.toml` (global user preferences)
//! 3. **Project config** - `./.rollcall/config.toml` (project-specific overrides)
//! 4. **Environment** - `ROLLCALL_API_URL` overrides the API base URL
//!
//! ## Usage Example
//!
//! ```toml
//! # ~/.rollcall/config.toml
//! [api]
//! base_url = "https://attendance.example.edu/api"
//!
//! [watch]
//! token_refresh_secs = 6
//! stats_poll_secs = 3
//! ```
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use rollcall_core::config::RollcallConfig;
//!
//! // Handle config errors explicitly - don't silently fall back to defaults
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RollcallConfig::load_hierarchy()?;
//!     let period = config.watch.token_refresh_secs();
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod types;
pub mod validation;

// Public API exports
pub use defaults::DEFAULT_BASE_URL;
pub use types::{ApiConfig, Config, DeviceConfig, RollcallConfig, WatchConfig};
pub use validation::{VALID_GEO_SOURCES, validate_config};

// Backward-compatible delegation for RollcallConfig methods
impl RollcallConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, Box<dyn std::error::Error>> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    ///
    /// See [`validation::validate_config`] for details.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
