//! Shared plumbing for command handlers.

use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use rollcall_core::ApiClient;
use rollcall_core::RollcallConfig;
use rollcall_core::auth_ops;
use rollcall_core::auth::Role;
use rollcall_core::config::Config;

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
pub(crate) fn load_config_with_warning() -> RollcallConfig {
    match RollcallConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.rollcall/config.toml and ./.rollcall/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
                "Config load failed, using defaults"
            );
            RollcallConfig::default()
        }
    }
}

/// Single-threaded runtime for command execution.
///
/// Commands interleave their timers and requests cooperatively on one
/// thread; nothing in the client needs parallelism.
pub(crate) fn current_thread_runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>>
{
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to build async runtime: {}", e).into())
}

/// Where the credential file lives (`~/.rollcall/credentials.json`).
pub(crate) fn credentials_path() -> PathBuf {
    Config::default().credentials_path()
}

/// Build an unauthenticated client from config, honoring `ROLLCALL_API_URL`.
pub(crate) fn api_client(config: &RollcallConfig) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let runtime_config = Config::default();
    let base_url = runtime_config
        .api_url
        .as_deref()
        .unwrap_or_else(|| config.api.base_url());

    let client = ApiClient::new(base_url, Duration::from_secs(config.api.timeout_secs()))
        .map_err(|e| format!("{}", e))?;

    Ok(client)
}

/// Build a client carrying the stored credential, requiring the given role.
///
/// Prints a user-facing message before returning the error so callers can
/// propagate without re-explaining.
pub(crate) fn authed_client(
    config: &RollcallConfig,
    required: Role,
) -> Result<ApiClient, Box<dyn std::error::Error>> {
    let credentials = match auth_ops::require_role(&credentials_path(), required) {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{}", e);
            return Err(e.into());
        }
    };

    Ok(api_client(config)?.with_bearer(credentials.token))
}
