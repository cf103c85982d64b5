//! Best-effort WiFi identity lookup.
//!
//! The backend compares the student's network against the teacher's when an
//! SSID is attached to a mark request. Lookup shells out to platform tools:
//!
//! - Linux: `iwgetid` (SSID and access point BSSID)
//! - macOS: `networksetup -getairportnetwork` (SSID only)
//! - Other: no lookup
//!
//! Any failure resolves to `None`; marking proceeds without the signal.

use tracing::debug;
#[cfg(any(target_os = "linux", target_os = "macos"))]
use tracing::warn;

use crate::config::DeviceConfig;
use crate::device::types::NetworkIdentity;

#[cfg(any(target_os = "linux", target_os = "macos"))]
const LOOKUP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

pub async fn acquire_network_identity(config: &DeviceConfig) -> Option<NetworkIdentity> {
    if !config.wifi_lookup {
        debug!(event = "core.device.wifi_disabled");
        return None;
    }

    match platform_network_identity().await {
        Some(identity) => {
            debug!(event = "core.device.wifi_acquired", ssid = %identity.ssid);
            Some(identity)
        }
        None => {
            debug!(event = "core.device.wifi_unavailable");
            None
        }
    }
}

#[cfg(target_os = "linux")]
async fn platform_network_identity() -> Option<NetworkIdentity> {
    match which::which("iwgetid") {
        Ok(_) => {}
        Err(which::Error::CannotFindBinaryPath) => {
            debug!(
                event = "core.device.wifi_skipped",
                reason = "iwgetid not found",
            );
            return None;
        }
        Err(e) => {
            warn!(event = "core.device.wifi_lookup_failed", error = %e);
            return None;
        }
    }

    let ssid = command_stdout("iwgetid", &["--raw"]).await?;
    let bssid = command_stdout("iwgetid", &["--ap", "--raw"]).await;

    Some(NetworkIdentity { ssid, bssid })
}

#[cfg(target_os = "macos")]
async fn platform_network_identity() -> Option<NetworkIdentity> {
    let raw = command_stdout("networksetup", &["-getairportnetwork", "en0"]).await?;
    let ssid = parse_airport_output(&raw)?;

    Some(NetworkIdentity { ssid, bssid: None })
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
async fn platform_network_identity() -> Option<NetworkIdentity> {
    debug!(
        event = "core.device.wifi_skipped",
        reason = "unsupported platform",
    );
    None
}

#[cfg(any(target_os = "macos", test))]
fn parse_airport_output(raw: &str) -> Option<String> {
    let ssid = raw.trim().strip_prefix("Current Wi-Fi Network:")?.trim();
    if ssid.is_empty() {
        None
    } else {
        Some(ssid.to_string())
    }
}

/// Run a lookup tool and return its trimmed stdout, or `None` on any failure.
#[cfg(any(target_os = "linux", target_os = "macos"))]
async fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = match tokio::time::timeout(
        LOOKUP_TIMEOUT,
        tokio::process::Command::new(program).args(args).output(),
    )
    .await
    {
        Err(_) => {
            warn!(event = "core.device.wifi_lookup_timeout", program = program);
            return None;
        }
        Ok(Err(e)) => {
            warn!(
                event = "core.device.wifi_lookup_failed",
                program = program,
                error = %e
            );
            return None;
        }
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
