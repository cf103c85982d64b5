//! Best-effort geolocation acquisition.
//!
//! Sources (config `device.geo_source`):
//! - `off`: no fix, no work (default)
//! - `fixed`: coordinates straight from config
//! - `command`: run a user-supplied command and parse its stdout
//!
//! Acquisition is bounded by `device.geo_timeout_secs`. Every failure mode
//! resolves to `None` with a warn event.

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::DeviceConfig;
use crate::device::types::GeoFix;

pub async fn acquire_geo_fix(config: &DeviceConfig) -> Option<GeoFix> {
    match config.geo_source() {
        "off" => {
            debug!(event = "core.device.geo_disabled");
            None
        }
        "fixed" => match (config.latitude, config.longitude) {
            (Some(latitude), Some(longitude)) => {
                debug!(
                    event = "core.device.geo_acquired",
                    source = "fixed",
                    latitude = latitude,
                    longitude = longitude
                );
                Some(GeoFix {
                    latitude,
                    longitude,
                })
            }
            _ => {
                warn!(
                    event = "core.device.geo_unavailable",
                    source = "fixed",
                    message = "geo_source is 'fixed' but latitude/longitude are not both set"
                );
                None
            }
        },
        "command" => {
            let Some(command) = config.geo_command.as_deref() else {
                warn!(
                    event = "core.device.geo_unavailable",
                    source = "command",
                    message = "geo_source is 'command' but geo_command is not set"
                );
                return None;
            };

            geo_from_command(command, Duration::from_secs(config.geo_timeout_secs())).await
        }
        other => {
            warn!(
                event = "core.device.geo_unavailable",
                source = other,
                message = "Unknown geo source"
            );
            None
        }
    }
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn shell_command(command: &str) -> tokio::process::Command {
    let mut cmd = tokio::process::Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

async fn geo_from_command(command: &str, timeout: Duration) -> Option<GeoFix> {
    debug!(event = "core.device.geo_command_started", command = command);

    let output = match tokio::time::timeout(timeout, shell_command(command).output()).await {
        Err(_) => {
            warn!(
                event = "core.device.geo_timeout",
                command = command,
                timeout_ms = timeout.as_millis() as u64
            );
            return None;
        }
        Ok(Err(e)) => {
            warn!(
                event = "core.device.geo_command_failed",
                command = command,
                error = %e
            );
            return None;
        }
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(
            event = "core.device.geo_command_failed",
            command = command,
            stderr = %stderr.trim()
        );
        return None;
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_geo_output(&stdout) {
        Some(fix) => {
            debug!(
                event = "core.device.geo_acquired",
                source = "command",
                latitude = fix.latitude,
                longitude = fix.longitude
            );
            Some(fix)
        }
        None => {
            warn!(
                event = "core.device.geo_parse_failed",
                command = command,
                stdout = %stdout.trim()
            );
            None
        }
    }
}

/// Parse a coordinate pair from command output.
///
/// Accepts a JSON object with `latitude`/`longitude` number fields, or two
/// numbers separated by whitespace or a comma.
pub fn parse_geo_output(raw: &str) -> Option<GeoFix> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        let latitude = value.get("latitude").and_then(|v| v.as_f64())?;
        let longitude = value.get("longitude").and_then(|v| v.as_f64())?;
        return finite_fix(latitude, longitude);
    }

    let mut parts = trimmed
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let latitude = parts.next()?.parse::<f64>().ok()?;
    let longitude = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }

    finite_fix(latitude, longitude)
}

fn finite_fix(latitude: f64, longitude: f64) -> Option<GeoFix> {
    if latitude.is_finite() && longitude.is_finite() {
        Some(GeoFix {
            latitude,
            longitude,
        })
    } else {
        None
    }
}
