use std::io::Write;
use std::path::{Path, PathBuf};

use base64::Engine;
use clap::ArgMatches;
use tracing::{error, info, warn};

use rollcall_core::auth::Role;
use rollcall_core::watch::{SessionWatch, WatchEvent, WatchOptions};

use super::helpers::{authed_client, current_thread_runtime, load_config_with_warning};

pub(crate) fn handle_watch_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let session_db_id = *matches
        .get_one::<i64>("id")
        .ok_or("Session id argument is required")?;
    let qr_file = matches.get_one::<String>("qr-file").map(PathBuf::from);

    info!(event = "cli.watch_started", session_db_id = session_db_id);

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Teacher)?;
    let options = WatchOptions::from_config(&config.watch);
    let runtime = current_thread_runtime()?;

    let result = runtime.block_on(run_watch(client, session_db_id, options, qr_file));

    match &result {
        Ok(()) => info!(event = "cli.watch_completed", session_db_id = session_db_id),
        Err(e) => error!(event = "cli.watch_failed", session_db_id = session_db_id, error = %e),
    }

    result
}

async fn run_watch(
    client: rollcall_core::ApiClient,
    session_db_id: i64,
    options: WatchOptions,
    qr_file: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut watch, mut rx) = match SessionWatch::start(client, session_db_id, options).await {
        Ok(started) => started,
        Err(e) => {
            eprintln!("Could not start watch: {}", e);
            return Err(e.into());
        }
    };

    println!("Watching session {} (Ctrl-C to stop)", session_db_id);

    let result = loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("Stopping watch.");
                break Ok(());
            }
            event = rx.recv() => match event {
                None => break Ok(()),
                Some(event) => {
                    if let Some(outcome) = render_event(event, qr_file.as_deref()) {
                        break outcome;
                    }
                }
            }
        }
    };

    watch.stop().await;
    result
}

/// Render one event. Returns `Some` when the watch should end.
fn render_event(
    event: WatchEvent,
    qr_file: Option<&Path>,
) -> Option<Result<(), Box<dyn std::error::Error>>> {
    match event {
        WatchEvent::TokenRefreshed {
            qr_data,
            qr_code,
            subject,
            expires_in,
        } => {
            println!();
            println!("[{}] token: {} (rotates in {}s)", subject, qr_data, expires_in);
            if let Some(path) = qr_file {
                write_qr_png(path, &qr_code);
            }
            None
        }
        WatchEvent::Countdown { remaining_secs } => {
            // Cosmetic; overwritten in place so the token line stays visible
            print!("\r  next token in {}s ", remaining_secs);
            let _ = std::io::stdout().flush();
            None
        }
        WatchEvent::StatsUpdated {
            present,
            total,
            percentage,
        } => {
            match percentage {
                Some(percentage) => {
                    println!("\rPresent: {}/{} ({:.1}%)", present, total, percentage)
                }
                None => println!("\rPresent: {}/{}", present, total),
            }
            None
        }
        WatchEvent::SessionClosed => {
            println!();
            println!("Session closed.");
            Some(Ok(()))
        }
        WatchEvent::AuthLost { message } => {
            println!();
            eprintln!("Watch stopped: {}", message);
            Some(Err(format!("Authorization lost: {}", message).into()))
        }
        WatchEvent::RefreshFailed { message } => {
            println!();
            eprintln!("Token refresh failed, watch stopped: {}", message);
            Some(Err(format!("Token refresh failed: {}", message).into()))
        }
    }
}

/// Write the current QR PNG to disk. Best-effort: a bad write warns and the
/// watch keeps running with the on-screen token value.
pub(crate) fn write_qr_png(path: &Path, qr_code: &str) {
    // Backends vary on whether the payload carries a data-URL prefix
    let encoded = qr_code
        .strip_prefix("data:image/png;base64,")
        .unwrap_or(qr_code);

    let bytes = match base64::engine::general_purpose::STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(event = "cli.watch_qr_decode_failed", error = %e);
            return;
        }
    };

    if let Err(e) = std::fs::write(path, bytes) {
        warn!(event = "cli.watch_qr_write_failed", path = %path.display(), error = %e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_qr_png_plain_base64() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("qr.png");

        let encoded = base64::engine::general_purpose::STANDARD.encode(b"png-bytes");
        write_qr_png(&path, &encoded);

        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn test_write_qr_png_data_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("qr.png");

        let encoded = base64::engine::general_purpose::STANDARD.encode(b"png-bytes");
        write_qr_png(&path, &format!("data:image/png;base64,{}", encoded));

        assert_eq!(std::fs::read(&path).unwrap(), b"png-bytes");
    }

    #[test]
    fn test_write_qr_png_invalid_base64_is_best_effort() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("qr.png");

        write_qr_png(&path, "not base64 at all!!!");
        assert!(!path.exists());
    }

    #[test]
    fn test_render_terminal_events_end_the_watch() {
        assert!(render_event(WatchEvent::SessionClosed, None).unwrap().is_ok());
        assert!(
            render_event(
                WatchEvent::AuthLost {
                    message: "Token expired".to_string()
                },
                None
            )
            .unwrap()
            .is_err()
        );
        assert!(
            render_event(
                WatchEvent::RefreshFailed {
                    message: "connection refused".to_string()
                },
                None
            )
            .unwrap()
            .is_err()
        );
    }

    #[test]
    fn test_render_progress_events_keep_watching() {
        assert!(render_event(WatchEvent::Countdown { remaining_secs: 3 }, None).is_none());
        assert!(
            render_event(
                WatchEvent::StatsUpdated {
                    present: 10,
                    total: 30,
                    percentage: Some(33.3)
                },
                None
            )
            .is_none()
        );
    }
}
