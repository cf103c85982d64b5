use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use rollcall_core::auth::Role;

use super::helpers::{authed_client, current_thread_runtime, load_config_with_warning};
use super::watch::write_qr_png;

/// One-shot token fetch, for scripting around the rotating display.
///
/// The token expires on the backend's normal schedule; this does not keep
/// it fresh. Use `watch` for a live session.
pub(crate) fn handle_qr_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let session_db_id = *matches
        .get_one::<i64>("id")
        .ok_or("Session id argument is required")?;
    let out = matches.get_one::<String>("out").map(PathBuf::from);

    info!(event = "cli.qr_started", session_db_id = session_db_id);

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Teacher)?;
    let runtime = current_thread_runtime()?;

    match runtime.block_on(client.generate_token(session_db_id)) {
        Ok(issue) => {
            println!(
                "[{}] token: {} (expires in {}s)",
                issue.subject,
                issue.qr_data,
                issue.expires_in_seconds()
            );
            if let Some(path) = &out {
                write_qr_png(path, &issue.qr_code);
                println!("QR image written to {}", path.display());
            }
            info!(event = "cli.qr_completed", session_db_id = session_db_id);
            Ok(())
        }
        Err(e) => {
            eprintln!("Could not fetch token: {}", e);
            error!(event = "cli.qr_failed", session_db_id = session_db_id, error = %e);
            Err(e.into())
        }
    }
}
