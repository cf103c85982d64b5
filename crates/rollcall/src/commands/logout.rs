use clap::ArgMatches;
use tracing::{error, info};

use rollcall_core::auth_ops;

use super::helpers::credentials_path;

pub(crate) fn handle_logout_command(
    _matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    info!(event = "cli.logout_started");

    match auth_ops::logout(&credentials_path()) {
        Ok(true) => {
            println!("Logged out.");
            info!(event = "cli.logout_completed");
            Ok(())
        }
        Ok(false) => {
            println!("Not logged in.");
            info!(event = "cli.logout_completed");
            Ok(())
        }
        Err(e) => {
            eprintln!("Logout failed: {}", e);
            error!(event = "cli.logout_failed", error = %e);
            Err(e.into())
        }
    }
}
