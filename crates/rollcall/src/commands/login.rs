use clap::ArgMatches;
use tracing::{error, info};

use rollcall_core::auth::Role;
use rollcall_core::auth_ops;

use super::helpers::{api_client, credentials_path, current_thread_runtime, load_config_with_warning};

pub(crate) fn handle_login_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let role: Role = matches
        .get_one::<String>("role")
        .ok_or("Role argument is required")?
        .parse()?;
    let email = matches
        .get_one::<String>("email")
        .ok_or("Email argument is required")?;
    let password = matches
        .get_one::<String>("password")
        .ok_or("Password argument is required")?;

    info!(event = "cli.login_started", role = %role, email = email);

    let config = load_config_with_warning();
    let client = api_client(&config)?;
    let runtime = current_thread_runtime()?;

    let credentials =
        match runtime.block_on(auth_ops::login(&client, role, email, password, &credentials_path())) {
            Ok(credentials) => credentials,
            Err(e) => {
                eprintln!("Login failed: {}", e);
                error!(event = "cli.login_failed", role = %role, error = %e);
                return Err(e.into());
            }
        };

    match &credentials.display_name {
        Some(name) => println!("Logged in as {} ({} {})", name, role, email),
        None => println!("Logged in as {} ({})", email, role),
    }

    info!(event = "cli.login_completed", role = %role, email = email);
    Ok(())
}
