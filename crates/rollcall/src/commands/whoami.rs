use clap::ArgMatches;
use serde::Serialize;
use tracing::{info, warn};

use rollcall_core::api::types::Profile;
use rollcall_core::auth::Credentials;
use rollcall_core::auth_ops;

use super::helpers::{api_client, credentials_path, current_thread_runtime, load_config_with_warning};

/// Stored identity plus whatever the backend reports about it.
///
/// The profile fetch is best-effort: whoami still answers from the stored
/// credential when the backend is unreachable.
#[derive(Serialize)]
struct WhoamiOutput {
    role: String,
    email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
    logged_in_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<Profile>,
}

pub(crate) fn handle_whoami_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.whoami_started");

    let credentials = match auth_ops::current_credentials(&credentials_path()) {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{}", e);
            return Err(e.into());
        }
    };

    let profile = fetch_profile_best_effort(&credentials);

    if json_output {
        let output = WhoamiOutput {
            role: credentials.role.to_string(),
            email: credentials.email.clone(),
            display_name: credentials.display_name.clone(),
            logged_in_at: credentials.logged_in_at.clone(),
            profile,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match &credentials.display_name {
            Some(name) => println!("{} ({} {})", name, credentials.role, credentials.email),
            None => println!("{} ({})", credentials.email, credentials.role),
        }
        if let Some(profile) = &profile {
            if let Some(branch) = &profile.branch {
                match profile.semester {
                    Some(semester) => println!("Branch: {}, semester {}", branch, semester),
                    None => println!("Branch: {}", branch),
                }
            }
            if let Some(designation) = &profile.designation {
                println!("Designation: {}", designation);
            }
        }
        println!("Logged in since: {}", credentials.logged_in_at);
    }

    info!(event = "cli.whoami_completed", role = %credentials.role);
    Ok(())
}

fn fetch_profile_best_effort(credentials: &Credentials) -> Option<Profile> {
    let config = load_config_with_warning();
    let client = match api_client(&config) {
        Ok(client) => client.with_bearer(credentials.token.clone()),
        Err(_) => return None,
    };
    let runtime = current_thread_runtime().ok()?;

    match runtime.block_on(auth_ops::fetch_profile(&client, credentials.role)) {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!(event = "cli.whoami_profile_unavailable", error = %e);
            None
        }
    }
}
