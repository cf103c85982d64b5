use std::time::Duration;

use clap::ArgMatches;
use tracing::{error, info};

use rollcall_core::attendance_ops;
use rollcall_core::auth::Role;
use rollcall_core::classify_failure;
use rollcall_core::device::{self, DeviceContext};

use super::helpers::{authed_client, current_thread_runtime, load_config_with_warning};

pub(crate) fn handle_mark_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let token = matches
        .get_one::<String>("token")
        .ok_or("Token argument is required")?;
    let skip_device = matches.get_flag("no-device");

    // Reject before touching credentials or the network
    if token.trim().is_empty() {
        eprintln!("Token value cannot be empty");
        error!(event = "cli.mark_empty_token");
        return Err("Token value cannot be empty".into());
    }

    info!(event = "cli.mark_started", skip_device = skip_device);

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Student)?;
    let view_refresh_delay = Duration::from_secs(config.watch.view_refresh_delay_secs());
    let runtime = current_thread_runtime()?;

    runtime.block_on(async {
        let context = if skip_device {
            DeviceContext::default()
        } else {
            device::acquire_device_context(&config.device).await
        };

        match attendance_ops::mark_and_refresh(&client, token, &context, view_refresh_delay).await {
            Ok((confirmation, dashboard)) => {
                println!(
                    "{}: {} ({})",
                    confirmation.message, confirmation.session.subject, confirmation.session.date
                );
                if let Some(location) = &confirmation.wifi_location {
                    println!("Verified on network: {}", location);
                }
                if let Some(stats) = dashboard {
                    println!(
                        "Attendance now {}/{} sessions ({:.1}%)",
                        stats.attendance.present,
                        stats.attendance.total_sessions,
                        stats.attendance.percentage
                    );
                }
                info!(event = "cli.mark_completed", subject = %confirmation.session.subject);
                Ok(())
            }
            Err(e) => {
                // Hint is advisory; logs keep the backend's exact wording
                match classify_failure(e.message()) {
                    Some(hint) => {
                        eprintln!("Could not mark attendance: {} (hint: {})", e.message(), hint)
                    }
                    None => eprintln!("Could not mark attendance: {}", e.message()),
                }
                error!(event = "cli.mark_failed", error = %e);
                Err(e.into())
            }
        }
    })
}
