use clap::ArgMatches;
use tracing::{error, info};

use rollcall_core::attendance_ops;
use rollcall_core::auth::Role;

use super::helpers::{authed_client, current_thread_runtime, load_config_with_warning};

pub(crate) fn handle_history_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.history_started");

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Student)?;
    let runtime = current_thread_runtime()?;

    let history = match runtime.block_on(attendance_ops::attendance_history(&client)) {
        Ok(history) => history,
        Err(e) => {
            eprintln!("Could not fetch attendance history: {}", e);
            error!(event = "cli.history_failed", error = %e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&history)?);
    } else {
        if history.attendance.is_empty() {
            println!("No attendance records yet.");
        } else {
            for record in &history.attendance {
                println!(
                    "{}  {:<16} {}",
                    record.session_date, record.subject, record.status
                );
            }
        }
        let stats = &history.statistics;
        println!(
            "Total: {} sessions, {} present, {} absent ({:.1}%)",
            stats.total_sessions, stats.present, stats.absent, stats.percentage
        );
    }

    info!(
        event = "cli.history_completed",
        records = history.attendance.len()
    );
    Ok(())
}
