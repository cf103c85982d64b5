use clap::ArgMatches;
use tracing::{error, info};

use rollcall_core::attendance_ops;
use rollcall_core::auth::Role;

use super::helpers::{authed_client, current_thread_runtime, load_config_with_warning};

pub(crate) fn handle_dashboard_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.dashboard_started");

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Student)?;
    let runtime = current_thread_runtime()?;

    let stats = match runtime.block_on(attendance_ops::dashboard_stats(&client)) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Could not fetch dashboard stats: {}", e);
            error!(event = "cli.dashboard_failed", error = %e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        println!(
            "Overall: {}/{} sessions ({:.1}%)",
            stats.attendance.present, stats.attendance.total_sessions, stats.attendance.percentage
        );
        for subject in &stats.subject_wise_attendance {
            println!(
                "  {:<16} {}/{} ({:.1}%)",
                subject.subject, subject.present, subject.total_sessions, subject.percentage
            );
        }
    }

    info!(
        event = "cli.dashboard_completed",
        subjects = stats.subject_wise_attendance.len()
    );
    Ok(())
}
