use clap::ArgMatches;
use tracing::{error, info};

use rollcall_core::auth::Role;
use rollcall_core::session_ops;
use rollcall_core::sessions::NewSession;

use super::helpers::{authed_client, current_thread_runtime, load_config_with_warning};

pub(crate) fn handle_session_command(
    matches: &ArgMatches,
) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("create", sub_matches)) => handle_create(sub_matches),
        Some(("list", sub_matches)) => handle_list(sub_matches),
        Some(("stats", sub_matches)) => handle_stats(sub_matches),
        Some(("end", sub_matches)) => handle_end(sub_matches),
        _ => {
            error!(event = "cli.session_command_unknown");
            Err("Unknown session command".into())
        }
    }
}

fn handle_create(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let new = NewSession {
        subject: matches
            .get_one::<String>("subject")
            .ok_or("Subject argument is required")?
            .clone(),
        branch: matches
            .get_one::<String>("branch")
            .ok_or("Branch argument is required")?
            .clone(),
        semester: *matches
            .get_one::<i64>("semester")
            .ok_or("Semester argument is required")?,
        division: matches
            .get_one::<String>("division")
            .ok_or("Division argument is required")?
            .clone(),
        total_students: *matches
            .get_one::<i64>("total-students")
            .ok_or("Total students argument is required")?,
    };

    info!(event = "cli.session_create_started", subject = %new.subject);

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Teacher)?;
    let runtime = current_thread_runtime()?;

    match runtime.block_on(session_ops::create_session(&client, new)) {
        Ok(response) => {
            let session = &response.session;
            println!("{}", response.message);
            println!(
                "Session {} (id {}): {} for {} semester {}, {} students expected",
                session.session_id,
                session.id,
                session.subject,
                session.branch,
                session.semester,
                session.total_students
            );
            println!("Run 'rollcall watch {}' to project the rotating token.", session.id);
            info!(
                event = "cli.session_create_completed",
                session_db_id = session.id
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Could not create session: {}", e);
            error!(event = "cli.session_create_failed", error = %e);
            Err(e.into())
        }
    }
}

fn handle_list(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.session_list_started");

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Teacher)?;
    let runtime = current_thread_runtime()?;

    let sessions = match runtime.block_on(session_ops::list_sessions(&client)) {
        Ok(sessions) => sessions,
        Err(e) => {
            eprintln!("Could not list sessions: {}", e);
            error!(event = "cli.session_list_failed", error = %e);
            return Err(e.into());
        }
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
    } else if sessions.is_empty() {
        println!("No sessions found.");
    } else {
        for session in &sessions {
            let state = if session.is_active { "active" } else { "ended" };
            println!(
                "{:>5}  {:<22} {:<16} {}/{} present  [{}]",
                session.id,
                session.session_id,
                session.subject,
                session.present_count,
                session.total_students,
                state
            );
        }
    }

    info!(event = "cli.session_list_completed", count = sessions.len());
    Ok(())
}

fn handle_stats(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let session_db_id = *matches
        .get_one::<i64>("id")
        .ok_or("Session id argument is required")?;
    let json_output = matches.get_flag("json");

    info!(event = "cli.session_stats_started", session_db_id = session_db_id);

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Teacher)?;
    let runtime = current_thread_runtime()?;

    match runtime.block_on(session_ops::session_stats(&client, session_db_id)) {
        Ok(stats) => {
            if json_output {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let state = if stats.is_active { "active" } else { "ended" };
                match stats.attendance_percentage {
                    Some(percentage) => println!(
                        "Present: {}/{} ({:.1}%) [{}]",
                        stats.present_count, stats.total_students, percentage, state
                    ),
                    None => println!(
                        "Present: {}/{} [{}]",
                        stats.present_count, stats.total_students, state
                    ),
                }
            }
            info!(
                event = "cli.session_stats_completed",
                session_db_id = session_db_id
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Could not fetch session stats: {}", e);
            error!(event = "cli.session_stats_failed", session_db_id = session_db_id, error = %e);
            Err(e.into())
        }
    }
}

fn handle_end(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let session_db_id = *matches
        .get_one::<i64>("id")
        .ok_or("Session id argument is required")?;

    info!(event = "cli.session_end_started", session_db_id = session_db_id);

    let config = load_config_with_warning();
    let client = authed_client(&config, Role::Teacher)?;
    let runtime = current_thread_runtime()?;

    match runtime.block_on(session_ops::end_session(&client, session_db_id)) {
        Ok(response) => {
            println!("{}", response.message);
            println!(
                "Final count: {}/{} present",
                response.session.present_count, response.session.total_students
            );
            info!(
                event = "cli.session_end_completed",
                session_db_id = session_db_id
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Could not end session: {}", e);
            error!(event = "cli.session_end_failed", session_db_id = session_db_id, error = %e);
            Err(e.into())
        }
    }
}
