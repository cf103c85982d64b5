use clap::ArgMatches;
use tracing::error;

pub mod helpers;

mod completions;
mod dashboard;
mod history;
mod login;
mod logout;
mod mark;
mod qr;
mod session;
mod watch;
mod whoami;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    match matches.subcommand() {
        Some(("login", sub_matches)) => login::handle_login_command(sub_matches),
        Some(("logout", sub_matches)) => logout::handle_logout_command(sub_matches),
        Some(("whoami", sub_matches)) => whoami::handle_whoami_command(sub_matches),
        Some(("session", sub_matches)) => session::handle_session_command(sub_matches),
        Some(("watch", sub_matches)) => watch::handle_watch_command(sub_matches),
        Some(("qr", sub_matches)) => qr::handle_qr_command(sub_matches),
        Some(("mark", sub_matches)) => mark::handle_mark_command(sub_matches),
        Some(("history", sub_matches)) => history::handle_history_command(sub_matches),
        Some(("dashboard", sub_matches)) => dashboard::handle_dashboard_command(sub_matches),
        Some(("completions", sub_matches)) => {
            completions::handle_completions_command(sub_matches)
        }
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}
