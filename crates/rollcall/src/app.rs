use clap::{Arg, ArgAction, Command};
use clap_complete::Shell;

pub fn build_cli() -> Command {
    Command::new("rollcall")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Drive QR attendance sessions from the terminal")
        .long_about(
            "rollcall is a client for a QR-code classroom attendance backend. \
            Teachers create sessions and project a rotating attendance token; \
            students submit a scanned token value to mark themselves present. \
            All validation (token, WiFi network, location) happens server-side.",
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress all log output except errors")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("login")
                .about("Log in and store the issued token locally")
                .arg(
                    Arg::new("role")
                        .help("Account type")
                        .required(true)
                        .value_parser(["student", "teacher"])
                        .index(1),
                )
                .arg(
                    Arg::new("email")
                        .long("email")
                        .short('e')
                        .help("Account email")
                        .required(true),
                )
                .arg(
                    Arg::new("password")
                        .long("password")
                        .short('p')
                        .help("Account password")
                        .required(true),
                ),
        )
        .subcommand(Command::new("logout").about("Remove the stored credential"))
        .subcommand(
            Command::new("whoami")
                .about("Show the logged-in identity")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("session")
                .about("Manage attendance sessions (teacher)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("create")
                        .about("Create a new attendance session")
                        .arg(
                            Arg::new("subject")
                                .long("subject")
                                .help("Subject name")
                                .required(true),
                        )
                        .arg(
                            Arg::new("branch")
                                .long("branch")
                                .help("Branch the session is for (e.g. CSE)")
                                .required(true),
                        )
                        .arg(
                            Arg::new("semester")
                                .long("semester")
                                .help("Semester number")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("division")
                                .long("division")
                                .help("Division (e.g. A)")
                                .required(true),
                        )
                        .arg(
                            Arg::new("total-students")
                                .long("total-students")
                                .help("Expected number of students")
                                .required(true)
                                .value_parser(clap::value_parser!(i64)),
                        ),
                )
                .subcommand(
                    Command::new("list").about("List your sessions").arg(
                        Arg::new("json")
                            .long("json")
                            .help("Output in JSON format")
                            .action(ArgAction::SetTrue),
                    ),
                )
                .subcommand(
                    Command::new("stats")
                        .about("Fetch one liveness snapshot for a session")
                        .arg(
                            Arg::new("id")
                                .help("Numeric session id")
                                .required(true)
                                .value_parser(clap::value_parser!(i64))
                                .index(1),
                        )
                        .arg(
                            Arg::new("json")
                                .long("json")
                                .help("Output in JSON format")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("end").about("End an active session").arg(
                        Arg::new("id")
                            .help("Numeric session id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64))
                            .index(1),
                    ),
                ),
        )
        .subcommand(
            Command::new("watch")
                .about("Project a session: rotating token, countdown, live present count")
                .long_about(
                    "Watches a session you own. Fetches a fresh rotating token every \
                    refresh period and displays it with a countdown, while polling the \
                    present count on a faster cadence. Exits when the session ends, the \
                    credential stops being accepted, a token fetch fails, or on Ctrl-C.",
                )
                .arg(
                    Arg::new("id")
                        .help("Numeric session id")
                        .required(true)
                        .value_parser(clap::value_parser!(i64))
                        .index(1),
                )
                .arg(
                    Arg::new("qr-file")
                        .long("qr-file")
                        .help("Write the current QR code PNG to this path on every rotation"),
                ),
        )
        .subcommand(
            Command::new("qr")
                .about("Fetch one rotating token without starting a watch")
                .arg(
                    Arg::new("id")
                        .help("Numeric session id")
                        .required(true)
                        .value_parser(clap::value_parser!(i64))
                        .index(1),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .short('o')
                        .help("Write the QR code PNG to this path"),
                ),
        )
        .subcommand(
            Command::new("mark")
                .about("Submit a scanned token value to mark attendance (student)")
                .arg(
                    Arg::new("token")
                        .help("Token value from a scanned or displayed QR code")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("no-device")
                        .long("no-device")
                        .help("Skip geolocation and WiFi lookup for this submission")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Show your attendance history (student)")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Show your per-subject attendance summary (student)")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completions")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .value_parser(clap::value_parser!(Shell))
                        .index(1),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_mark_parses_token() {
        let matches = build_cli()
            .try_get_matches_from(["rollcall", "mark", "abc123"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "mark");
        assert_eq!(sub.get_one::<String>("token").unwrap(), "abc123");
    }

    #[test]
    fn test_watch_requires_numeric_id() {
        let result = build_cli().try_get_matches_from(["rollcall", "watch", "not-a-number"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_quiet_flag_is_global() {
        let matches = build_cli()
            .try_get_matches_from(["rollcall", "logout", "--quiet"])
            .unwrap();
        assert!(matches.get_flag("quiet"));
    }

    #[test]
    fn test_session_create_requires_all_fields() {
        let result = build_cli().try_get_matches_from([
            "rollcall", "session", "create", "--subject", "Physics",
        ]);
        assert!(result.is_err());
    }
}
