use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

use marathon_core::model::Course;
use marathon_core::rules::MedalPolicy;
use services::{Clock, RaceService};
use ui::TerminalApp;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    InvalidPercent { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidPercent { flag, raw } => {
                write!(f, "invalid {flag} value: {raw} (expected 0-99)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_percent(raw: String, flag: &'static str) -> Result<u8, ArgsError> {
    raw.trim()
        .parse::<u8>()
        .map_err(|_| ArgsError::InvalidPercent { flag, raw })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  marathon-quiz [play]  [--silver <pct>] [--bronze <pct>]");
    eprintln!("  marathon-quiz course  [--json]");
    eprintln!();
    eprintln!("Defaults for play:");
    eprintln!("  --silver 70   accuracy needed for silver (gold needs 100%)");
    eprintln!("  --bronze 40   accuracy needed for bronze");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  MARATHON_SILVER_PCT, MARATHON_BRONZE_PCT, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    Course,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "course" => Some(Self::Course),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Args {
    command: Command,
    silver: u8,
    bronze: u8,
    json: bool,
    help: bool,
}

impl Args {
    fn defaults_from_env(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let policy = MedalPolicy::default();
        let env_pct = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u8>().ok());
        Self {
            command: Command::Play,
            silver: env_pct("MARATHON_SILVER_PCT").unwrap_or(policy.silver_min_percent()),
            bronze: env_pct("MARATHON_BRONZE_PCT").unwrap_or(policy.bronze_min_percent()),
            json: false,
            help: false,
        }
    }

    fn parse(
        argv: Vec<String>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut parsed = Self::defaults_from_env(lookup);
        let mut args = argv.into_iter().peekable();

        // Default behavior: play when no subcommand is provided.
        if let Some(first) = args.peek().filter(|a| !a.starts_with('-')) {
            parsed.command = Command::from_arg(first)
                .ok_or_else(|| ArgsError::UnknownCommand(first.clone()))?;
            args.next();
        }

        while let Some(arg) = args.next() {
            match (parsed.command, arg.as_str()) {
                (_, "--help" | "-h") => parsed.help = true,
                (Command::Play, "--silver") => {
                    let raw = require_value(&mut args, "--silver")?;
                    parsed.silver = parse_percent(raw, "--silver")?;
                }
                (Command::Play, "--bronze") => {
                    let raw = require_value(&mut args, "--bronze")?;
                    parsed.bronze = parse_percent(raw, "--bronze")?;
                }
                (Command::Course, "--json") => parsed.json = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn print_course(
    course: &Course,
    json: bool,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        serde_json::to_writer_pretty(&mut *out, course)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{} ({})", course.name(), course.length())?;
    for question in course {
        let aid = question
            .aid_station()
            .map(|aid| format!("  [aid: {}]", aid.items().join(", ")))
            .unwrap_or_default();
        writeln!(
            out,
            "{:>3} {:>10}  {:<10} {}{aid}",
            question.id().to_string(),
            question.distance().to_string(),
            question.category().label(),
            question.prompt()
        )?;
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args =
        Args::parse(argv, |key| std::env::var(key).ok()).inspect_err(|_| print_usage())?;
    if args.help {
        print_usage();
        return Ok(());
    }

    // Fail fast on a malformed built-in table before anything is shown.
    let course = Arc::new(Course::standard()?);

    match args.command {
        Command::Course => {
            let stdout = io::stdout();
            print_course(&course, args.json, &mut stdout.lock())
        }
        Command::Play => {
            let policy = MedalPolicy::new(args.silver, args.bronze)?;
            log::info!(
                "medal thresholds: silver {}%, bronze {}%",
                policy.silver_min_percent(),
                policy.bronze_min_percent()
            );
            let service = RaceService::new(course)
                .with_clock(Clock::system())
                .with_medal_policy(policy);

            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut app = TerminalApp::new(service.new_session(), stdin.lock(), stdout.lock());
            app.run()?;

            let runs = app.session().runs();
            log::info!("played {} run(s)", runs.len());
            Ok(())
        }
    }
}

fn main() {
    pretty_env_logger::init();
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn no_arguments_means_play_with_default_thresholds() {
        let args = Args::parse(Vec::new(), no_env).unwrap();
        assert_eq!(args.command, Command::Play);
        assert_eq!((args.silver, args.bronze), (70, 40));
    }

    #[test]
    fn flags_override_environment() {
        let env = |key: &str| match key {
            "MARATHON_SILVER_PCT" => Some("90".to_string()),
            "MARATHON_BRONZE_PCT" => Some("60".to_string()),
            _ => None,
        };
        let args = Args::parse(argv(&["--bronze", "50"]), env).unwrap();
        assert_eq!((args.silver, args.bronze), (90, 50));
    }

    #[test]
    fn course_subcommand_accepts_json() {
        let args = Args::parse(argv(&["course", "--json"]), no_env).unwrap();
        assert_eq!(args.command, Command::Course);
        assert!(args.json);
        let err = Args::parse(argv(&["play", "--json"]), no_env).unwrap_err();
        assert_eq!(err, ArgsError::UnknownArg("--json".into()));
    }

    #[test]
    fn bad_values_are_reported() {
        assert_eq!(
            Args::parse(argv(&["--silver"]), no_env).unwrap_err(),
            ArgsError::MissingValue { flag: "--silver" }
        );
        assert_eq!(
            Args::parse(argv(&["--silver", "lots"]), no_env).unwrap_err(),
            ArgsError::InvalidPercent {
                flag: "--silver",
                raw: "lots".into()
            }
        );
        assert_eq!(
            Args::parse(argv(&["sprint"]), no_env).unwrap_err(),
            ArgsError::UnknownCommand("sprint".into())
        );
    }

    #[test]
    fn course_listing_has_one_line_per_question() {
        let course = Course::standard().unwrap();
        let mut out = Vec::new();
        print_course(&course, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), course.len() + 1);
        assert!(text.starts_with("City Marathon (42.195 km)"));
    }

    #[test]
    fn course_json_round_trips_through_serde_json() {
        let course = Course::standard().unwrap();
        let mut out = Vec::new();
        print_course(&course, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "City Marathon");
    }
}
