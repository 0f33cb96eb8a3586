// src/cli.rs
use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{env, path::PathBuf, process::ExitCode};

use crate::infra::t;

pub mod commands;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub project_dir: PathBuf,
    pub config: Option<PathBuf>,
    pub html: Option<PathBuf>,
    pub lang: Option<String>,
}

impl RunOptions {
    fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            project_dir: matches
                .get_one::<PathBuf>("project-dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            config: matches.get_one::<PathBuf>("config").cloned(),
            html: matches.get_one::<PathBuf>("html").cloned(),
            lang: matches.get_one::<String>("lang").cloned(),
        }
    }
}

/// Pre-parses the command line arguments to find the language setting.
/// This allows i18n to be initialized before the full CLI is built.
/// It looks for a `--lang <VALUE>` or `--lang=<VALUE>` argument.
fn pre_parse_language() -> Option<String> {
    let args: Vec<String> = env::args().collect();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        return args.get(pos + 1).cloned();
    }
    args.iter()
        .find_map(|arg| arg.strip_prefix("--lang="))
        .map(str::to_string)
}

pub fn build_cli() -> Command {
    Command::new("preset-matrix")
        .version(env!("CARGO_PKG_VERSION"))
        .about(t!("cli.about").to_string())
        .arg(
            Arg::new("lang")
                .long("lang")
                .help(t!("cli.lang").to_string())
                .value_name("LANGUAGE")
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("project-dir")
                .long("project-dir")
                .help(t!("cli.project_dir").to_string())
                .value_name("PROJECT_DIR")
                .default_value(".")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help(t!("cli.config").to_string())
                .value_name("CONFIG")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .help(t!("cli.html").to_string())
                .value_name("HTML")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true)
                .action(ArgAction::Set),
        )
        .subcommand(Command::new("run").about(t!("cli.run_about").to_string()))
        .subcommand(Command::new("list").about(t!("cli.list_about").to_string()))
}

/// Parses the command line and dispatches. With no subcommand the whole
/// matrix is run.
pub async fn run() -> Result<ExitCode> {
    // Pre-parse language and initialize i18n first.
    crate::init(pre_parse_language().as_deref());

    let matches = build_cli().get_matches();
    let options = RunOptions::from_matches(&matches);

    match matches.subcommand() {
        Some(("list", _)) => {
            commands::list::execute(&options)?;
            Ok(ExitCode::SUCCESS)
        }
        _ => commands::run::execute(&options).await,
    }
}
