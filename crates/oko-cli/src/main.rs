mod commands;
mod error;
mod render;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, report, search, users, Context};
use crate::error::{exit_code_for, report_error};
use oko_config as config;
use oko_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "oko", version, about = "oko CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    #[command(subcommand)]
    User(users::UserCommand),
    /// Query the configured providers and build a report
    Search(search::SearchArgs),
    /// Build a report from a saved provider payload, offline
    Report(report::ReportArgs),
    /// Show recent searches for a user
    History(search::HistoryArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        Command::Report(args) => {
            // Offline rendering needs neither the store nor the config file.
            report::build_offline(json, args)
        }
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }
            let db_path =
                paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;

            if verbose {
                debug!(path = %db_path.display(), "database path resolved");
            }

            let store = Store::open(&db_path)
                .with_context(|| format!("open database {}", db_path.display()))?;
            store.migrate().with_context(|| "run migrations")?;

            let ctx = Context {
                store: &store,
                json,
                config: &app_config,
            };

            match command {
                Command::User(cmd) => match cmd {
                    users::UserCommand::Add(args) => users::add_user(&ctx, args),
                    users::UserCommand::Verify(args) => users::verify_user(&ctx, args),
                    users::UserCommand::Ls(args) => users::list_users(&ctx, args),
                    users::UserCommand::Rm(args) => users::remove_user(&ctx, args),
                },
                Command::Search(args) => search::run_search(&ctx, args),
                Command::History(args) => search::show_history(&ctx, args),
                Command::Completions(_) | Command::Report(_) => {
                    unreachable!("handled before store initialization")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init();
}
