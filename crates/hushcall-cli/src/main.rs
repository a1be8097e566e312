mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use hushcall_core::phone::{is_known_region, normalize_region};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{allow, completions, contacts, log, screen, settings, Context};
use crate::error::{exit_code_for, invalid_input, report_error};
use hushcall_config as config;
use hushcall_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(
    name = "hushcall",
    version,
    about = "Decide whether an incoming call rings or is silenced"
)]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Home region (ISO 3166 alpha-2) for numbers without a country prefix
    #[arg(long, global = true)]
    region: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Screen an incoming caller number
    Screen(screen::ScreenArgs),
    #[command(subcommand)]
    Allow(allow::AllowCommand),
    #[command(subcommand)]
    Contact(contacts::ContactCommand),
    #[command(subcommand)]
    Log(log::LogCommand),
    #[command(subcommand)]
    Config(settings::ConfigCommand),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
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
        region,
        command,
    } = cli;

    let command = match command {
        Command::Completions(args) => return completions::emit(args),
        command => command,
    };

    let region = match region {
        Some(value) if !is_known_region(&value) => {
            return Err(invalid_input(format!("unknown region code: {}", value.trim())));
        }
        value => value.as_deref().and_then(normalize_region),
    };

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let store =
        Store::open(&db_path).with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let region = region.or_else(|| app_config.home_region.clone());
    debug!(region = ?region, "home region");

    let ctx = Context {
        store: &store,
        json,
        config: &app_config,
        region,
    };

    match command {
        Command::Screen(args) => screen::screen(&ctx, args),
        Command::Allow(cmd) => match cmd {
            allow::AllowCommand::Add(args) => allow::add(&ctx, args),
            allow::AllowCommand::Ls(args) => allow::list(&ctx, args),
            allow::AllowCommand::Show(args) => allow::show(&ctx, args),
            allow::AllowCommand::Rm(args) => allow::remove(&ctx, args),
            allow::AllowCommand::Enable(args) => allow::set_active(&ctx, args, true),
            allow::AllowCommand::Disable(args) => allow::set_active(&ctx, args, false),
        },
        Command::Contact(cmd) => match cmd {
            contacts::ContactCommand::Add(args) => contacts::add(&ctx, args),
            contacts::ContactCommand::Ls(args) => contacts::list(&ctx, args),
            contacts::ContactCommand::Rm(args) => contacts::remove(&ctx, args),
        },
        Command::Log(cmd) => match cmd {
            log::LogCommand::Call(args) => log::log_call(&ctx, args),
            log::LogCommand::Message(args) => log::log_message(&ctx, args),
            log::LogCommand::Calls(args) => log::list_calls(&ctx, args),
            log::LogCommand::Messages(args) => log::list_messages(&ctx, args),
        },
        Command::Config(settings::ConfigCommand::Show) => settings::show(&ctx),
        Command::Completions(_) => {
            unreachable!("completions command handled before store initialization")
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
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
