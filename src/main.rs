//! Rack Checklist - terminal checklist for rack bring-up
//!
//! Without a subcommand the interactive checklist starts; subcommands give
//! headless access to derivation, rendering and credential generation.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rack_checklist::cli::{
    CheckArgs, ConfigArgs, CredentialsArgs, DeriveArgs, ExportsArgs, HostsArgs, RenderArgs,
    StatusArgs,
};
use rack_checklist::config::Config;
use rack_checklist::constants::{APP_BINARY_NAME, LOG_FILENAME};
use rack_checklist::error::{SessionError, SnapshotLoadError};
use rack_checklist::parser::load_catalog;
use rack_checklist::session::Session;
use rack_checklist::tui;

/// Rack Checklist - guided rack bring-up in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Step catalog (defaults to the configured catalog, then ./steps.yaml)
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Saved session to restore before starting the checklist
    #[arg(long, value_name = "FILE")]
    session: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the identifiers derived from a rack name
    Derive(DeriveArgs),
    /// Print the server host names for a rack
    Hosts(HostsArgs),
    /// Print the shell export block
    Exports(ExportsArgs),
    /// Render one substep description
    Render(RenderArgs),
    /// Build the info and BMC password tables
    Credentials(CredentialsArgs),
    /// Show checklist progress of a saved session
    Status(StatusArgs),
    /// Validate a step catalog
    Check(CheckArgs),
    /// Show or change configuration
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return run_checklist(cli.catalog.as_deref(), cli.session.as_deref(), cli.verbose);
    };

    init_stderr_logging(cli.verbose);

    let result = match command {
        Command::Derive(args) => args.execute(),
        Command::Hosts(args) => args.execute(),
        Command::Exports(args) => args.execute(),
        Command::Render(args) => args.execute(),
        Command::Credentials(args) => args.execute(),
        Command::Status(args) => args.execute(),
        Command::Check(args) => args.execute(),
        Command::Config(args) => args.execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(e.code.code());
    }

    Ok(())
}

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose { "debug" } else { "warn" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into())
}

/// Logs to stderr for headless commands.
fn init_stderr_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Logs to a file in the config directory while the TUI owns the terminal.
fn init_file_logging(verbose: bool) -> Result<PathBuf> {
    let log_dir = Config::config_dir()?;
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    let log_path = log_dir.join(LOG_FILENAME);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(log_path)
}

fn run_checklist(catalog: Option<&Path>, session: Option<&Path>, verbose: bool) -> Result<()> {
    if let Err(e) = init_file_logging(verbose) {
        eprintln!("Warning: file logging disabled: {e:#}");
    }

    let config = Config::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {e:#}");
        Config::default()
    });

    let catalog_path = config.resolve_catalog(catalog);
    let catalog = load_catalog(&catalog_path).with_context(|| {
        format!("Run '{APP_BINARY_NAME} check --catalog <FILE>' to validate a catalog")
    })?;
    info!(catalog = %catalog_path.display(), steps = catalog.len(), "catalog loaded");

    let mut checklist = Session::new(catalog);
    if let Some(path) = session {
        match checklist.load(path) {
            Ok(()) => {}
            Err(SessionError::SnapshotLoad(SnapshotLoadError::NotFound(_))) => {
                warn!(path = %path.display(), "session file not found, starting blank");
                eprintln!("Warning: session file not found: {}", path.display());
            }
            Err(e) => return Err(e).context("Failed to restore session"),
        }
    }

    let mut state = tui::AppState::new(checklist, config);

    let mut terminal = tui::setup_terminal()?;
    let result = tui::run_tui(&mut state, &mut terminal);
    tui::restore_terminal(terminal)?;

    result
}
