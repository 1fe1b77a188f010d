use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wl_cli::commands::clock::{self, ClockAction};
use wl_cli::commands::{logs, maintain, status};
use wl_cli::{Cli, Commands, Config, LogRegistry, PromptNotes, joined_note};

/// Load config and build the log registry.
fn open_registry(config_path: Option<&Path>) -> Result<LogRegistry> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(LogRegistry::from_config(&config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let Some(command) = &cli.command else {
        // No subcommand, show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let registry = open_registry(cli.config.as_deref())?;
    let mut stdout = std::io::stdout().lock();

    match command {
        Commands::Logs => logs::run(&mut stdout, &registry)?,
        command => run_on_log(&mut stdout, &registry, cli.log.as_deref(), command)?,
    }

    Ok(())
}

/// Runs a command that operates on a single log.
fn run_on_log<W: Write>(
    writer: &mut W,
    registry: &LogRegistry,
    log: Option<&str>,
    command: &Commands,
) -> Result<()> {
    let name = registry.resolve(log)?;
    let now = wl_engine::local_now();

    let (action, note) = match command {
        Commands::In => (ClockAction::In, None),
        Commands::Out { note } => (ClockAction::Out, joined_note(note)),
        Commands::Fix { note } => (ClockAction::Fix, joined_note(note)),
        Commands::Event { note } => (ClockAction::Event, joined_note(note)),
        Commands::Purge => return maintain::purge(writer, registry, &name),
        Commands::Refresh => return maintain::refresh(writer, registry, &name),
        Commands::Status { json } => return status::run(writer, registry, &name, *json, now),
        Commands::Logs => return logs::run(writer, registry),
    };

    clock::run(
        writer,
        registry,
        &name,
        action,
        note.as_deref(),
        PromptNotes::stdio(),
        now,
    )
}
