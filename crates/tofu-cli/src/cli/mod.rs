//! CLI argument parsing and command dispatch.

pub mod args;
pub mod commands;

use anyhow::Result;
use args::{Cli, Commands};
use clap::Parser;
use tracing::debug;

use tofu::KnownHosts;

use crate::config::Config;
use crate::logging;
use crate::output::OutputFormat;

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    if cli.no_color {
        colored::control::set_override(false);
    }

    // Load configuration
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)?;

    // Store from CLI/env, then config, then the per-user default
    let explicit = match cli.store {
        Some(path) => Some(path),
        None => config.expanded_store_path()?,
    };
    let store = KnownHosts::resolve(explicit.as_deref())?;
    debug!(store = %store.path().display(), config = %config_path.display(), "resolved paths");

    let output_format = cli
        .output
        .or(config.output_format)
        .unwrap_or(OutputFormat::Pretty);

    // Create context for commands
    let ctx = commands::Context {
        store,
        config,
        config_path,
        output_format,
        explain: cli.explain,
        verbose: cli.verbose,
    };

    // Dispatch to appropriate command
    match cli.command {
        Commands::Check(args) => commands::check::execute(&ctx, args),
        Commands::Show(args) => commands::show::execute(&ctx, &args),
        Commands::List => commands::list::execute(&ctx),
        Commands::Trust(args) => commands::trust::execute(&ctx, &args),
        Commands::Forget(args) => commands::forget::execute(&ctx, &args),
        Commands::Path => commands::path::execute(&ctx),
        Commands::Config(args) => commands::config::execute(ctx, args),
    }
}
