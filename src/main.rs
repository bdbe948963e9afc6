//! Arcweld CLI - G-code Arc-Welding Integration Layer
//!
//! Command-line interface for welding sliced scenes through the
//! ArcWelder console tool.

use anyhow::Context;
use clap::Parser;
use env_logger::Env;
use log::info;

use arcweld::cli::{commands, Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Arcweld v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Arcweld v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> anyhow::Result<()> {
    match cmd {
        Commands::Process {
            scene,
            settings,
            tool_dir,
            output,
            keep_header,
            abort_on_error,
            dry_run,
        } => commands::process(
            &scene,
            settings.as_deref(),
            &tool_dir,
            output.as_deref(),
            keep_header,
            abort_on_error,
            dry_run,
        )
        .with_context(|| format!("processing {}", scene.display())),
        Commands::Version { tool_dir } => commands::version(&tool_dir)
            .with_context(|| format!("querying tool under {}", tool_dir.display())),
        Commands::Definitions => commands::definitions().context("printing settings definitions"),
    }
}
