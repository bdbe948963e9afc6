//! CLI Module
//!
//! Command-line interface for the arc-welding integration layer.

pub mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Arcweld - feed sliced G-code through the ArcWelder arc-fitting tool
#[derive(Parser, Debug)]
#[command(name = "arcweld")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Weld the plates of a scene file, or of every scene in a directory
    #[command(name = "process")]
    Process {
        /// Scene JSON file, or a directory of scene files
        scene: PathBuf,

        /// Weld options JSON file; bundled defaults apply when omitted
        #[arg(short, long)]
        settings: Option<PathBuf>,

        /// Directory holding the bundled ArcWelder executable
        #[arg(long, default_value = ".")]
        tool_dir: PathBuf,

        /// Write the result here instead of in place (single scene only)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Hand the first layer to the tool instead of holding it back
        #[arg(long)]
        keep_header: bool,

        /// Stop the batch at the first plate failure
        #[arg(long)]
        abort_on_error: bool,

        /// Report what would be welded without invoking the tool or
        /// writing files
        #[arg(long)]
        dry_run: bool,
    },

    /// Query the bundled tool version
    #[command(name = "version")]
    Version {
        /// Directory holding the bundled ArcWelder executable
        #[arg(long, default_value = ".")]
        tool_dir: PathBuf,
    },

    /// Print the settings definition tree
    #[command(name = "definitions")]
    Definitions,
}
