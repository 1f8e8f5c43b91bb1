//! CLI command definitions for obs-resolver.
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Observation dataset resolver for model diagnostics runs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the diagnostics configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve observation datasets (default if no subcommand given)
    Resolve(ResolveArgs),

    /// Print the effective variable defaults
    Defaults,
}

/// Arguments for the resolve subcommand
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Report format: text (default), yaml, or json
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    pub format: String,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl Default for ResolveArgs {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            output: None,
        }
    }
}
