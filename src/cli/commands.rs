//! CLI command definitions.
//!
//! This module defines all CLI commands and their arguments using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Armcost - Azure what-if plan normalizer for cost estimation.
#[derive(Parser, Debug)]
#[command(name = "armcost")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, env = "ARMCOST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Normalize a plan and show the per-resource breakdown.
    Breakdown {
        /// What-if JSON, ARM template, or bicep file (overrides the
        /// configuration file).
        #[arg(short, long)]
        path: Option<PathBuf>,

        /// Include skipped and free resources in the breakdown.
        #[arg(long)]
        show_skipped: bool,
    },

    /// Show which provider would handle a project path.
    Detect {
        /// Project path to inspect (overrides the configuration file).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
