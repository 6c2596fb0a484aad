//! CLI module for the armcost tool.
//!
//! This module provides the command-line interface for normalizing
//! what-if plans and inspecting provider detection.

mod commands;
mod output;

pub use commands::{Cli, Commands, OutputFormat};
pub use output::OutputFormatter;
