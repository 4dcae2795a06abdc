//! Command-line argument definitions for the ERD CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, what is emitted,
//! configuration file selection, and logging verbosity.

use clap::{Parser, ValueEnum};

/// What the CLI writes for a successfully processed input.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Emit {
    /// Outline of the parsed model
    #[default]
    Model,
    /// Syntax tree dump, one node per line
    Tree,
    /// Normalized ERD source
    Source,
}

/// Command-line arguments for the ERD diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input ERD file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// What to emit
    #[arg(long, value_enum, default_value_t = Emit::Model)]
    pub emit: Emit,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
