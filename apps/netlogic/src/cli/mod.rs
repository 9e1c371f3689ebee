//! # Netlogic CLI Module
//!
//! This module implements the CLI interface for Netlogic.
//!
//! ## Available Commands
//!
//! - `validate` - Report every structural defect of a blueprint
//! - `eval` - Evaluate a blueprint for one input vector
//! - `table` - Print the full truth table
//! - `inspect` - Show circuit metrics
//! - `convert` - Convert between JSON and compact binary
//! - `library` - Write a reference blueprint
//! - `hash` - Compute BLAKE3 fingerprint of a blueprint

mod commands;

use crate::config::Config;
use clap::{Parser, Subcommand, ValueEnum};
use netlogic_core::NetlogicError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Netlogic - combinational logic blueprint validator and evaluator
///
/// Validates gate netlists, reports every defect, and evaluates
/// well-formed blueprints deterministically.
#[derive(Parser, Debug)]
#[command(name = "netlogic")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Path to a TOML config file (default: ./netlogic.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Blueprint file encodings.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Interchange JSON document
    Json,
    /// Compact header + postcard payload
    Binary,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a blueprint and report every defect
    Validate {
        /// Blueprint file (JSON or binary)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Evaluate a blueprint for one input vector
    Eval {
        /// Blueprint file (JSON or binary)
        #[arg(short, long)]
        file: PathBuf,

        /// Input values, comma-separated (1/0/true/false)
        #[arg(short, long, default_value = "")]
        inputs: String,
    },

    /// Print the truth table of a blueprint
    Table {
        /// Blueprint file (JSON or binary)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show circuit metrics
    Inspect {
        /// Blueprint file (JSON or binary)
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Convert a blueprint between formats
    Convert {
        /// Input blueprint file
        #[arg(short, long)]
        file: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Output format
        #[arg(short = 't', long, value_enum, default_value = "binary")]
        format: Format,
    },

    /// Write a reference blueprint from the built-in library
    Library {
        /// Blueprint name (omit to list available names)
        #[arg(short, long)]
        name: Option<String>,

        /// Bit width for multi-bit blueprints
        #[arg(short, long, default_value = "4")]
        bits: usize,

        /// Output file path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 't', long, value_enum, default_value = "json")]
        format: Format,
    },

    /// Compute BLAKE3 fingerprint of a blueprint
    Hash {
        /// Blueprint file (JSON or binary)
        #[arg(short, long)]
        file: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<Outcome, NetlogicError> {
    let config = Config::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Validate { file } => cmd_validate(&config, &file, json_mode, cli.verbose),
        Commands::Eval { file, inputs } => cmd_eval(&config, &file, &inputs, json_mode),
        Commands::Table { file } => cmd_table(&config, &file, json_mode),
        Commands::Inspect { file } => cmd_inspect(&config, &file, json_mode),
        Commands::Convert {
            file,
            output,
            format,
        } => cmd_convert(&config, &file, &output, format),
        Commands::Library {
            name,
            bits,
            output,
            format,
        } => cmd_library(name.as_deref(), bits, output.as_deref(), format, json_mode),
        Commands::Hash { file } => cmd_hash(&config, &file, json_mode),
    }
}
