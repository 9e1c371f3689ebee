//! # Netlogic - Blueprint Validator and Evaluator
//!
//! The main binary for the Netlogic combinational logic engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │               apps/netlogic (THE BINARY)              │
//! │                                                       │
//! │  ┌─────────────┐   ┌──────────────┐   ┌────────────┐  │
//! │  │    CLI      │   │ TOML config  │   │ File I/O   │  │
//! │  │   (clap)    │   │ (limits,     │   │ (JSON,     │  │
//! │  │             │   │  gates)      │   │  binary)   │  │
//! │  └──────┬──────┘   └──────┬───────┘   └─────┬──────┘  │
//! │         └─────────────────┼─────────────────┘         │
//! │                           ▼                           │
//! │                   ┌───────────────┐                   │
//! │                   │ netlogic-core │                   │
//! │                   │  (THE LOGIC)  │                   │
//! │                   └───────────────┘                   │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! netlogic library --name ripple-adder --bits 4 -o adder.json
//! netlogic validate -f adder.json
//! netlogic eval -f adder.json --inputs 1,0,0,0,1,0,0,0,0
//! netlogic table -f adder.json
//! ```
//!
//! Exit status: 0 on success, 1 on error, 2 when the blueprint has defects.

use clap::Parser;
use netlogic::cli::{self, Outcome};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing: NETLOGIC_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("NETLOGIC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if cli.verbose {
        "netlogic=debug,netlogic_core=debug"
    } else {
        "netlogic=info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    match cli::execute(cli) {
        Ok(Outcome::Success) => ExitCode::SUCCESS,
        Ok(Outcome::Defective) => ExitCode::from(2),
        Err(e) => {
            tracing::error!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Print the Netlogic startup banner.
fn print_banner() {
    eprintln!(
        r#"
  ┌─┐ ┌─┐  netlogic v{}
  │&├─┤≥1├─  combinational blueprint engine
  └─┘ └─┘
"#,
        env!("CARGO_PKG_VERSION")
    );
}
