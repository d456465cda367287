//! # Rotorpost - Rotor Aerodynamics Post-Processing
//!
//! The main binary for rotorpost.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            apps/rotorpost (THE BINARY)       │
//! │                                              │
//! │   ┌─────────────┐        ┌──────────────┐    │
//! │   │    CLI      │        │  Case config │    │
//! │   │   (clap)    │        │    (toml)    │    │
//! │   └──────┬──────┘        └──────┬───────┘    │
//! │          └───────────┬──────────┘            │
//! │                      ▼                       │
//! │             ┌────────────────┐               │
//! │             │ rotorpost-core │               │
//! │             │ (THE NUMERICS) │               │
//! │             └────────────────┘               │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Mars rotor thrust from solver loads and a C81 deck
//! rotorpost thrust -p params.toml -l Results/r01forceDist.dat -a NACA5605_short.C81
//!
//! # Airfoil lookup, force history and curve summaries
//! rotorpost polar -a NACA5605_short.C81 --alpha 4 -m 0.5
//! rotorpost history -f Results/r01forceHist.txt
//! rotorpost curves -f Results/lift.curve
//! ```

use clap::Parser;
use rotorpost::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // ROTORPOST_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr; stdout carries command output only.
    let log_format = std::env::var("ROTORPOST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rotorpost=info".into());

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

    let cli = cli::Cli::parse();

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  rotorpost v{}
  rotor aerodynamics post-processing
"#,
        env!("CARGO_PKG_VERSION")
    );
}
