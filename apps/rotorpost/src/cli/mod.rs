//! # Rotorpost CLI Module
//!
//! This module implements the CLI interface for rotorpost.
//!
//! ## Available Commands
//!
//! - `thrust` - Re-evaluate rotor thrust with a C81 airfoil deck
//! - `polar` - Look up CL/CD/CM at one angle of attack and Mach number
//! - `history` - Summarize a force-history file
//! - `curves` - List the curves in a VisIt `.curve` file

mod commands;

use clap::{Args, Parser, Subcommand};
use rotorpost_core::PostError;
use rotorpost_core::primitives::DEFAULT_TRAILING_FRACTION;
use std::path::PathBuf;

use crate::config::CaseConfig;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Rotorpost - rotor aerodynamics post-processing
///
/// Reads solver output (sectional loads, force histories, curve files) and
/// C81 airfoil decks, and writes derived data files.
#[derive(Parser, Debug)]
#[command(name = "rotorpost")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Case configuration file (TOML); defaults to ./rotorpost.toml if present
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Re-evaluate rotor thrust from sectional loads and an airfoil deck
    Thrust(ThrustArgs),

    /// Look up airfoil coefficients
    Polar {
        /// C81 airfoil file (defaults to the case file's airfoil)
        #[arg(short, long)]
        airfoil: Option<PathBuf>,

        /// Angle of attack in degrees
        #[arg(long, allow_hyphen_values = true)]
        alpha: f64,

        /// Mach number (defaults to the case file's lookup Mach)
        #[arg(short, long)]
        mach: Option<f64>,
    },

    /// Summarize a force-history file
    History {
        /// Force-history file
        #[arg(short, long, default_value = "Results/r01forceHist.txt")]
        file: PathBuf,

        /// Trailing fraction of samples used for convergence statistics
        #[arg(long, default_value_t = DEFAULT_TRAILING_FRACTION)]
        fraction: f64,
    },

    /// List curves in a VisIt .curve file
    Curves {
        /// Curve file
        #[arg(short, long)]
        file: PathBuf,
    },
}

/// Arguments of the `thrust` command. Unset options fall back to the case file.
#[derive(Args, Debug, Default)]
pub struct ThrustArgs {
    /// Solver run parameters (TOML: omega, density, radius, nb)
    #[arg(short, long, default_value = "params.toml")]
    pub params: PathBuf,

    /// Sectional load table (secSpan secCL secArea secAlpha secChord)
    #[arg(short, long, default_value = "Results/r01forceDist.dat")]
    pub loads: PathBuf,

    /// C81 airfoil file
    #[arg(short, long)]
    pub airfoil: Option<PathBuf>,

    /// Target atmosphere: mars, earth, or a density in kg/m^3
    #[arg(long)]
    pub atmosphere: Option<String>,

    /// Lookup Mach number
    #[arg(short, long)]
    pub mach: Option<f64>,

    /// Compute section Mach from rotational speed with this speed of sound
    #[arg(long)]
    pub speed_of_sound: Option<f64>,

    /// Invert the tabulated CL curve instead of the linear lift model
    #[arg(long)]
    pub table_inversion: bool,

    /// Linear lift slope, per radian
    #[arg(long)]
    pub cl_alpha: Option<f64>,

    /// Zero-lift angle of attack, degrees
    #[arg(long, allow_hyphen_values = true)]
    pub alpha0: Option<f64>,

    /// Keep the sign of the solver CL instead of taking its magnitude
    #[arg(long)]
    pub signed_cl: bool,

    /// Spanwise distribution output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Additionally write the distribution as a VisIt .curve file
    #[arg(long)]
    pub curve: Option<PathBuf>,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), PostError> {
    let config = CaseConfig::load(cli.config.as_deref())?;
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Thrust(args) => cmd_thrust(&config, &args, json_mode),
        Commands::Polar {
            airfoil,
            alpha,
            mach,
        } => {
            let (airfoil, mach) = resolve_polar_condition(&config, airfoil.as_deref(), mach);
            cmd_polar(&airfoil, alpha, mach, json_mode)
        }
        Commands::History { file, fraction } => cmd_history(&file, fraction, json_mode),
        Commands::Curves { file } => cmd_curves(&file, json_mode),
    }
}
