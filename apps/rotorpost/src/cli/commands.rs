//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::ThrustArgs;
use crate::config::{CaseConfig, InversionMethod, params_from_toml_str};
use rotorpost_core::{
    Atmosphere, C81Table, Curve, ForceHistory, HistorySummary, LiftInversion, MachModel,
    PostError, SectionalLoads, ThrustReport, ThrustSettings, integrate_thrust, parse_curves,
    write_columns, write_curves,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of any solver output or airfoil file read (64 MB).
///
/// Solver text output is small; anything larger is almost certainly the
/// wrong file (a binary wake dump, for instance).
const MAX_INPUT_FILE_SIZE: u64 = 64 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), PostError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| PostError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(PostError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path and ensure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, PostError> {
    let canonical = path.canonicalize().map_err(|e| {
        PostError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(PostError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Validate an output path: its parent directory must exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, PostError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        PostError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(PostError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| PostError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

/// Read a text input after path and size validation.
fn read_input(path: &Path) -> Result<String, PostError> {
    let validated = validate_file_path(path)?;
    validate_file_size(&validated, MAX_INPUT_FILE_SIZE)?;
    std::fs::read_to_string(&validated)
        .map_err(|e| PostError::IoError(format!("Read '{}': {}", path.display(), e)))
}

fn write_output(path: &Path, contents: &str) -> Result<PathBuf, PostError> {
    let validated = validate_output_path(path)?;
    std::fs::write(&validated, contents)
        .map_err(|e| PostError::IoError(format!("Write '{}': {}", path.display(), e)))?;
    Ok(validated)
}

fn load_airfoil(path: &Path) -> Result<C81Table, PostError> {
    let airfoil = C81Table::parse(&read_input(path)?)?;
    tracing::info!("Loaded airfoil '{}' from {:?}", airfoil.name, path);
    Ok(airfoil)
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// THRUST COMMAND
// =============================================================================

/// Merge command-line overrides with the case file into thrust settings.
pub fn resolve_thrust_settings(
    config: &CaseConfig,
    args: &ThrustArgs,
) -> Result<ThrustSettings, PostError> {
    let atmosphere: Atmosphere = match &args.atmosphere {
        Some(spec) => spec.parse()?,
        None => config.atmosphere.atmosphere()?,
    };

    let lookup_mach = args.mach.unwrap_or(config.lift.mach);
    let mach = match args.speed_of_sound.or(config.lift.speed_of_sound) {
        Some(speed_of_sound) => {
            if let Some(m) = args.mach {
                tracing::warn!(
                    "Section Mach comes from speed of sound {}; --mach {} is not used for the CL lookup",
                    speed_of_sound,
                    m
                );
            }
            MachModel::Local { speed_of_sound }
        }
        None => MachModel::Fixed { mach: lookup_mach },
    };

    let method = if args.table_inversion {
        InversionMethod::Table
    } else {
        config.lift.method
    };
    let inversion = match method {
        InversionMethod::Linear => LiftInversion::Linear {
            cl_alpha: args.cl_alpha.unwrap_or(config.lift.cl_alpha),
            alpha0_deg: args.alpha0.unwrap_or(config.lift.alpha0_deg),
        },
        InversionMethod::Table => LiftInversion::Table { mach: lookup_mach },
    };

    let settings = ThrustSettings {
        density: atmosphere.density(),
        mach,
        inversion,
        abs_cl: config.lift.abs_cl && !args.signed_cl,
    };
    settings.validate()?;
    Ok(settings)
}

/// Re-evaluate rotor thrust and write the spanwise distribution.
pub fn cmd_thrust(config: &CaseConfig, args: &ThrustArgs, json_mode: bool) -> Result<(), PostError> {
    let params = params_from_toml_str(&read_input(&args.params)?)?;
    let loads = SectionalLoads::parse(&read_input(&args.loads)?)?;
    tracing::info!("Read {} blade sections from {:?}", loads.len(), args.loads);

    let airfoil_path = args.airfoil.as_ref().unwrap_or(&config.airfoil.path);
    let airfoil = load_airfoil(airfoil_path)?;

    let settings = resolve_thrust_settings(config, args)?;
    tracing::debug!("Thrust settings: {:?}", settings);

    let report = integrate_thrust(&loads, &params, &airfoil, &settings)?;

    let output = args.output.as_ref().unwrap_or(&config.output.distribution);
    let written = write_output(output, &write_columns(&report.distribution_rows()))?;
    tracing::info!("Wrote spanwise distribution to {:?}", written);

    if let Some(curve_path) = args.curve.as_ref().or(config.output.curve.as_ref()) {
        let curve_file = write_output(curve_path, &write_curves(&distribution_curves(&report)))?;
        tracing::info!("Wrote distribution curves to {:?}", curve_file);
    }

    if json_mode {
        let output = serde_json::json!({
            "airfoil": airfoil.name,
            "density": report.density,
            "tip_speed": report.tip_speed,
            "thrust": report.thrust,
            "ct": report.ct,
            "alpha_min_deg": report.alpha_min_deg,
            "alpha_max_deg": report.alpha_max_deg,
            "distribution_file": written.to_string_lossy(),
            "settings": settings,
            "sections": report.sections,
        });
        print_json(&output);
        return Ok(());
    }

    println!("Rotor Thrust Estimate");
    println!("=====================");
    println!("Airfoil:   {}", airfoil.name);
    println!("Density:   {} kg/m^3", report.density);
    println!("Tip speed: {} m/s", report.tip_speed);
    println!("Sections:  {}", report.sections.len());
    println!();
    println!(
        "Min/Max alpha (deg) = {} / {}",
        report.alpha_min_deg, report.alpha_max_deg
    );
    println!("Thrust = {}", report.thrust);
    println!("CT     = {}", report.ct);
    println!();
    println!("Distribution: {:?}", written);

    Ok(())
}

/// Alpha and lift-per-span distributions as named curves.
pub fn distribution_curves(report: &ThrustReport) -> Vec<Curve> {
    let alpha = report
        .sections
        .iter()
        .map(|s| (s.r_over_r, s.alpha_deg))
        .collect();
    let solver_alpha = report
        .sections
        .iter()
        .map(|s| (s.r_over_r, s.solver_alpha_deg))
        .collect();
    let lift = report
        .sections
        .iter()
        .map(|s| (s.r_over_r, s.lift_per_span))
        .collect();

    vec![
        Curve::new("alpha", alpha),
        Curve::new("solver_alpha", solver_alpha),
        Curve::new("lift_per_span", lift),
    ]
}

// =============================================================================
// POLAR COMMAND
// =============================================================================

/// Coefficients of one airfoil at one condition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolarLookup {
    pub airfoil: String,
    pub alpha_deg: f64,
    pub mach: f64,
    pub cl: f64,
    pub cd: f64,
    pub cm: f64,
}

/// Airfoil file and Mach number of a polar lookup, falling back to the case file.
pub fn resolve_polar_condition(
    config: &CaseConfig,
    airfoil: Option<&Path>,
    mach: Option<f64>,
) -> (PathBuf, f64) {
    (
        airfoil
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.airfoil.path.clone()),
        mach.unwrap_or(config.lift.mach),
    )
}

/// Read an airfoil deck and look up its coefficients.
pub fn polar_lookup(airfoil: &Path, alpha: f64, mach: f64) -> Result<PolarLookup, PostError> {
    let table = load_airfoil(airfoil)?;
    Ok(PolarLookup {
        cl: table.get_cl(alpha, mach),
        cd: table.get_cd(alpha, mach),
        cm: table.get_cm(alpha, mach),
        airfoil: table.name,
        alpha_deg: alpha,
        mach,
    })
}

/// Look up airfoil coefficients at one condition.
pub fn cmd_polar(airfoil: &Path, alpha: f64, mach: f64, json_mode: bool) -> Result<(), PostError> {
    let lookup = polar_lookup(airfoil, alpha, mach)?;

    if json_mode {
        print_json(&serde_json::json!(lookup));
        return Ok(());
    }

    println!(
        "{} at alpha = {} deg, M = {}",
        lookup.airfoil, lookup.alpha_deg, lookup.mach
    );
    println!("  CL = {:.6}", lookup.cl);
    println!("  CD = {:.6}", lookup.cd);
    println!("  CM = {:.6}", lookup.cm);
    Ok(())
}

// =============================================================================
// HISTORY COMMAND
// =============================================================================

/// Read a force-history file and summarize its trailing window.
pub fn history_summary(file: &Path, fraction: f64) -> Result<HistorySummary, PostError> {
    let history = ForceHistory::parse(&read_input(file)?)?;
    let summary = history.summarize(fraction)?;
    tracing::info!("Read {} force-history samples from {:?}", summary.samples, file);
    Ok(summary)
}

/// Summarize a force-history file.
pub fn cmd_history(file: &Path, fraction: f64, json_mode: bool) -> Result<(), PostError> {
    let summary = history_summary(file, fraction)?;

    if json_mode {
        print_json(&serde_json::json!({
            "file": file.to_string_lossy(),
            "summary": summary,
        }));
        return Ok(());
    }

    println!("Force History");
    println!("=============");
    println!("File:        {:?}", file);
    println!("Samples:     {}", summary.samples);
    println!(
        "Iterations:  {} .. {}",
        summary.first_iteration, summary.last_iteration
    );
    println!("Final CT:    {}", summary.final_ct);
    println!(
        "Mean CT:     {} (last {} samples)",
        summary.trailing_mean_ct, summary.window
    );
    println!("Variation:   {}", summary.trailing_variation);
    Ok(())
}

// =============================================================================
// CURVES COMMAND
// =============================================================================

/// Point count and extent of one curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurveSummary {
    pub name: String,
    pub points: usize,
    pub x_range: Option<(f64, f64)>,
    pub y_range: Option<(f64, f64)>,
}

/// Read a `.curve` file and summarize each curve.
pub fn curve_summaries(file: &Path) -> Result<Vec<CurveSummary>, PostError> {
    let curves = parse_curves(&read_input(file)?)?;
    Ok(curves
        .iter()
        .map(|c| CurveSummary {
            name: c.name.clone(),
            points: c.points.len(),
            x_range: c.x_range(),
            y_range: c.y_range(),
        })
        .collect())
}

/// List the curves in a `.curve` file.
pub fn cmd_curves(file: &Path, json_mode: bool) -> Result<(), PostError> {
    let summaries = curve_summaries(file)?;

    if json_mode {
        print_json(&serde_json::json!({
            "file": file.to_string_lossy(),
            "curves": summaries,
        }));
        return Ok(());
    }

    println!("{:?}: {} curve(s)", file, summaries.len());
    for curve in &summaries {
        match (curve.x_range, curve.y_range) {
            (Some((x0, x1)), Some((y0, y1))) => println!(
                "  {:<24} {:>6} pts  x [{}, {}]  y [{}, {}]",
                curve.name, curve.points, x0, x1, y0, y1
            ),
            _ => println!("  {:<24} {:>6} pts", curve.name, curve.points),
        }
    }
    Ok(())
}
