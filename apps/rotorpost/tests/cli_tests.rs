//! Integration tests for the CLI commands, run against files in a temp directory.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use rotorpost::cli::{
    ThrustArgs, cmd_curves, cmd_history, cmd_polar, cmd_thrust, curve_summaries,
    history_summary, polar_lookup, resolve_polar_condition, resolve_thrust_settings,
};
use rotorpost::config::CaseConfig;
use rotorpost_core::primitives::{EARTH_SEA_LEVEL_DENSITY, MARS_DENSITY};
use rotorpost_core::{LiftInversion, MachModel, PostError, parse_curves};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// =============================================================================
// FIXTURES
// =============================================================================

const AIRFOIL: &str = "\
TEST SECTION                   2 3 1 2 1 2
         0.300  0.700
-12.000-0.6000-0.6600
  0.000 0.6000 0.6600
 12.000 1.8000 1.9800
         0.000
-12.000 0.0200
 12.000 0.0300
         0.000
-12.000-0.0500
 12.000-0.0700
";

const PARAMS: &str = "\
Omega = 250.0
density = 1.225
radius = 1.0
nb = 2
";

const LOADS: &str = "\
# secSpan secCL secArea secAlpha secChord
0.25  -0.30  0.0125  2.5  0.05
0.50  -0.40  0.0125  3.0  0.05
0.75  -0.35  0.0125  2.0  0.05
";

struct Case {
    dir: TempDir,
}

impl Case {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("airfoil.C81"), AIRFOIL).unwrap();
        std::fs::write(dir.path().join("params.toml"), PARAMS).unwrap();
        std::fs::write(dir.path().join("loads.dat"), LOADS).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn thrust_args(&self) -> ThrustArgs {
        ThrustArgs {
            params: self.path("params.toml"),
            loads: self.path("loads.dat"),
            airfoil: Some(self.path("airfoil.C81")),
            output: Some(self.path("loadVLM.dat")),
            ..ThrustArgs::default()
        }
    }
}

fn read_rows(path: &Path) -> Vec<Vec<f64>> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| l.split_whitespace().map(|t| t.parse().unwrap()).collect())
        .collect()
}

// =============================================================================
// THRUST COMMAND
// =============================================================================

#[test]
fn thrust_writes_distribution_file() {
    let case = Case::new();
    cmd_thrust(&CaseConfig::default(), &case.thrust_args(), false).unwrap();

    let rows = read_rows(&case.path("loadVLM.dat"));
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == 3));
    assert_eq!(rows[0][0], 0.25);
    assert_eq!(rows[2][0], 0.75);
    // Lift per span grows outboard with V^2
    assert!(rows[2][2] > rows[0][2]);
}

#[test]
fn thrust_writes_curve_file_on_request() {
    let case = Case::new();
    let args = ThrustArgs {
        curve: Some(case.path("loadVLM.curve")),
        ..case.thrust_args()
    };
    cmd_thrust(&CaseConfig::default(), &args, true).unwrap();

    let text = std::fs::read_to_string(case.path("loadVLM.curve")).unwrap();
    let curves = parse_curves(&text).unwrap();
    let names: Vec<&str> = curves.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["alpha", "solver_alpha", "lift_per_span"]);
    assert_eq!(curves[1].points[1], (0.5, 3.0));
}

#[test]
fn thrust_uses_case_file_output_path() {
    let case = Case::new();
    let config = CaseConfig::from_toml_str(&format!(
        "[output]\ndistribution = {:?}\n",
        case.path("from_config.dat").to_string_lossy()
    ))
    .unwrap();
    let args = ThrustArgs {
        output: None,
        ..case.thrust_args()
    };
    cmd_thrust(&config, &args, true).unwrap();
    assert_eq!(read_rows(&case.path("from_config.dat")).len(), 3);
}

#[test]
fn thrust_missing_loads_is_io_error() {
    let case = Case::new();
    let args = ThrustArgs {
        loads: case.path("absent.dat"),
        ..case.thrust_args()
    };
    let err = cmd_thrust(&CaseConfig::default(), &args, true).unwrap_err();
    assert!(matches!(err, PostError::IoError(_)));
}

#[test]
fn thrust_out_of_range_table_inversion_fails() {
    let case = Case::new();
    std::fs::write(
        case.path("loads.dat"),
        "# secSpan secCL secArea secAlpha secChord\n0.5 2.5 0.01 3.0 0.05\n",
    )
    .unwrap();
    let args = ThrustArgs {
        table_inversion: true,
        ..case.thrust_args()
    };
    let err = cmd_thrust(&CaseConfig::default(), &args, true).unwrap_err();
    assert!(matches!(err, PostError::InversionFailed { section: 0, .. }));
}

// =============================================================================
// SETTINGS RESOLUTION
// =============================================================================

#[test]
fn command_line_overrides_case_file() {
    let config = CaseConfig::from_toml_str(
        "[atmosphere]\ndensity = \"mars\"\n[lift]\nalpha0_deg = -5.0\nmach = 0.3\n",
    )
    .unwrap();

    let defaults = resolve_thrust_settings(&config, &ThrustArgs::default()).unwrap();
    assert_eq!(defaults.density, MARS_DENSITY);
    assert_eq!(defaults.mach, MachModel::Fixed { mach: 0.3 });
    assert!(matches!(
        defaults.inversion,
        LiftInversion::Linear { alpha0_deg, .. } if alpha0_deg == -5.0
    ));

    let args = ThrustArgs {
        atmosphere: Some("earth".to_string()),
        speed_of_sound: Some(340.0),
        table_inversion: true,
        signed_cl: true,
        ..ThrustArgs::default()
    };
    let overridden = resolve_thrust_settings(&config, &args).unwrap();
    assert_eq!(overridden.density, EARTH_SEA_LEVEL_DENSITY);
    assert_eq!(
        overridden.mach,
        MachModel::Local {
            speed_of_sound: 340.0
        }
    );
    assert_eq!(overridden.inversion, LiftInversion::Table { mach: 0.3 });
    assert!(!overridden.abs_cl);
}

#[test]
fn speed_of_sound_takes_precedence_over_mach() {
    let args = ThrustArgs {
        mach: Some(0.4),
        speed_of_sound: Some(240.0),
        table_inversion: true,
        ..ThrustArgs::default()
    };
    let settings = resolve_thrust_settings(&CaseConfig::default(), &args).unwrap();
    assert_eq!(
        settings.mach,
        MachModel::Local {
            speed_of_sound: 240.0
        }
    );
    // The explicit Mach still selects the inversion curve
    assert_eq!(settings.inversion, LiftInversion::Table { mach: 0.4 });
}

#[test]
fn settings_serialize_with_model_tags() {
    let settings = resolve_thrust_settings(&CaseConfig::default(), &ThrustArgs::default()).unwrap();
    let value = serde_json::to_value(settings).unwrap();
    assert_eq!(value["inversion"]["method"], "linear");
    assert_eq!(value["mach"]["model"], "fixed");
    assert_eq!(value["mach"]["mach"], 0.5);
    assert_eq!(value["abs_cl"], true);
}

#[test]
fn invalid_atmosphere_is_rejected() {
    let args = ThrustArgs {
        atmosphere: Some("jupiter".to_string()),
        ..ThrustArgs::default()
    };
    let err = resolve_thrust_settings(&CaseConfig::default(), &args).unwrap_err();
    assert!(matches!(err, PostError::InvalidParameter(_)));
}

// =============================================================================
// POLAR COMMAND
// =============================================================================

#[test]
fn polar_interpolates_airfoil_deck() {
    let case = Case::new();
    let lookup = polar_lookup(&case.path("airfoil.C81"), 6.0, 0.5).unwrap();

    assert_eq!(lookup.airfoil, "TEST SECTION");
    // CL halfway between 0 and 12 deg, then between Mach 0.3 and 0.7
    assert!((lookup.cl - 1.26).abs() < 1e-12);
    assert!((lookup.cd - 0.0275).abs() < 1e-12);
    assert!((lookup.cm + 0.065).abs() < 1e-12);

    cmd_polar(&case.path("airfoil.C81"), 6.0, 0.5, true).unwrap();
}

#[test]
fn polar_condition_falls_back_to_case_file() {
    let config = CaseConfig::from_toml_str(
        "[airfoil]\npath = \"deck.C81\"\n[lift]\nmach = 0.3\n",
    )
    .unwrap();

    let (airfoil, mach) = resolve_polar_condition(&config, None, None);
    assert_eq!(airfoil, PathBuf::from("deck.C81"));
    assert_eq!(mach, 0.3);

    let (airfoil, mach) = resolve_polar_condition(&config, Some(Path::new("other.C81")), Some(0.6));
    assert_eq!(airfoil, PathBuf::from("other.C81"));
    assert_eq!(mach, 0.6);
}

// =============================================================================
// HISTORY COMMAND
// =============================================================================

#[test]
fn history_summarizes_trailing_window() {
    let case = Case::new();
    let file = case.path("r01forceHist.txt");
    std::fs::write(&file, "# iter CT\n1 0.010\n2 0.012\n3 0.014\n4 0.016\n").unwrap();

    let summary = history_summary(&file, 0.5).unwrap();
    assert_eq!(summary.samples, 4);
    assert_eq!(summary.first_iteration, 1.0);
    assert_eq!(summary.last_iteration, 4.0);
    assert_eq!(summary.final_ct, 0.016);
    assert_eq!(summary.window, 2);
    assert!((summary.trailing_mean_ct - 0.015).abs() < 1e-12);
    assert!((summary.trailing_variation - 0.002).abs() < 1e-12);

    cmd_history(&file, 0.5, false).unwrap();
}

#[test]
fn history_rejects_bad_fraction() {
    let case = Case::new();
    let file = case.path("r01forceHist.txt");
    std::fs::write(&file, "1 0.01\n").unwrap();
    let err = cmd_history(&file, 0.0, false).unwrap_err();
    assert!(matches!(err, PostError::InvalidParameter(_)));
}

// =============================================================================
// CURVES COMMAND
// =============================================================================

#[test]
fn curves_report_counts_and_ranges() {
    let case = Case::new();
    let file = case.path("lift.curve");
    std::fs::write(&file, "# Blade01\n0.1 1.0\n0.2 2.0\n# Blade02\n0.3 -1.0\n").unwrap();

    let summaries = curve_summaries(&file).unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].name, "Blade01");
    assert_eq!(summaries[0].points, 2);
    assert_eq!(summaries[0].x_range, Some((0.1, 0.2)));
    assert_eq!(summaries[0].y_range, Some((1.0, 2.0)));
    assert_eq!(summaries[1].name, "Blade02");
    assert_eq!(summaries[1].x_range, Some((0.3, 0.3)));

    cmd_curves(&file, false).unwrap();
}

#[test]
fn curves_reject_directories() {
    let case = Case::new();
    let err = cmd_curves(case.dir.path(), true).unwrap_err();
    assert!(matches!(err, PostError::IoError(_)));
}
