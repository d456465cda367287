//! # Case Configuration
//!
//! Optional TOML case file (`rotorpost.toml` by default) holding the
//! settings that stay fixed across runs of one rotor case:
//!
//! ```toml
//! [airfoil]
//! path = "NACA5605_short.C81"
//!
//! [atmosphere]
//! density = "mars"        # "earth" or a value in kg/m^3
//!
//! [lift]
//! method = "linear"       # or "table"
//! cl_alpha = 6.283185307
//! alpha0_deg = -6.480218
//! mach = 0.5
//! abs_cl = true
//!
//! [output]
//! distribution = "loadVLM.dat"
//! ```
//!
//! Every key is optional; command-line flags take precedence.

use rotorpost_core::primitives::{
    DEFAULT_LOOKUP_MACH, DEFAULT_ZERO_LIFT_ALPHA_DEG, THIN_AIRFOIL_LIFT_SLOPE,
};
use rotorpost_core::{Atmosphere, PostError, RotorParams};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Case file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "rotorpost.toml";

// =============================================================================
// SECTIONS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseConfig {
    pub airfoil: AirfoilSection,
    pub atmosphere: AtmosphereSection,
    pub lift: LiftSection,
    pub output: OutputSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AirfoilSection {
    pub path: PathBuf,
}

impl Default for AirfoilSection {
    fn default() -> Self {
        Self {
            path: PathBuf::from("NACA5605_short.C81"),
        }
    }
}

/// Density given by name or value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DensitySpec {
    Value(f64),
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AtmosphereSection {
    pub density: DensitySpec,
}

impl Default for AtmosphereSection {
    fn default() -> Self {
        Self {
            density: DensitySpec::Named("mars".to_string()),
        }
    }
}

impl AtmosphereSection {
    pub fn atmosphere(&self) -> Result<Atmosphere, PostError> {
        match &self.density {
            DensitySpec::Named(name) => name.parse(),
            DensitySpec::Value(rho) => Atmosphere::custom(*rho),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InversionMethod {
    #[default]
    Linear,
    Table,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LiftSection {
    pub method: InversionMethod,
    /// Lift slope of the linear model, per radian.
    pub cl_alpha: f64,
    pub alpha0_deg: f64,
    /// Lookup Mach number (also the inversion Mach for `table`).
    pub mach: f64,
    /// When set, section Mach is computed from rotational speed instead.
    pub speed_of_sound: Option<f64>,
    pub abs_cl: bool,
}

impl Default for LiftSection {
    fn default() -> Self {
        Self {
            method: InversionMethod::Linear,
            cl_alpha: THIN_AIRFOIL_LIFT_SLOPE,
            alpha0_deg: DEFAULT_ZERO_LIFT_ALPHA_DEG,
            mach: DEFAULT_LOOKUP_MACH,
            speed_of_sound: None,
            abs_cl: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub distribution: PathBuf,
    pub curve: Option<PathBuf>,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            distribution: PathBuf::from("loadVLM.dat"),
            curve: None,
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl CaseConfig {
    /// Parse a case file from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, PostError> {
        toml::from_str(text).map_err(|e| PostError::ConfigError(e.to_string()))
    }

    /// Load the case file.
    ///
    /// An explicit path must exist. Without one, `rotorpost.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, PostError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                fallback
            }
        };

        tracing::info!("Loading case configuration from {:?}", path);
        let text = std::fs::read_to_string(&path).map_err(|e| {
            PostError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }
}

/// Parse solver run parameters from TOML text.
pub fn params_from_toml_str(text: &str) -> Result<RotorParams, PostError> {
    let params: RotorParams =
        toml::from_str(text).map_err(|e| PostError::ConfigError(e.to_string()))?;
    params.validate()?;
    Ok(params)
}
