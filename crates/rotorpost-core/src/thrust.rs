//! # Thrust Integration
//!
//! Re-evaluates a solver's sectional loads with a nonlinear airfoil deck.
//!
//! For each blade section:
//! 1. the solver CL is inverted to an effective angle of attack,
//! 2. the airfoil table gives the nonlinear CL at that angle,
//! 3. section lift is `CL * 0.5 * rho * A * V^2` with `V = r * omega`.
//!
//! Section lifts are summed over all blades into rotor thrust, then
//! nondimensionalized as `CT = T / (rho * pi R^2 * V_tip^2)`.

use crate::c81::C81Table;
use crate::inversion::LiftInversion;
use crate::loads::{RotorParams, SectionalLoads};
use crate::primitives::{DEFAULT_LOOKUP_MACH, MARS_DENSITY};
use crate::{PostError, SectionResult};
use serde::Serialize;

// =============================================================================
// SETTINGS
// =============================================================================

/// Mach number used for the airfoil lookup at each section.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum MachModel {
    /// One Mach number for every section.
    Fixed { mach: f64 },
    /// Section Mach from rotational speed over the speed of sound.
    Local { speed_of_sound: f64 },
}

impl MachModel {
    /// Mach number for a section moving at `speed`.
    pub fn mach_at(&self, speed: f64) -> f64 {
        match *self {
            Self::Fixed { mach } => mach,
            Self::Local { speed_of_sound } => speed.abs() / speed_of_sound,
        }
    }

    fn validate(&self) -> Result<(), PostError> {
        match *self {
            Self::Fixed { mach } if !mach.is_finite() || mach < 0.0 => Err(
                PostError::InvalidParameter(format!("Mach number must be non-negative, got {}", mach)),
            ),
            Self::Local { speed_of_sound } if !speed_of_sound.is_finite() || speed_of_sound <= 0.0 => {
                Err(PostError::InvalidParameter(format!(
                    "speed of sound must be positive, got {}",
                    speed_of_sound
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Default for MachModel {
    fn default() -> Self {
        Self::Fixed {
            mach: DEFAULT_LOOKUP_MACH,
        }
    }
}

/// Inputs of the thrust re-evaluation that are not part of the solver run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThrustSettings {
    /// Density of the target atmosphere, kg/m^3.
    pub density: f64,
    pub mach: MachModel,
    pub inversion: LiftInversion,
    /// Use |CL| of the solver output (the Mars rotor spins with negative lift sign).
    pub abs_cl: bool,
}

impl Default for ThrustSettings {
    fn default() -> Self {
        Self {
            density: MARS_DENSITY,
            mach: MachModel::default(),
            inversion: LiftInversion::default(),
            abs_cl: true,
        }
    }
}

impl ThrustSettings {
    pub fn validate(&self) -> Result<(), PostError> {
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(PostError::InvalidParameter(format!(
                "density must be positive, got {}",
                self.density
            )));
        }
        self.mach.validate()?;
        self.inversion.validate()
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Result of the thrust re-evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThrustReport {
    pub sections: Vec<SectionResult>,
    /// Total rotor thrust, N.
    pub thrust: f64,
    /// Thrust coefficient.
    pub ct: f64,
    pub alpha_min_deg: f64,
    pub alpha_max_deg: f64,
    pub tip_speed: f64,
    pub density: f64,
}

impl ThrustReport {
    /// Rows of `(r/R, alpha, lift per span)`, the spanwise distribution file layout.
    pub fn distribution_rows(&self) -> Vec<[f64; 3]> {
        self.sections
            .iter()
            .map(|s| [s.r_over_r, s.alpha_deg, s.lift_per_span])
            .collect()
    }
}

// =============================================================================
// INTEGRATION
// =============================================================================

/// Integrate sectional lift into rotor thrust and thrust coefficient.
pub fn integrate_thrust(
    loads: &SectionalLoads,
    params: &RotorParams,
    airfoil: &C81Table,
    settings: &ThrustSettings,
) -> Result<ThrustReport, PostError> {
    params.validate()?;
    settings.validate()?;
    loads.validate()?;

    let rho = settings.density;
    let mut sections = Vec::with_capacity(loads.len());

    for i in 0..loads.len() {
        let r = loads.span[i];
        let speed = r * params.omega;
        let solver_cl = if settings.abs_cl {
            loads.cl[i].abs()
        } else {
            loads.cl[i]
        };

        let alpha_deg = settings
            .inversion
            .alpha_deg(solver_cl, airfoil)
            .map_err(|e| match e {
                PostError::CoefficientOutOfRange { cl } => {
                    PostError::InversionFailed { section: i, cl }
                }
                other => other,
            })?;

        let mach = settings.mach.mach_at(speed);
        let cl = airfoil.get_cl(alpha_deg, mach);
        let lift = cl * (0.5 * rho * loads.area[i] * speed * speed);

        sections.push(SectionResult {
            r_over_r: r / params.radius,
            alpha_deg,
            solver_alpha_deg: loads.alpha[i],
            mach,
            cl,
            lift,
            lift_per_span: lift / loads.span_width(i),
        });
    }

    let thrust = f64::from(params.nb) * sections.iter().map(|s| s.lift).sum::<f64>();
    let tip_speed = params.tip_speed();
    let ct = thrust / (rho * params.disk_area() * tip_speed * tip_speed);

    let (alpha_min_deg, alpha_max_deg) = sections
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), s| {
            (lo.min(s.alpha_deg), hi.max(s.alpha_deg))
        });

    Ok(ThrustReport {
        sections,
        thrust,
        ct,
        alpha_min_deg,
        alpha_max_deg,
        tip_speed,
        density: rho,
    })
}
