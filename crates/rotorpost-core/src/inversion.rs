//! # Alpha Back-Calculation
//!
//! Recovers an effective angle of attack from a sectional lift coefficient.
//!
//! - `Linear`: inverts a straight lift line `CL = cl_alpha * (alpha - alpha0)`.
//! - `Table`: inverts the airfoil's tabulated CL curve at a fixed Mach number.

use crate::c81::C81Table;
use crate::PostError;
use crate::primitives::{DEFAULT_LOOKUP_MACH, DEFAULT_ZERO_LIFT_ALPHA_DEG, THIN_AIRFOIL_LIFT_SLOPE};
use serde::Serialize;

/// How a lift coefficient is mapped back to an angle of attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum LiftInversion {
    /// Linear lift curve with slope `cl_alpha` (per radian) through `alpha0_deg`.
    Linear { cl_alpha: f64, alpha0_deg: f64 },
    /// Tabulated CL curve of the airfoil deck at a fixed Mach number.
    Table { mach: f64 },
}

impl Default for LiftInversion {
    fn default() -> Self {
        Self::Linear {
            cl_alpha: THIN_AIRFOIL_LIFT_SLOPE,
            alpha0_deg: DEFAULT_ZERO_LIFT_ALPHA_DEG,
        }
    }
}

impl LiftInversion {
    /// Table inversion at the default lookup Mach number.
    pub fn table() -> Self {
        Self::Table {
            mach: DEFAULT_LOOKUP_MACH,
        }
    }

    /// Check the model parameters.
    pub fn validate(&self) -> Result<(), PostError> {
        match *self {
            Self::Linear {
                cl_alpha,
                alpha0_deg,
            } => {
                if !cl_alpha.is_finite() || cl_alpha == 0.0 {
                    return Err(PostError::InvalidParameter(format!(
                        "lift slope must be finite and non-zero, got {}",
                        cl_alpha
                    )));
                }
                if !alpha0_deg.is_finite() {
                    return Err(PostError::InvalidParameter(
                        "zero-lift angle must be finite".to_string(),
                    ));
                }
            }
            Self::Table { mach } => {
                if !mach.is_finite() || mach < 0.0 {
                    return Err(PostError::InvalidParameter(format!(
                        "inversion Mach number must be non-negative, got {}",
                        mach
                    )));
                }
            }
        }
        Ok(())
    }

    /// Angle of attack (degrees) producing lift coefficient `cl`.
    pub fn alpha_deg(&self, cl: f64, airfoil: &C81Table) -> Result<f64, PostError> {
        match *self {
            Self::Linear {
                cl_alpha,
                alpha0_deg,
            } => Ok((cl / cl_alpha + alpha0_deg.to_radians()).to_degrees()),
            Self::Table { mach } => invert_curve(&airfoil.cl.curve_at_mach(mach), cl)
                .ok_or(PostError::CoefficientOutOfRange { cl }),
        }
    }
}

/// Invert a piecewise-linear `(alpha, coefficient)` curve.
///
/// Every segment bracketing `target` yields a candidate; the candidate with
/// the smallest |alpha| wins, which keeps the result on the attached-flow
/// branch when the curve folds back past stall.
pub fn invert_curve(curve: &[(f64, f64)], target: f64) -> Option<f64> {
    if target.is_nan() {
        return None;
    }
    if let [(alpha, value)] = curve {
        return (*value == target).then_some(*alpha);
    }

    let mut best: Option<f64> = None;
    for w in curve.windows(2) {
        let (a0, c0) = w[0];
        let (a1, c1) = w[1];
        let (lo, hi) = if c0 <= c1 { (c0, c1) } else { (c1, c0) };
        if target < lo || target > hi {
            continue;
        }

        let alpha = if (c1 - c0).abs() < f64::EPSILON {
            // Every alpha of a flat segment matches; take the one nearest zero.
            0.0_f64.max(a0.min(a1)).min(a0.max(a1))
        } else {
            a0 + (target - c0) * (a1 - a0) / (c1 - c0)
        };
        if best.is_none_or(|b| alpha.abs() < b.abs()) {
            best = Some(alpha);
        }
    }
    best
}
