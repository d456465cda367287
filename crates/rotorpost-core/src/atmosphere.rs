//! Named operating atmospheres.

use crate::PostError;
use crate::primitives::{EARTH_SEA_LEVEL_DENSITY, MARS_DENSITY};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Fluid density for the thrust estimate, by planet or explicit value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Atmosphere {
    #[default]
    Mars,
    Earth,
    Custom(f64),
}

impl Atmosphere {
    /// Density in kg/m^3.
    pub fn density(&self) -> f64 {
        match *self {
            Self::Mars => MARS_DENSITY,
            Self::Earth => EARTH_SEA_LEVEL_DENSITY,
            Self::Custom(rho) => rho,
        }
    }

    /// An explicit density, which must be positive.
    pub fn custom(rho: f64) -> Result<Self, PostError> {
        if !rho.is_finite() || rho <= 0.0 {
            return Err(PostError::InvalidParameter(format!(
                "density must be positive, got {}",
                rho
            )));
        }
        Ok(Self::Custom(rho))
    }
}

impl FromStr for Atmosphere {
    type Err = PostError;

    /// Accepts `mars`, `earth` or a positive density value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mars" => Ok(Self::Mars),
            "earth" | "sea-level" | "sea_level" => Ok(Self::Earth),
            other => {
                let rho: f64 = other.parse().map_err(|_| {
                    PostError::InvalidParameter(format!("unknown atmosphere '{}'", s))
                })?;
                Self::custom(rho)
            }
        }
    }
}

impl fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mars => write!(f, "Mars ({} kg/m^3)", MARS_DENSITY),
            Self::Earth => write!(f, "Earth sea level ({} kg/m^3)", EARTH_SEA_LEVEL_DENSITY),
            Self::Custom(rho) => write!(f, "{} kg/m^3", rho),
        }
    }
}
