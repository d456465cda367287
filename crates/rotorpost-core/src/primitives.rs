//! # Primitives
//!
//! Fixed constants for file formats and aerodynamic defaults.
//!
//! ## Primitives
//!
//! 1. **C81 layout**: field widths of the fixed-format airfoil table.
//! 2. **Lift model**: thin-airfoil lift slope and the default zero-lift angle.
//! 3. **Flight condition**: default lookup Mach number and planetary densities.

use std::f64::consts::TAU;

// =============================================================================
// C81 LAYOUT
// =============================================================================

/// Width of the airfoil name field on the C81 header line.
pub const C81_NAME_WIDTH: usize = 30;

/// Width of each table-count field (`ML NL MD ND MM NM`) on the header line.
pub const C81_COUNT_WIDTH: usize = 2;

/// Number of count fields following the airfoil name.
pub const C81_COUNT_FIELDS: usize = 6;

/// Width of every numeric field in the table body.
pub const C81_FIELD_WIDTH: usize = 7;

/// Maximum number of coefficient values on one physical line.
///
/// Rows with more Mach numbers continue on lines that begin with
/// `C81_FIELD_WIDTH` blank columns.
pub const C81_VALUES_PER_LINE: usize = 9;

// =============================================================================
// LIFT MODEL
// =============================================================================

/// Thin-airfoil lift-curve slope, per radian.
pub const THIN_AIRFOIL_LIFT_SLOPE: f64 = TAU;

/// Zero-lift angle of attack of the cambered Mars rotor section, in degrees.
pub const DEFAULT_ZERO_LIFT_ALPHA_DEG: f64 = -6.480218;

// =============================================================================
// FLIGHT CONDITION
// =============================================================================

/// Mach number used for airfoil lookups when no Mach model is configured.
pub const DEFAULT_LOOKUP_MACH: f64 = 0.5;

/// Mean surface atmospheric density on Mars, kg/m^3.
pub const MARS_DENSITY: f64 = 0.022;

/// ISA sea-level air density on Earth, kg/m^3.
pub const EARTH_SEA_LEVEL_DENSITY: f64 = 1.225;

// =============================================================================
// HISTORY
// =============================================================================

/// Fraction of a force history treated as the converged trailing window.
pub const DEFAULT_TRAILING_FRACTION: f64 = 0.1;
