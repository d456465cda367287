//! # rotorpost-core
//!
//! Numeric post-processing for rotor-aerodynamics solver output.
//!
//! This crate reads the text files a rotor wake solver writes (sectional
//! load tables, force histories, curve files), reads C81 airfoil decks, and
//! re-evaluates rotor thrust with a nonlinear airfoil polar:
//!
//! ```text
//! C81 lookup -> alpha back-calculation -> sectional lift -> thrust, CT
//! ```
//!
//! ## Architectural Constraints
//!
//! - Pure: callers pass text in and receive values or text back; the app
//!   layer owns all file access
//! - Deterministic: identical input yields bit-identical output
//! - Never panics on malformed input; every failure is a `PostError`

// =============================================================================
// MODULES
// =============================================================================

pub mod atmosphere;
pub mod c81;
pub mod curve;
pub mod formats;
pub mod history;
pub mod inversion;
pub mod loads;
pub mod primitives;
pub mod thrust;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types
// =============================================================================

pub use types::{PostError, SectionResult};

// =============================================================================
// RE-EXPORTS: Pipeline
// =============================================================================

pub use atmosphere::Atmosphere;
pub use c81::{C81Table, CoeffTable};
pub use curve::{Curve, parse_curves, write_curves};
pub use history::{ForceHistory, HistorySample, HistorySummary};
pub use inversion::{LiftInversion, invert_curve};
pub use loads::{ColumnTable, RotorParams, SectionalLoads};
pub use thrust::{MachModel, ThrustReport, ThrustSettings, integrate_thrust};

// =============================================================================
// RE-EXPORTS: Formats
// =============================================================================

pub use formats::{format_sci, write_columns};
