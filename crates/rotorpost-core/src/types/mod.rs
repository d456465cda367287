//! # Core Type Definitions
//!
//! This module contains the types shared by every part of the post-processor:
//! - Error types (`PostError`)
//! - Blade-section result rows (`SectionResult`)
//!
//! Every other module returns `Result<T, PostError>`; nothing in the core
//! panics on malformed solver output.

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// SECTION RESULT
// =============================================================================

/// Per-section output of the thrust integration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionResult {
    /// Nondimensional radial station r/R.
    pub r_over_r: f64,
    /// Effective angle of attack recovered from the solver CL, in degrees.
    pub alpha_deg: f64,
    /// Angle of attack reported by the solver (induced-velocity estimate), in degrees.
    pub solver_alpha_deg: f64,
    /// Mach number used for the airfoil lookup.
    pub mach: f64,
    /// Nonlinear lift coefficient from the airfoil table.
    pub cl: f64,
    /// Section lift force.
    pub lift: f64,
    /// Lift per unit span (section lift divided by section width).
    pub lift_per_span: f64,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while reading or transforming solver output.
///
/// - No silent failures
/// - Use `Result<T, PostError>` for fallible operations
/// - Parse errors carry the 1-based line number of the offending input
#[derive(Debug, Error)]
pub enum PostError {
    /// A text input could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A required column is absent from a tabulated file.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A table is structurally invalid (axis ordering, dimensions, emptiness).
    #[error("Invalid table: {0}")]
    InvalidTable(String),

    /// A physical parameter is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A lift coefficient lies outside every segment of the inverted CL curve.
    #[error("Lift coefficient {cl} is outside the tabulated CL range")]
    CoefficientOutOfRange { cl: f64 },

    /// Alpha inversion failed for a specific blade section.
    #[error("Inversion failed at section {section}: lift coefficient {cl} is outside the tabulated CL range")]
    InversionFailed { section: usize, cl: f64 },

    /// A configuration file could not be interpreted.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl PostError {
    /// Shorthand for a parse error at a 1-based line.
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_reports_line() {
        let err = PostError::parse(12, "expected 9 values");
        assert_eq!(err.to_string(), "Parse error at line 12: expected 9 values");
    }

    #[test]
    fn inversion_error_names_section() {
        let err = PostError::InversionFailed {
            section: 4,
            cl: 2.5,
        };
        assert!(err.to_string().contains("section 4"));
    }
}
