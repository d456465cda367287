//! # Sectional Loads
//!
//! Solver run parameters and the spanwise sectional-load table.
//!
//! Load tables are whitespace-delimited numeric columns. A `#` comment line
//! directly above the data names the columns:
//!
//! ```text
//! # secSpan secCL secArea secAlpha secChord
//!   0.12    0.41  0.0021  5.10     0.035
//! ```

use crate::PostError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

// =============================================================================
// ROTOR PARAMETERS
// =============================================================================

/// Rotor operating parameters of a solver run.
///
/// Field names accept the solver's own spelling (`Omega`, `nBlades`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotorParams {
    /// Rotational speed, rad/s.
    #[serde(alias = "Omega")]
    pub omega: f64,
    /// Fluid density used by the solver run, kg/m^3.
    #[serde(alias = "rho")]
    pub density: f64,
    /// Rotor radius, m.
    #[serde(alias = "Radius", alias = "R")]
    pub radius: f64,
    /// Number of blades.
    #[serde(alias = "nBlades", alias = "NB")]
    pub nb: u32,
}

impl RotorParams {
    /// Check that all parameters are physical.
    pub fn validate(&self) -> Result<(), PostError> {
        for (name, value) in [
            ("omega", self.omega),
            ("density", self.density),
            ("radius", self.radius),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PostError::InvalidParameter(format!(
                    "{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if self.nb == 0 {
            return Err(PostError::InvalidParameter(
                "blade count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Blade tip speed `R * omega`.
    pub fn tip_speed(&self) -> f64 {
        self.radius * self.omega
    }

    /// Rotor disk area `pi * R^2`.
    pub fn disk_area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

// =============================================================================
// COLUMN TABLE
// =============================================================================

/// A whitespace-delimited numeric table with optional column names.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnTable {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl ColumnTable {
    /// Parse a table; blank lines and `#` comments are skipped.
    ///
    /// The last comment line before the first data row supplies the column
    /// names. All data rows must have the same width.
    pub fn parse(text: &str) -> Result<Self, PostError> {
        let mut names = Vec::new();
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(comment) = trimmed.strip_prefix('#') {
                if rows.is_empty() {
                    names = comment.split_whitespace().map(str::to_string).collect();
                }
                continue;
            }

            let row = trimmed
                .split_whitespace()
                .map(|t| {
                    t.parse::<f64>()
                        .map_err(|_| PostError::parse(line_no, format!("invalid number '{}'", t)))
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(PostError::parse(
                        line_no,
                        format!("expected {} columns, found {}", first.len(), row.len()),
                    ));
                }
            }
            rows.push(row);
        }

        Ok(Self { names, rows })
    }

    /// Column names from the header comment (may be empty).
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column by position.
    pub fn column_at(&self, index: usize) -> Option<Vec<f64>> {
        self.rows.iter().map(|r| r.get(index).copied()).collect()
    }

    /// Column by header name, compared case-insensitively.
    pub fn column(&self, name: &str) -> Result<Vec<f64>, PostError> {
        let index = self
            .names
            .iter()
            .position(|n| n.eq_ignore_ascii_case(name))
            .ok_or_else(|| PostError::MissingColumn(name.to_string()))?;
        self.column_at(index)
            .ok_or_else(|| PostError::MissingColumn(name.to_string()))
    }
}

// =============================================================================
// SECTIONAL LOADS
// =============================================================================

/// Spanwise blade-section data from the solver.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionalLoads {
    /// Radial position of each section, m.
    pub span: Vec<f64>,
    /// Sectional lift coefficient reported by the solver.
    pub cl: Vec<f64>,
    /// Section planform area, m^2.
    pub area: Vec<f64>,
    /// Solver angle of attack, degrees.
    pub alpha: Vec<f64>,
    /// Section chord, m.
    pub chord: Vec<f64>,
}

impl SectionalLoads {
    /// Column names read from the load table, in field order.
    pub const COLUMNS: [&'static str; 5] = ["secSpan", "secCL", "secArea", "secAlpha", "secChord"];

    /// Parse a load table from text.
    pub fn parse(text: &str) -> Result<Self, PostError> {
        Self::from_table(&ColumnTable::parse(text)?)
    }

    /// Extract the sectional columns from a parsed table.
    pub fn from_table(table: &ColumnTable) -> Result<Self, PostError> {
        let [span, cl, area, alpha, chord] = Self::COLUMNS;
        let loads = Self {
            span: table.column(span)?,
            cl: table.column(cl)?,
            area: table.column(area)?,
            alpha: table.column(alpha)?,
            chord: table.column(chord)?,
        };
        loads.validate()?;
        Ok(loads)
    }

    /// Check that the table is non-empty, the columns have equal length and
    /// every chord is positive.
    pub fn validate(&self) -> Result<(), PostError> {
        if self.span.is_empty() {
            return Err(PostError::InvalidTable(
                "sectional load table has no sections".to_string(),
            ));
        }
        let [_, cl, area, alpha, chord] = Self::COLUMNS;
        for (name, column) in [
            (cl, &self.cl),
            (area, &self.area),
            (alpha, &self.alpha),
            (chord, &self.chord),
        ] {
            if column.len() != self.span.len() {
                return Err(PostError::InvalidTable(format!(
                    "column {} has {} values, expected {}",
                    name,
                    column.len(),
                    self.span.len()
                )));
            }
        }
        if let Some(i) = self.chord.iter().position(|&c| c.is_nan() || c <= 0.0) {
            return Err(PostError::InvalidTable(format!(
                "section {} has non-positive chord {}",
                i, self.chord[i]
            )));
        }
        Ok(())
    }

    /// Number of blade sections.
    pub fn len(&self) -> usize {
        self.span.len()
    }

    /// True when there are no sections.
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    /// Spanwise width of section `i` (area over chord).
    pub fn span_width(&self, i: usize) -> f64 {
        self.area[i] / self.chord[i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOADS: &str = "\
# Sectional loads, blade 01
# secSpan secCL secArea secAlpha secChord
0.10  0.40  0.0020  4.0  0.020
0.20 -0.50  0.0040  5.0  0.020

0.30  0.60  0.0040  6.0  0.020
";

    #[test]
    fn header_names_columns() {
        let table = ColumnTable::parse(LOADS).expect("parse");
        assert_eq!(table.len(), 3);
        assert_eq!(table.names()[1], "secCL");
        assert_eq!(table.column("SECALPHA").expect("col"), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn ragged_row_is_rejected() {
        let err = ColumnTable::parse("# a b\n1 2\n3\n").expect_err("ragged");
        assert!(matches!(err, PostError::Parse { line: 3, .. }));
    }

    #[test]
    fn missing_column_is_named() {
        let err = SectionalLoads::parse("# secSpan secCL\n0.1 0.2\n").expect_err("missing");
        assert!(matches!(err, PostError::MissingColumn(c) if c == "secArea"));
    }

    #[test]
    fn span_width_is_area_over_chord() {
        let loads = SectionalLoads::parse(LOADS).expect("loads");
        assert!((loads.span_width(1) - 0.2).abs() < 1e-12);
    }

    #[test]
    fn empty_table_is_rejected() {
        let err = SectionalLoads::parse("# secSpan secCL secArea secAlpha secChord\n")
            .expect_err("empty");
        assert!(matches!(err, PostError::InvalidTable(_)));
    }

    #[test]
    fn unequal_columns_are_rejected() {
        let loads = SectionalLoads {
            span: vec![0.3, 0.6],
            cl: vec![0.4],
            area: vec![0.01, 0.01],
            alpha: vec![3.0, 3.0],
            chord: vec![0.05, 0.05],
        };
        let err = loads.validate().expect_err("ragged");
        assert!(matches!(err, PostError::InvalidTable(m) if m.contains("secCL")));
    }

    #[test]
    fn zero_chord_is_rejected() {
        let loads = SectionalLoads {
            span: vec![0.5],
            cl: vec![0.4],
            area: vec![0.01],
            alpha: vec![3.0],
            chord: vec![0.0],
        };
        assert!(matches!(loads.validate(), Err(PostError::InvalidTable(_))));
    }

    #[test]
    fn params_validate_and_derive() {
        let params = RotorParams {
            omega: 100.0,
            density: 1.2,
            radius: 0.5,
            nb: 2,
        };
        params.validate().expect("valid");
        assert!((params.tip_speed() - 50.0).abs() < 1e-12);
        assert!((params.disk_area() - PI * 0.25).abs() < 1e-12);

        let stopped = RotorParams { omega: 0.0, ..params };
        assert!(stopped.validate().is_err());
    }
}
