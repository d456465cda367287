//! # C81 Airfoil Tables
//!
//! Reading, writing and interpolating C81-format airfoil performance tables.
//!
//! A C81 file holds three coefficient tables (lift, drag, moment), each
//! tabulated against angle of attack (rows, degrees) and Mach number
//! (columns). Layout:
//!
//! ```text
//! NAME (30 columns)             ML NL MD ND MM NM     <- six I2 counts
//!        M1     M2     M3  ...                        <- Mach header, 7-wide fields
//!  A1    C11    C12    C13 ...                        <- one row per alpha
//! ```
//!
//! At most nine values share a physical line; longer rows continue on lines
//! that start with seven blank columns. Rows that are not aligned to the
//! fixed grid are read by whitespace splitting instead.
//!
//! Lookups are bilinear in (alpha, Mach) and clamp to the table edges.

use crate::PostError;
use crate::primitives::{
    C81_COUNT_FIELDS, C81_COUNT_WIDTH, C81_FIELD_WIDTH, C81_NAME_WIDTH, C81_VALUES_PER_LINE,
};
use serde::Serialize;

// =============================================================================
// COEFFICIENT TABLE
// =============================================================================

/// One coefficient (CL, CD or CM) tabulated on an alpha x Mach grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoeffTable {
    mach: Vec<f64>,
    alpha: Vec<f64>,
    /// `values[i_alpha][i_mach]`
    values: Vec<Vec<f64>>,
}

impl CoeffTable {
    /// Build a table, validating axis ordering and grid dimensions.
    pub fn new(mach: Vec<f64>, alpha: Vec<f64>, values: Vec<Vec<f64>>) -> Result<Self, PostError> {
        check_axis("Mach", &mach)?;
        check_axis("alpha", &alpha)?;

        if values.len() != alpha.len() {
            return Err(PostError::InvalidTable(format!(
                "{} value rows for {} alpha stations",
                values.len(),
                alpha.len()
            )));
        }
        if let Some((i, row)) = values
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != mach.len())
        {
            return Err(PostError::InvalidTable(format!(
                "row {} has {} values, expected {}",
                i,
                row.len(),
                mach.len()
            )));
        }

        Ok(Self {
            mach,
            alpha,
            values,
        })
    }

    /// Mach numbers of the table columns.
    pub fn mach(&self) -> &[f64] {
        &self.mach
    }

    /// Angles of attack of the table rows, in degrees.
    pub fn alpha(&self) -> &[f64] {
        &self.alpha
    }

    /// Coefficient grid, indexed `[i_alpha][i_mach]`.
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// Bilinear interpolation at (alpha, Mach), clamped to the table edges.
    ///
    /// Returns NaN when either input is NaN.
    pub fn interpolate(&self, alpha_deg: f64, mach: f64) -> f64 {
        if alpha_deg.is_nan() || mach.is_nan() {
            return f64::NAN;
        }

        let (i0, i1, ta) = bracket(&self.alpha, alpha_deg);
        let (j0, j1, tm) = bracket(&self.mach, mach);

        let low = lerp(self.values[i0][j0], self.values[i0][j1], tm);
        let high = lerp(self.values[i1][j0], self.values[i1][j1], tm);
        lerp(low, high, ta)
    }

    /// The coefficient-vs-alpha curve interpolated to a fixed Mach number.
    pub fn curve_at_mach(&self, mach: f64) -> Vec<(f64, f64)> {
        let (j0, j1, tm) = bracket(&self.mach, mach);
        self.alpha
            .iter()
            .zip(&self.values)
            .map(|(&a, row)| (a, lerp(row[j0], row[j1], tm)))
            .collect()
    }
}

fn check_axis(label: &str, axis: &[f64]) -> Result<(), PostError> {
    if axis.is_empty() {
        return Err(PostError::InvalidTable(format!("empty {} axis", label)));
    }
    if axis.iter().any(|v| !v.is_finite()) {
        return Err(PostError::InvalidTable(format!(
            "non-finite value on {} axis",
            label
        )));
    }
    if axis.windows(2).any(|w| w[1] <= w[0]) {
        return Err(PostError::InvalidTable(format!(
            "{} axis is not strictly increasing",
            label
        )));
    }
    Ok(())
}

/// Locate `x` on a strictly increasing axis.
///
/// Returns `(lower, upper, weight)`; outside the axis both indices point at
/// the nearest end and the weight is zero.
fn bracket(axis: &[f64], x: f64) -> (usize, usize, f64) {
    let last = axis.len().saturating_sub(1);
    if last == 0 || x <= axis[0] {
        return (0, 0, 0.0);
    }
    if x >= axis[last] {
        return (last, last, 0.0);
    }

    let upper = axis.partition_point(|&a| a <= x).clamp(1, last);
    let lower = upper - 1;
    let weight = (x - axis[lower]) / (axis[upper] - axis[lower]);
    (lower, upper, weight)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

// =============================================================================
// C81 TABLE
// =============================================================================

/// A complete C81 airfoil deck.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct C81Table {
    /// Airfoil name from the header line.
    pub name: String,
    pub cl: CoeffTable,
    pub cd: CoeffTable,
    pub cm: CoeffTable,
}

impl C81Table {
    /// Parse a C81 file from text.
    pub fn parse(text: &str) -> Result<Self, PostError> {
        let mut cursor = LineCursor::new(text);

        let (line_no, header) = cursor
            .next_line()
            .ok_or_else(|| PostError::parse(1, "empty C81 file"))?;
        let (name, counts) = parse_header(header).map_err(|m| PostError::parse(line_no, m))?;

        let cl = parse_coeff_table(&mut cursor, counts[0], counts[1], "CL")?;
        let cd = parse_coeff_table(&mut cursor, counts[2], counts[3], "CD")?;
        let cm = parse_coeff_table(&mut cursor, counts[4], counts[5], "CM")?;

        Ok(Self { name, cl, cd, cm })
    }

    /// Lift coefficient at `alpha_deg` and `mach`.
    pub fn get_cl(&self, alpha_deg: f64, mach: f64) -> f64 {
        self.cl.interpolate(alpha_deg, mach)
    }

    /// Drag coefficient at `alpha_deg` and `mach`.
    pub fn get_cd(&self, alpha_deg: f64, mach: f64) -> f64 {
        self.cd.interpolate(alpha_deg, mach)
    }

    /// Pitching-moment coefficient at `alpha_deg` and `mach`.
    pub fn get_cm(&self, alpha_deg: f64, mach: f64) -> f64 {
        self.cm.interpolate(alpha_deg, mach)
    }

    /// Serialize back into fixed-width C81 text.
    pub fn to_c81_string(&self) -> String {
        let name: String = self.name.chars().take(C81_NAME_WIDTH).collect();
        let mut out = format!("{:<width$}", name, width = C81_NAME_WIDTH);
        for table in [&self.cl, &self.cd, &self.cm] {
            out.push_str(&format!(
                "{:>w$}{:>w$}",
                table.mach.len(),
                table.alpha.len(),
                w = C81_COUNT_WIDTH
            ));
        }
        out.push('\n');

        for table in [&self.cl, &self.cd, &self.cm] {
            write_row(&mut out, None, &table.mach);
            for (&alpha, row) in table.alpha.iter().zip(&table.values) {
                write_row(&mut out, Some(alpha), row);
            }
        }
        out
    }
}

fn parse_header(line: &str) -> Result<(String, [usize; C81_COUNT_FIELDS]), String> {
    let counts_end = C81_NAME_WIDTH + C81_COUNT_FIELDS * C81_COUNT_WIDTH;

    // Fixed-width layout first
    if line.is_ascii() && line.len() >= counts_end {
        let fixed: Option<Vec<usize>> = (0..C81_COUNT_FIELDS)
            .map(|i| {
                let start = C81_NAME_WIDTH + i * C81_COUNT_WIDTH;
                line[start..start + C81_COUNT_WIDTH].trim().parse().ok()
            })
            .collect();
        if let Some(fixed) = fixed {
            let name = line[..C81_NAME_WIDTH].trim().to_string();
            return finish_header(name, &fixed);
        }
    }

    // Whitespace fallback: the last six tokens are the counts
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < C81_COUNT_FIELDS {
        return Err(format!(
            "header needs {} table counts, found {} tokens",
            C81_COUNT_FIELDS,
            tokens.len()
        ));
    }
    let split = tokens.len() - C81_COUNT_FIELDS;
    let counts = tokens[split..]
        .iter()
        .map(|t| t.parse::<usize>().map_err(|_| format!("invalid table count '{}'", t)))
        .collect::<Result<Vec<_>, _>>()?;
    finish_header(tokens[..split].join(" "), &counts)
}

fn finish_header(name: String, counts: &[usize]) -> Result<(String, [usize; C81_COUNT_FIELDS]), String> {
    let mut out = [0usize; C81_COUNT_FIELDS];
    for (slot, &count) in out.iter_mut().zip(counts) {
        if count == 0 {
            return Err("table counts must be at least 1".to_string());
        }
        *slot = count;
    }
    Ok((name, out))
}

fn parse_coeff_table(
    cursor: &mut LineCursor<'_>,
    n_mach: usize,
    n_alpha: usize,
    label: &str,
) -> Result<CoeffTable, PostError> {
    let (_, mach) = read_row(cursor, n_mach, false, label)?;

    let mut alpha = Vec::with_capacity(n_alpha);
    let mut values = Vec::with_capacity(n_alpha);
    for _ in 0..n_alpha {
        let (a, row) = read_row(cursor, n_mach, true, label)?;
        alpha.push(a.unwrap_or_default());
        values.push(row);
    }

    CoeffTable::new(mach, alpha, values)
        .map_err(|e| PostError::InvalidTable(format!("{} table: {}", label, e)))
}

/// Read one logical row (possibly spanning continuation lines).
///
/// With `leading` set the first field of the first line is the row's alpha.
fn read_row(
    cursor: &mut LineCursor<'_>,
    count: usize,
    leading: bool,
    label: &str,
) -> Result<(Option<f64>, Vec<f64>), PostError> {
    let mut lead = None;
    let mut values = Vec::with_capacity(count);
    let mut first = true;

    while values.len() < count {
        let (line_no, line) = cursor.next_line().ok_or_else(|| {
            PostError::parse(
                cursor.line_count(),
                format!("unexpected end of file in {} table", label),
            )
        })?;

        let (row_lead, row_values) = split_fields(line, first && leading)
            .ok_or_else(|| PostError::parse(line_no, format!("malformed {} table row", label)))?;

        if first && leading {
            lead = Some(row_lead.ok_or_else(|| {
                PostError::parse(line_no, format!("{} row is missing its angle of attack", label))
            })?);
        }

        let remaining = count - values.len();
        if row_values.is_empty() || row_values.len() > remaining.min(C81_VALUES_PER_LINE) {
            return Err(PostError::parse(
                line_no,
                format!(
                    "{} table line has {} values, expected {}",
                    label,
                    row_values.len(),
                    remaining.min(C81_VALUES_PER_LINE)
                ),
            ));
        }
        values.extend(row_values);
        first = false;
    }

    Ok((lead, values))
}

/// Split a body line into its leading field and values.
///
/// A fixed-width split is only trusted when its leading column matches the
/// row kind; short whitespace rows like ` 0.0` would otherwise be misread.
fn split_fields(line: &str, leading: bool) -> Option<(Option<f64>, Vec<f64>)> {
    split_fixed(line)
        .filter(|(lead, _)| lead.is_some() == leading)
        .or_else(|| split_loose(line, leading))
}

fn split_fixed(line: &str) -> Option<(Option<f64>, Vec<f64>)> {
    if !line.is_ascii() {
        return None;
    }

    let lead_end = line.len().min(C81_FIELD_WIDTH);
    let lead = line[..lead_end].trim();
    let lead = if lead.is_empty() {
        None
    } else {
        Some(lead.parse().ok()?)
    };

    let mut values = Vec::new();
    let mut start = C81_FIELD_WIDTH;
    while start < line.len() {
        let end = (start + C81_FIELD_WIDTH).min(line.len());
        let field = line[start..end].trim();
        if !field.is_empty() {
            values.push(field.parse().ok()?);
        }
        start = end;
    }
    Some((lead, values))
}

fn split_loose(line: &str, leading: bool) -> Option<(Option<f64>, Vec<f64>)> {
    let mut numbers = line
        .split_whitespace()
        .map(|t| t.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?
        .into_iter();
    let lead = if leading { Some(numbers.next()?) } else { None };
    Some((lead, numbers.collect()))
}

fn write_row(out: &mut String, lead: Option<f64>, values: &[f64]) {
    for (i, chunk) in values.chunks(C81_VALUES_PER_LINE).enumerate() {
        match lead {
            Some(a) if i == 0 => out.push_str(&format_field(a)),
            _ => out.push_str(&" ".repeat(C81_FIELD_WIDTH)),
        }
        for &v in chunk {
            out.push_str(&format_field(v));
        }
        out.push('\n');
    }
}

/// Right-align a value in a C81 field, using as many decimals as fit.
fn format_field(value: f64) -> String {
    for decimals in (0..=4).rev() {
        let s = format!("{:.*}", decimals, value);
        if s.len() <= C81_FIELD_WIDTH {
            return format!("{:>w$}", s, w = C81_FIELD_WIDTH);
        }
    }
    format!("{:.0}", value)
}

// =============================================================================
// LINE CURSOR
// =============================================================================

/// Iterates non-blank lines, tracking 1-based line numbers.
struct LineCursor<'a> {
    lines: Vec<&'a str>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().collect(),
            pos: 0,
        }
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        while self.pos < self.lines.len() {
            let line = self.lines[self.pos].trim_end();
            self.pos += 1;
            if !line.trim().is_empty() {
                return Some((self.pos, line));
            }
        }
        None
    }

    fn line_count(&self) -> usize {
        self.lines.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
NACA0012 SAMPLE                3 3 2 2 2 2
         0.000  0.300  0.600
 -4.000-0.4400-0.4500-0.4800
  0.000 0.0000 0.0000 0.0000
  4.000 0.4400 0.4500 0.4800
         0.000  0.600
 -4.000 0.0100 0.0120
  4.000 0.0100 0.0120
         0.000  0.600
 -4.000 0.0010 0.0020
  4.000-0.0010-0.0020
";

    #[test]
    fn parses_header_and_tables() {
        let table = C81Table::parse(SAMPLE).expect("parse");
        assert_eq!(table.name, "NACA0012 SAMPLE");
        assert_eq!(table.cl.mach(), &[0.0, 0.3, 0.6]);
        assert_eq!(table.cl.alpha(), &[-4.0, 0.0, 4.0]);
        assert_eq!(table.cd.values()[1], vec![0.01, 0.012]);
        assert_eq!(table.cm.values()[1], vec![-0.001, -0.002]);
    }

    #[test]
    fn lookup_hits_grid_points() {
        let table = C81Table::parse(SAMPLE).expect("parse");
        assert!((table.get_cl(4.0, 0.3) - 0.45).abs() < 1e-12);
        assert!((table.get_cd(-4.0, 0.6) - 0.012).abs() < 1e-12);
    }

    #[test]
    fn lookup_is_bilinear_between_points() {
        let table = C81Table::parse(SAMPLE).expect("parse");
        // Halfway in alpha (0 -> 4) and Mach (0.3 -> 0.6)
        let expected = 0.5 * (0.0 + 0.5 * (0.45 + 0.48));
        assert!((table.get_cl(2.0, 0.45) - expected).abs() < 1e-12);
    }

    #[test]
    fn lookup_clamps_outside_table() {
        let table = C81Table::parse(SAMPLE).expect("parse");
        assert!((table.get_cl(20.0, 0.3) - 0.45).abs() < 1e-12);
        assert!((table.get_cl(-20.0, 0.9) + 0.48).abs() < 1e-12);
    }

    #[test]
    fn lookup_propagates_nan() {
        let table = C81Table::parse(SAMPLE).expect("parse");
        assert!(table.get_cl(f64::NAN, 0.3).is_nan());
    }

    #[test]
    fn whitespace_rows_are_accepted() {
        let text = "\
LOOSE                          2 2 1 1 1 1
 0.0 0.5
 -2.0 -0.2 -0.21
 2.0 0.2 0.21
 0.0
 0.0 0.01
 0.0
 0.0 0.0
";
        let table = C81Table::parse(text).expect("parse");
        assert!((table.get_cl(2.0, 0.5) - 0.21).abs() < 1e-12);
    }

    #[test]
    fn continuation_lines_for_wide_rows() {
        let mach: Vec<f64> = (0..11).map(|i| f64::from(i) * 0.05).collect();
        let row_a: Vec<f64> = mach.iter().map(|m| -0.2 - m).collect();
        let row_b: Vec<f64> = mach.iter().map(|m| 0.2 + m).collect();
        let cl = CoeffTable::new(mach, vec![-2.0, 2.0], vec![row_a, row_b]).expect("cl");
        let flat = CoeffTable::new(vec![0.0], vec![0.0], vec![vec![0.0]]).expect("flat");
        let table = C81Table {
            name: "WIDE".to_string(),
            cl,
            cd: flat.clone(),
            cm: flat,
        };

        let text = table.to_c81_string();
        // 11 Mach numbers wrap onto a continuation line
        assert!(text.lines().nth(2).is_some_and(|l| l.starts_with("       ")));

        let parsed = C81Table::parse(&text).expect("reparse");
        assert_eq!(parsed.cl.mach().len(), 11);
        assert!((parsed.get_cl(2.0, 0.5) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn truncated_file_is_rejected() {
        let truncated: String = SAMPLE.lines().take(4).collect::<Vec<_>>().join("\n");
        let err = C81Table::parse(&truncated).expect_err("truncated");
        assert!(matches!(err, PostError::Parse { .. }));
    }

    #[test]
    fn row_with_too_many_values_is_rejected() {
        let bad = SAMPLE.replace(
            "  0.000 0.0000 0.0000 0.0000",
            "  0.000 0.0000 0.0000 0.0000 0.0000",
        );
        let err = C81Table::parse(&bad).expect_err("wide row");
        assert!(matches!(err, PostError::Parse { line: 4, .. }));
    }

    #[test]
    fn descending_mach_axis_is_rejected() {
        let err = CoeffTable::new(vec![0.6, 0.3], vec![0.0], vec![vec![0.0, 0.0]])
            .expect_err("descending");
        assert!(matches!(err, PostError::InvalidTable(_)));
    }

    #[test]
    fn curve_at_mach_interpolates_columns() {
        let table = C81Table::parse(SAMPLE).expect("parse");
        let curve = table.cl.curve_at_mach(0.45);
        assert_eq!(curve.len(), 3);
        assert!((curve[2].1 - 0.465).abs() < 1e-12);
    }

    #[test]
    fn field_format_fits_width() {
        assert_eq!(format_field(-10.0), "-10.000");
        assert_eq!(format_field(0.5), " 0.5000");
    }
}
