//! # Curve Files
//!
//! VisIt `.curve` files: a `# name` line opens a curve and every following
//! `x y` line adds a point to it. Points before the first name line belong
//! to an unnamed curve.

use crate::PostError;
use crate::formats::format_sci;
use serde::Serialize;

/// Name given to points that precede any `# name` line.
const UNNAMED: &str = "curve";

/// A named x-y curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Curve {
    pub name: String,
    pub points: Vec<(f64, f64)>,
}

impl Curve {
    pub fn new(name: impl Into<String>, points: Vec<(f64, f64)>) -> Self {
        Self {
            name: name.into(),
            points,
        }
    }

    /// Smallest and largest x, if the curve has points.
    pub fn x_range(&self) -> Option<(f64, f64)> {
        range(self.points.iter().map(|p| p.0))
    }

    /// Smallest and largest y, if the curve has points.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        range(self.points.iter().map(|p| p.1))
    }
}

fn range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

/// Parse every curve in a `.curve` file.
pub fn parse_curves(text: &str) -> Result<Vec<Curve>, PostError> {
    let mut curves: Vec<Curve> = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(name) = trimmed.strip_prefix('#') {
            curves.push(Curve::new(name.trim(), Vec::new()));
            continue;
        }

        let mut fields = trimmed.split_whitespace().map(str::parse::<f64>);
        let point = match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(x)), Some(Ok(y)), None) => (x, y),
            _ => {
                return Err(PostError::parse(
                    idx + 1,
                    format!("expected an 'x y' pair, found '{}'", trimmed),
                ));
            }
        };

        match curves.last_mut() {
            Some(curve) => curve.points.push(point),
            None => curves.push(Curve::new(UNNAMED, vec![point])),
        }
    }

    Ok(curves)
}

/// Render curves in `.curve` format.
pub fn write_curves(curves: &[Curve]) -> String {
    let mut out = String::new();
    for curve in curves {
        out.push_str(&format!("# {}\n", curve.name));
        for &(x, y) in &curve.points {
            out.push_str(&format!("{} {}\n", format_sci(x), format_sci(y)));
        }
    }
    out
}
