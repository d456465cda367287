//! # Column Data Files
//!
//! Whitespace-delimited numeric columns in `%.18e` notation, the layout
//! `numpy.savetxt` produces and the existing plot scripts read back.

/// Delimiter between columns.
pub const COLUMN_DELIMITER: &str = "  ";

/// Digits after the decimal point in scientific notation.
const MANTISSA_DIGITS: usize = 18;

/// Format a value as `d.ddd...e+XX` with at least two exponent digits.
pub fn format_sci(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let raw = format!("{:.*e}", MANTISSA_DIGITS, value);
    // Rust renders the exponent as `e3` / `e-3`
    match raw.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exp),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => raw,
    }
}

/// Render rows of values, one line per row.
pub fn write_columns<R: AsRef<[f64]>>(rows: &[R]) -> String {
    let mut out = String::new();
    for row in rows {
        let line: Vec<String> = row.as_ref().iter().map(|&v| format_sci(v)).collect();
        out.push_str(&line.join(COLUMN_DELIMITER));
        out.push('\n');
    }
    out
}
