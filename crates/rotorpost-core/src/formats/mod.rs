//! # Formats Module
//!
//! Text output formats for generated data files.
//!
//! Parsing of solver formats lives next to the data it produces
//! (`c81`, `loads`, `history`, `curve`); this module only renders.

pub mod columns;

pub use columns::{COLUMN_DELIMITER, format_sci, write_columns};
