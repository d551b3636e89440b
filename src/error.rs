//! Error types for the climat library.

use std::io;
use thiserror::Error;

/// Result type alias for climat operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing a report table.
///
/// Cell-level repairs never surface here. Only schema-level and
/// coercion-level problems reach the caller, once per report.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading the extracted text.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The extracted text does not have the line count the layout expects.
    #[error("Schema mismatch: expected {expected} table lines, found {found}")]
    SchemaMismatch {
        /// Line count implied by the table layout
        expected: usize,
        /// Line count actually present after footer removal
        found: usize,
    },

    /// The grid does not have one column per table field.
    #[error("Expected {expected} columns, found {found}")]
    ColumnCount {
        /// Columns in the report table
        expected: usize,
        /// Columns in the grid
        found: usize,
    },

    /// A column still has the wrong number of cells after repair.
    #[error("Column {column} has {found} cells after repair (expected {expected})")]
    IncompleteColumn {
        /// Zero-based column index
        column: usize,
        /// Rows the layout requires
        expected: usize,
        /// Cells actually present
        found: usize,
    },

    /// A cell could not be converted to its field type.
    #[error("Cannot convert {value:?} in row {row} to {field}")]
    Coercion {
        /// Header name of the offending field
        field: &'static str,
        /// One-based row number in the table
        row: usize,
        /// Cell text after repair
        value: String,
    },

    /// The supplied month or year is out of range.
    #[error("Invalid report period: {0}")]
    InvalidPeriod(String),

    /// Error during rendering (JSON, Markdown).
    #[error("Rendering error: {0}")]
    Render(String),
}
