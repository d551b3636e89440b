//! # climat
//!
//! Reconstruction of daily climate tables from text extracted out of
//! fixed-layout monthly climate reports.
//!
//! The report prints one 12-column by 31-row table. Text extraction lists
//! it column by column, but cell boundaries are unreliable: neighbouring
//! values run together, a typographic minus sign replaces `-`, and code
//! columns overflow their width. This crate slices the text by position,
//! repairs the mis-split cells and returns typed records.
//!
//! ## Quick Start
//!
//! ```no_run
//! use climat::{parse_file, render, ReportPeriod};
//!
//! fn main() -> climat::Result<()> {
//!     let period = ReportPeriod::new(2021, 3)?;
//!     let table = parse_file("climat-2021-03.txt", period)?;
//!
//!     println!("{}", render::to_markdown(&table));
//!     Ok(())
//! }
//! ```
//!
//! Downloading and text-extracting the report are left to the caller, as
//! is persisting the result.

pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{ClimateRecord, ClimateTable, RainType, RawGrid, ReportPeriod, OUTPUT_COLUMNS};
pub use parser::{
    CalendarMode, CellRule, ColumnKind, ColumnSpec, ParseOptions, RepairEvent, RepairReport,
    ReportParser, TableLayout,
};
pub use render::JsonFormat;

use std::io::Read;
use std::path::Path;

/// Reconstruct a report table from extracted text.
///
/// # Arguments
///
/// * `text` - Extracted table text, footer already removed
/// * `period` - Month the report covers
///
/// # Example
///
/// ```no_run
/// use climat::{parse_str, ReportPeriod};
///
/// let text = std::fs::read_to_string("climat-2021-03.txt").unwrap();
/// let table = parse_str(&text, ReportPeriod::new(2021, 3).unwrap()).unwrap();
/// println!("Days: {}", table.len());
/// ```
pub fn parse_str(text: &str, period: ReportPeriod) -> Result<ClimateTable> {
    ReportParser::new().parse(text, period)
}

/// Reconstruct a report table with custom options.
///
/// # Example
///
/// ```no_run
/// use climat::{parse_str_with_options, ParseOptions, ReportPeriod};
///
/// let options = ParseOptions::new()
///     .with_footer_lines(climat::parser::schema::REPORT_FOOTER_LINES)
///     .drop_invalid_dates();
/// let text = std::fs::read_to_string("page.txt").unwrap();
/// let table = parse_str_with_options(&text, ReportPeriod::new(2021, 2).unwrap(), options).unwrap();
/// ```
pub fn parse_str_with_options(
    text: &str,
    period: ReportPeriod,
    options: ParseOptions,
) -> Result<ClimateTable> {
    ReportParser::with_options(options).parse(text, period)
}

/// Reconstruct a report table from a text file.
pub fn parse_file<P: AsRef<Path>>(path: P, period: ReportPeriod) -> Result<ClimateTable> {
    ReportParser::new().parse_file(path, period)
}

/// Reconstruct a report table from a text file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(
    path: P,
    period: ReportPeriod,
    options: ParseOptions,
) -> Result<ClimateTable> {
    ReportParser::with_options(options).parse_file(path, period)
}

/// Reconstruct a report table from a reader.
///
/// # Example
///
/// ```no_run
/// use climat::{parse_reader, ReportPeriod};
///
/// let stdin = std::io::stdin();
/// let table = parse_reader(stdin.lock(), ReportPeriod::new(2020, 12).unwrap()).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R, period: ReportPeriod) -> Result<ClimateTable> {
    ReportParser::new().parse_reader(reader, period)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_str_count_mismatch() {
        let period = ReportPeriod::new(2020, 1).unwrap();
        let result = parse_str("1\n2", period);
        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn test_parse_file_missing() {
        let period = ReportPeriod::new(2020, 1).unwrap();
        let result = parse_file("/nonexistent/climat.txt", period);
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_parse_reader_empty() {
        let period = ReportPeriod::new(2020, 1).unwrap();
        let result = parse_reader(std::io::empty(), period);
        assert!(matches!(
            result,
            Err(Error::SchemaMismatch { found: 0, .. })
        ));
    }
}
