//! Positional slicing of extracted text into column lists.
//!
//! The extracted page text lists the table column by column, one cell per
//! line. Slicing is pure index arithmetic on the line sequence and never
//! looks at cell content.

use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};
use crate::model::RawGrid;

use super::options::ParseOptions;
use super::schema::TableLayout;

/// Split extracted text into trimmed table lines.
///
/// Drops `options.footer_lines` trailing lines. Empty lines are kept since
/// an empty cell still occupies a line.
pub fn split_lines(text: &str, options: &ParseOptions) -> Vec<String> {
    let mut lines: Vec<&str> = text.lines().collect();
    let keep = lines.len().saturating_sub(options.footer_lines);
    lines.truncate(keep);

    lines
        .into_iter()
        .map(|line| {
            if options.normalize_unicode {
                line.nfkc().collect::<String>().trim().to_string()
            } else {
                line.trim().to_string()
            }
        })
        .collect()
}

/// Partition table lines into one slice per column.
///
/// The line count must match [`TableLayout::expected_lines`]; anything
/// else is reported rather than sliced.
pub fn slice_columns(lines: Vec<String>, layout: &TableLayout) -> Result<RawGrid> {
    let expected = layout.expected_lines();
    if layout.is_empty() || lines.len() != expected {
        log::debug!(
            "slicer: {} lines do not fit a {}x{} table",
            lines.len(),
            layout.columns,
            layout.rows
        );
        return Err(Error::SchemaMismatch {
            expected,
            found: lines.len(),
        });
    }

    let mut grid = RawGrid::new();
    let mut lines = lines.into_iter();
    let mut start = 0;
    for end in layout.slice_ends() {
        grid.push_column(lines.by_ref().take(end - start).collect());
        start = end;
    }

    log::debug!("slicer: column lengths {:?}", grid.row_counts());
    Ok(grid)
}

/// Split and slice extracted text in one step.
pub fn slice_text(text: &str, options: &ParseOptions) -> Result<RawGrid> {
    let lines = split_lines(text, options);
    slice_columns(lines, &options.layout)
}
