//! Column-major buffer of raw cell text.

use serde::{Deserialize, Serialize};

/// Raw table cells, one list per column, top row first.
///
/// Column lengths may be uneven straight after slicing. The repair pass
/// moves text between neighbouring columns until each holds one cell per
/// row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGrid {
    columns: Vec<Vec<String>>,
}

impl RawGrid {
    /// Create an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a grid from column lists.
    pub fn from_columns(columns: Vec<Vec<String>>) -> Self {
        Self { columns }
    }

    /// Build a grid from row-major text, mostly useful in tests.
    pub fn from_rows<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut columns: Vec<Vec<String>> = Vec::new();
        for row in rows {
            for (i, cell) in row.into_iter().enumerate() {
                if columns.len() <= i {
                    columns.resize_with(i + 1, Vec::new);
                }
                columns[i].push(cell.into());
            }
        }
        Self { columns }
    }

    /// Append a column.
    pub fn push_column(&mut self, column: Vec<String>) {
        self.columns.push(column);
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get a column by index.
    pub fn column(&self, index: usize) -> Option<&[String]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    /// Get a mutable column by index.
    pub fn column_mut(&mut self, index: usize) -> Option<&mut Vec<String>> {
        self.columns.get_mut(index)
    }

    /// Number of cells in each column.
    pub fn row_counts(&self) -> Vec<usize> {
        self.columns.iter().map(Vec::len).collect()
    }

    /// Check whether every column holds exactly `rows` cells.
    pub fn is_rectangular(&self, rows: usize) -> bool {
        self.columns.iter().all(|c| c.len() == rows)
    }

    /// Get the cells of one row across all columns.
    ///
    /// Columns too short to reach the row are skipped.
    pub fn row(&self, index: usize) -> Vec<&str> {
        self.columns
            .iter()
            .filter_map(|c| c.get(index).map(String::as_str))
            .collect()
    }
}
