//! The fixed table layout of the monthly climate report.
//!
//! The report page carries one 12-column by 31-row table. Columns are
//! addressed by index; each index has a kind that decides which cell
//! repairs apply to it.

/// Number of columns in the report table.
pub const COLUMN_COUNT: usize = 12;

/// Number of day rows in the report table, regardless of month length.
pub const ROW_COUNT: usize = 31;

/// Trailing lines the report page carries below the table.
pub const REPORT_FOOTER_LINES: usize = 27;

/// Header of the report table, one name per column.
pub const COLUMN_NAMES: [&str; COLUMN_COUNT] = [
    "day",
    "avg temperature",
    "max temp",
    "min temp",
    "rain",
    "rain type",
    "snow depth",
    "snow type",
    "sun hours",
    "avg wind",
    "max wind",
    "gust",
];

/// Rain-type codes accepted in the rain type column.
pub const RAIN_TYPE_CODES: [&str; 3] = ["sn", "sl", "ri"];

/// Content class of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer day of month
    Day,
    /// Decimal or integer measurement
    Numeric,
    /// One of [`RAIN_TYPE_CODES`], or empty
    RainType,
    /// Free code capped at the given number of characters
    Code(usize),
}

/// A column of the report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Zero-based column index
    pub index: usize,
    /// Header name
    pub name: &'static str,
    /// Content class
    pub kind: ColumnKind,
}

impl ColumnSpec {
    /// Get the spec of the column at `index`.
    ///
    /// Returns `None` past the last column.
    pub fn at(index: usize) -> Option<Self> {
        let name = *COLUMN_NAMES.get(index)?;
        let kind = match index {
            0 => ColumnKind::Day,
            5 => ColumnKind::RainType,
            6 => ColumnKind::Code(2),
            7 => ColumnKind::Code(1),
            _ => ColumnKind::Numeric,
        };
        Some(Self { index, name, kind })
    }
}

/// Row/column geometry used to slice the extracted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// Number of columns
    pub columns: usize,
    /// Number of rows
    pub rows: usize,
}

impl TableLayout {
    /// The layout of the monthly climate report.
    pub const REPORT: TableLayout = TableLayout {
        columns: COLUMN_COUNT,
        rows: ROW_COUNT,
    };

    /// Exclusive end index of each column slice in the line sequence.
    ///
    /// The first slice owns `rows` lines and every later one `rows - 1`,
    /// because adjacent columns share the line that holds the last value
    /// of one and the first value of the next.
    pub fn slice_ends(&self) -> Vec<usize> {
        let shared = self.rows.saturating_sub(1);
        (0..self.columns).map(|i| self.rows + shared * i).collect()
    }

    /// Number of extracted lines the table occupies.
    pub fn expected_lines(&self) -> usize {
        if self.columns == 0 || self.rows == 0 {
            return 0;
        }
        self.rows + (self.rows - 1) * (self.columns - 1)
    }

    /// Check whether the layout describes a table with cells.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

impl Default for TableLayout {
    fn default() -> Self {
        Self::REPORT
    }
}
