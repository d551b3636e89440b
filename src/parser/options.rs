//! Parsing options and configuration.

use super::schema::TableLayout;

/// Options for reconstructing a report table.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Table geometry used to slice the text
    pub layout: TableLayout,

    /// Trailing lines to drop before slicing
    pub footer_lines: usize,

    /// NFKC-normalize each line before trimming
    pub normalize_unicode: bool,

    /// What to do with rows whose date does not exist
    pub calendar: CalendarMode,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of trailing footer lines to drop.
    pub fn with_footer_lines(mut self, lines: usize) -> Self {
        self.footer_lines = lines;
        self
    }

    /// Enable or disable Unicode normalization of lines.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Set calendar mode.
    pub fn with_calendar(mut self, mode: CalendarMode) -> Self {
        self.calendar = mode;
        self
    }

    /// Drop rows past the end of the month.
    pub fn drop_invalid_dates(self) -> Self {
        self.with_calendar(CalendarMode::DropInvalid)
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            layout: TableLayout::REPORT,
            footer_lines: 0,
            normalize_unicode: true,
            calendar: CalendarMode::Keep,
        }
    }
}

/// Handling of table rows whose synthesized date is not a real day.
///
/// The report always prints 31 rows, so short months carry trailing rows
/// such as 30 February.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarMode {
    /// Keep every row
    #[default]
    Keep,
    /// Discard rows whose date does not exist
    DropInvalid,
}
