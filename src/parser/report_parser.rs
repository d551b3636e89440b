//! Report parser: slice, repair, map.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::model::{ClimateTable, RawGrid, ReportPeriod};

use super::mapper::map_records;
use super::options::ParseOptions;
use super::repair::{repair_grid, RepairReport};
use super::slicer::slice_text;

/// Reconstructs report tables from extracted page text.
///
/// Holds no state between reports, so one parser can be shared across
/// threads and reused for any number of (month, year) units.
#[derive(Debug, Clone, Default)]
pub struct ReportParser {
    options: ParseOptions,
}

impl ReportParser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Slice and repair text without typing it.
    ///
    /// Useful for inspecting what the repair pass did.
    pub fn repair(&self, text: &str) -> Result<(RawGrid, RepairReport)> {
        let mut grid = slice_text(text, &self.options)?;
        let report = repair_grid(&mut grid);
        Ok((grid, report))
    }

    /// Reconstruct the table of one report.
    pub fn parse(&self, text: &str, period: ReportPeriod) -> Result<ClimateTable> {
        let (grid, report) = self.repair(text)?;
        log::debug!(
            "{}: {} repairs, {} fragments dropped",
            period,
            report.events.len(),
            report.dropped.len()
        );
        map_records(&grid, period, &self.options)
    }

    /// Reconstruct the table from a text file.
    pub fn parse_file<P: AsRef<Path>>(&self, path: P, period: ReportPeriod) -> Result<ClimateTable> {
        let text = fs::read_to_string(path)?;
        self.parse(&text, period)
    }

    /// Reconstruct the table from a reader.
    pub fn parse_reader<R: Read>(&self, mut reader: R, period: ReportPeriod) -> Result<ClimateTable> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.parse(&text, period)
    }
}
