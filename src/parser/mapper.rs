//! Conversion of a repaired grid into typed records.

use crate::error::{Error, Result};
use crate::model::{ClimateRecord, ClimateTable, RainType, RawGrid, ReportPeriod};

use super::options::{CalendarMode, ParseOptions};
use super::schema::{COLUMN_COUNT, COLUMN_NAMES};

/// Transpose a repaired grid into one record per row.
///
/// The grid must hold exactly one column per field and `layout.rows` cells
/// in every column. The first cell that fails to convert aborts the whole
/// table.
pub fn map_records(
    grid: &RawGrid,
    period: ReportPeriod,
    options: &ParseOptions,
) -> Result<ClimateTable> {
    if grid.column_count() != COLUMN_COUNT {
        return Err(Error::ColumnCount {
            expected: COLUMN_COUNT,
            found: grid.column_count(),
        });
    }

    let rows = options.layout.rows;
    for (column, found) in grid.row_counts().into_iter().enumerate() {
        if found != rows {
            return Err(Error::IncompleteColumn {
                column,
                expected: rows,
                found,
            });
        }
    }

    let records = (0..rows)
        .map(|row| map_row(&grid.row(row), row + 1, period))
        .collect::<Result<Vec<_>>>()?;

    let mut table = ClimateTable::new(period, records);
    if options.calendar == CalendarMode::DropInvalid {
        let before = table.len();
        table.retain_valid_dates();
        log::debug!(
            "mapper: dropped {} rows past the end of {}",
            before - table.len(),
            period
        );
    }

    Ok(table)
}

fn map_row(cells: &[&str], row: usize, period: ReportPeriod) -> Result<ClimateRecord> {
    let field = RowFields { cells, row };
    let day = field.day()?;

    Ok(ClimateRecord {
        date: period.date_string(day),
        day,
        avg_temperature: field.number(1)?,
        max_temperature: field.number(2)?,
        min_temperature: field.number(3)?,
        rain: field.number(4)?,
        rain_type: field.rain_type(5)?,
        snow_depth: field.code(6),
        snow_type: field.code(7),
        sun_hours: field.number(8)?,
        avg_wind: field.number(9)?,
        max_wind: field.number(10)?,
        gust: field.number(11)?,
    })
}

/// Cells of one row with the row number for error reporting.
struct RowFields<'a> {
    cells: &'a [&'a str],
    row: usize,
}

impl RowFields<'_> {
    fn text(&self, column: usize) -> &str {
        self.cells.get(column).map_or("", |c| c.trim())
    }

    fn error(&self, column: usize) -> Error {
        Error::Coercion {
            field: COLUMN_NAMES[column],
            row: self.row,
            value: self.text(column).to_string(),
        }
    }

    fn day(&self) -> Result<u32> {
        self.text(0).parse().map_err(|_| self.error(0))
    }

    fn number(&self, column: usize) -> Result<Option<f64>> {
        let text = self.text(column);
        if text.is_empty() {
            return Ok(None);
        }
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(self.error(column)),
        }
    }

    fn rain_type(&self, column: usize) -> Result<Option<RainType>> {
        let text = self.text(column);
        if text.is_empty() {
            return Ok(None);
        }
        RainType::from_code(text)
            .map(Some)
            .ok_or_else(|| self.error(column))
    }

    fn code(&self, column: usize) -> Option<String> {
        let text = self.text(column);
        (!text.is_empty()).then(|| text.to_string())
    }
}
