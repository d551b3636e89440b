//! Report table reconstruction.
//!
//! Text flows through three stages: [`slicer`] cuts the line sequence into
//! column slices by position, [`repair`] moves mis-split text between
//! neighbouring slices, and [`mapper`] types the result row by row.

pub mod mapper;
mod options;
pub mod repair;
mod report_parser;
pub mod schema;
pub mod slicer;

pub use mapper::map_records;
pub use options::{CalendarMode, ParseOptions};
pub use repair::{repair_grid, CellRepair, CellRule, RepairEvent, RepairReport};
pub use report_parser::ReportParser;
pub use schema::{ColumnKind, ColumnSpec, TableLayout, COLUMN_COUNT, ROW_COUNT};
pub use slicer::{slice_columns, slice_text, split_lines};
