//! Data model for reconstructed report tables.
//!
//! [`RawGrid`] is the untyped column-major buffer the parser slices and
//! repairs. [`ClimateTable`] is the typed row-major result handed back to
//! the caller.

mod grid;
mod period;
mod record;

pub use grid::RawGrid;
pub use period::ReportPeriod;
pub use record::{ClimateRecord, ClimateTable, RainType, OUTPUT_COLUMNS};
