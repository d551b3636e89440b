//! JSON rendering for reconstructed tables.

use crate::error::{Error, Result};
use crate::model::ClimateTable;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a table to JSON.
pub fn to_json(table: &ClimateTable, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(table),
        JsonFormat::Compact => serde_json::to_string(table),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
