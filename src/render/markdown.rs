//! Markdown table rendering.

use crate::model::{ClimateTable, OUTPUT_COLUMNS};

/// Render a table as a Markdown table.
///
/// Columns follow [`OUTPUT_COLUMNS`]; missing values are left blank.
pub fn to_markdown(table: &ClimateTable) -> String {
    let mut output = String::new();

    push_row(&mut output, OUTPUT_COLUMNS.iter().copied());
    output.push('|');
    for _ in OUTPUT_COLUMNS {
        output.push_str(" --- |");
    }
    output.push('\n');

    for record in &table.records {
        let cells = record.cells();
        push_row(&mut output, cells.iter().map(String::as_str));
    }

    output
}

fn push_row<'a>(output: &mut String, cells: impl Iterator<Item = &'a str>) {
    output.push('|');
    for cell in cells {
        output.push_str(&format!(" {} |", cell.replace('|', "\\|")));
    }
    output.push('\n');
}
