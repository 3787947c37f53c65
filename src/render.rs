// Text rendering of report pages for the command-line tools
use comfy_table::{Cell, Table as ComfyTable, presets::UTF8_FULL};

use crate::engine::ReportResponse;

/// Render a page as a UTF-8 table followed by a paging footer
#[must_use]
pub fn table(response: &ReportResponse) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for row in &response.data {
        for column in row.columns() {
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }

    let meta = &response.meta;
    let footer = format!(
        "({} rows, page {} of {}, {} matching)",
        response.data.len(),
        meta.page,
        meta.total_pages.max(1),
        meta.total
    );
    if columns.is_empty() {
        return format!("{footer}\n");
    }

    let mut table = ComfyTable::new();
    table.load_preset(UTF8_FULL);

    // Add header
    table.set_header(columns.iter().map(|c| Cell::new(c)));

    // Add rows
    for row in &response.data {
        table.add_row(
            columns
                .iter()
                .map(|c| Cell::new(row.get(c).map(ToString::to_string).unwrap_or_default())),
        );
    }

    format!("{table}\n{footer}\n")
}
