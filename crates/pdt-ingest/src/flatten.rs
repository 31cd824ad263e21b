//! Text rendering of spreadsheets that do not follow the matrix layout.

use crate::table::CellTable;

/// A header line, then one line per row with `<header>: <value>` for each
/// non-empty cell, cells separated by two spaces. Blank rows are dropped.
pub fn flatten_table(table: &CellTable) -> String {
    let mut lines = Vec::with_capacity(table.rows.len() + 1);
    let header_line = table
        .headers
        .iter()
        .filter(|header| !header.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("  ");
    if !header_line.is_empty() {
        lines.push(header_line);
    }
    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .enumerate()
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(idx, cell)| match table.headers.get(idx).filter(|h| !h.is_empty()) {
                Some(header) => format!("{header}: {}", cell.to_text()),
                None => cell.to_text(),
            })
            .collect();
        if !cells.is_empty() {
            lines.push(cells.join("  "));
        }
    }
    lines.join("\n")
}
