//! Raw spreadsheet rows.

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

/// One spreadsheet cell. Workbook readers hand out numbers for date cells
/// (Excel serials); CSV exports hand out text.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixCell {
    Number(f64),
    Text(String),
    Empty,
}

impl MatrixCell {
    /// Cell from exported text: blank is empty, anything else stays text.
    pub fn from_text(raw: &str) -> Self {
        let value = normalize_cell(raw);
        if value.is_empty() {
            MatrixCell::Empty
        } else {
            MatrixCell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            MatrixCell::Empty => true,
            MatrixCell::Text(value) => value.trim().is_empty(),
            MatrixCell::Number(_) => false,
        }
    }

    /// Text rendering; whole numbers lose their fraction.
    pub fn to_text(&self) -> String {
        match self {
            MatrixCell::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                format!("{}", *value as i64)
            }
            MatrixCell::Number(value) => value.to_string(),
            MatrixCell::Text(value) => value.trim().to_string(),
            MatrixCell::Empty => String::new(),
        }
    }
}

impl From<&str> for MatrixCell {
    fn from(value: &str) -> Self {
        MatrixCell::from_text(value)
    }
}

impl From<f64> for MatrixCell {
    fn from(value: f64) -> Self {
        MatrixCell::Number(value)
    }
}

/// First sheet of a workbook: header row plus data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<MatrixCell>>,
}

impl CellTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<MatrixCell>>) -> Self {
        let headers = headers.iter().map(|h| normalize_header(h)).collect();
        Self { headers, rows }
    }

    pub fn cell(&self, row: usize, column: usize) -> &MatrixCell {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .unwrap_or(&MatrixCell::Empty)
    }
}

pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV export. The first non-blank record is the header row; blank
/// records are dropped and short records padded.
pub fn read_cell_table<R: Read>(reader: R) -> Result<CellTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(String::is_empty) {
            continue;
        }
        records.push(row);
    }

    let mut records = records.into_iter();
    let Some(headers) = records.next() else {
        return Ok(CellTable::default());
    };
    let width = headers.len();
    let rows = records
        .map(|record| {
            (0..width)
                .map(|idx| record.get(idx).map_or(MatrixCell::Empty, |v| MatrixCell::from_text(v)))
                .collect()
        })
        .collect();
    Ok(CellTable::new(headers, rows))
}

pub fn read_cell_table_path(path: &Path) -> Result<CellTable> {
    let file = std::fs::File::open(path)?;
    read_cell_table(file).map_err(|err| match err {
        IngestError::CsvStream(source) => IngestError::Csv {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_headers_and_pads_rows() {
        let csv = "\u{feff}Date ,  Type  (x)\n\n11/11/2024\n12/11/2024,Off\n";
        let table = read_cell_table(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, ["Date", "Type (x)"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], MatrixCell::Empty);
        assert_eq!(table.cell(1, 1).to_text(), "Off");
        assert_eq!(table.cell(9, 9), &MatrixCell::Empty);
    }

    #[test]
    fn number_rendering() {
        assert_eq!(MatrixCell::Number(45607.0).to_text(), "45607");
        assert_eq!(MatrixCell::Number(1.5).to_text(), "1.5");
        assert!(MatrixCell::from_text("   ").is_empty());
    }

    #[test]
    fn empty_input_is_empty_table() {
        let table = read_cell_table("".as_bytes()).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
    }
}
