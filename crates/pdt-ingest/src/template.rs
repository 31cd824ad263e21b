//! Blank matrix for productions to fill in.

use std::io::Write;

use chrono::{Days, NaiveDate};
use csv::WriterBuilder;
use pdt_model::{format_display, is_weekend};
use tracing::debug;

use crate::error::{IngestError, Result};
use crate::matrix::MatrixColumn;

const EXAMPLE_ROWS: [[&str; 8]; 3] = [
    [
        "11/11/2024",
        "Tournage",
        "1, 2, 3",
        "Int. Cuisine",
        "Paris",
        "Jean, Marie",
        "10 passants",
        "Besoin camion",
    ],
    ["12/11/2024", "Tournage", "4, 5A, 5B", "Ext. Parc", "Paris", "Marc", "", ""],
    ["13/11/2024", "Off", "", "", "", "", "", ""],
];

/// Write the matrix headers and one row per day of `range` (inclusive):
/// weekends typed `OFF`, weekdays `Tournage`. Without a range, three
/// example rows are written instead.
pub fn write_template<W: Write>(writer: W, range: Option<(NaiveDate, NaiveDate)>) -> Result<()> {
    let mut sheet = WriterBuilder::new().from_writer(writer);
    sheet.write_record(MatrixColumn::ALL.iter().map(MatrixColumn::header))?;

    match range {
        Some((start, end)) => {
            if start > end {
                return Err(IngestError::InvalidRange {
                    start: format_display(start),
                    end: format_display(end),
                });
            }
            let mut day = Some(start);
            let mut rows = 0usize;
            while let Some(current) = day.filter(|d| *d <= end) {
                let kind = if is_weekend(current) { "OFF" } else { "Tournage" };
                let date = format_display(current);
                sheet.write_record([date.as_str(), kind, "", "", "", "", "", ""])?;
                rows += 1;
                day = current.checked_add_days(Days::new(1));
            }
            debug!(rows, "template rows written");
        }
        None => {
            for row in EXAMPLE_ROWS {
                sheet.write_record(row)?;
            }
        }
    }
    sheet.flush()?;
    Ok(())
}
