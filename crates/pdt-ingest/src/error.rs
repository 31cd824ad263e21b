use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("csv error: {0}")]
    CsvStream(#[from] csv::Error),
    #[error("invalid text layout: {0}")]
    Layout(#[from] serde_json::Error),
    #[error("spreadsheet does not follow the schedule matrix layout, missing columns: {}", missing.join(", "))]
    NonConformingHeaders { missing: Vec<String> },
    #[error("invalid template range: {start} is after {end}")]
    InvalidRange { start: String, end: String },
}

pub type Result<T> = std::result::Result<T, IngestError>;
