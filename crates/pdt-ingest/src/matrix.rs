//! Structured schedule spreadsheets ("matrix").
//!
//! A matrix has one row per calendar day and eight fixed columns. When a
//! sheet follows that layout it is imported without any heuristics.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use pdt_model::{
    AnalysisResult, AnalysisSource, DateStrategy, DayType, DetectedDate, PdtDay, PdtSequence,
    Period, SequenceMatch, SequenceToken, Strategy, Trace, TraceEvent, TraceReason, parse_display,
};
use regex::Regex;
use tracing::{debug, info};

use crate::error::{IngestError, Result};
use crate::table::{CellTable, MatrixCell};

/// `startDayInfo` of a spreadsheet import.
pub const MATRIX_START_INFO: &str = "standard spreadsheet import";

static SEQUENCE_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;\s]+").expect("Invalid sequence separator regex"));

static CAST_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,;]+").expect("Invalid cast separator regex"));

/// Columns of the matrix, in template order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixColumn {
    Date,
    Type,
    Sequences,
    Sets,
    Locations,
    Cast,
    Extras,
    Notes,
}

impl MatrixColumn {
    pub const ALL: [MatrixColumn; 8] = [
        MatrixColumn::Date,
        MatrixColumn::Type,
        MatrixColumn::Sequences,
        MatrixColumn::Sets,
        MatrixColumn::Locations,
        MatrixColumn::Cast,
        MatrixColumn::Extras,
        MatrixColumn::Notes,
    ];

    /// Header written by the template.
    pub fn header(&self) -> &'static str {
        match self {
            MatrixColumn::Date => "Date (JJ/MM/AAAA)",
            MatrixColumn::Type => "Type (Tournage/Prépa/Off)",
            MatrixColumn::Sequences => "Séquences (séparées par virgules)",
            MatrixColumn::Sets => "Décors",
            MatrixColumn::Locations => "Lieux / Ville",
            MatrixColumn::Cast => "Comédiens (Noms ou IDs)",
            MatrixColumn::Extras => "Figuration (Nombre/Détails)",
            MatrixColumn::Notes => "Notes Logistique",
        }
    }

    /// Shorter headers accepted on import.
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            MatrixColumn::Date => &["Date"],
            MatrixColumn::Type => &["Type"],
            MatrixColumn::Sequences => &["Séquences", "Sequences"],
            MatrixColumn::Sets => &["Decors"],
            MatrixColumn::Locations => &["Lieux", "Ville"],
            MatrixColumn::Cast => &["Comédiens", "Comediens"],
            MatrixColumn::Extras => &["Figuration"],
            MatrixColumn::Notes => &["Notes"],
        }
    }

    fn matches(&self, header: &str) -> bool {
        std::iter::once(self.header())
            .chain(self.aliases().iter().copied())
            .any(|candidate| candidate.to_lowercase() == header.to_lowercase())
    }
}

/// Column index of every matrix column in a given sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 8],
}

impl ColumnMap {
    /// Locate all eight columns; any missing one makes the sheet non-conforming.
    pub fn resolve(headers: &[String]) -> Result<Self> {
        let mut indices = [0usize; 8];
        let mut missing = Vec::new();
        for (slot, column) in MatrixColumn::ALL.iter().enumerate() {
            match headers.iter().position(|header| column.matches(header)) {
                Some(index) => indices[slot] = index,
                None => missing.push(column.header().to_string()),
            }
        }
        if missing.is_empty() {
            Ok(Self { indices })
        } else {
            Err(IngestError::NonConformingHeaders { missing })
        }
    }

    pub fn index(&self, column: MatrixColumn) -> usize {
        let slot = MatrixColumn::ALL
            .iter()
            .position(|candidate| *candidate == column)
            .unwrap_or_default();
        self.indices[slot]
    }
}

/// Days and sequences read from a matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixImport {
    pub days: Vec<PdtDay>,
    /// One entry per sequence id per day, in row order.
    pub sequences: Vec<PdtSequence>,
    /// Rows dropped for a missing or unreadable date.
    pub skipped_rows: usize,
    pub trace: Trace,
}

impl MatrixImport {
    pub fn shoot_days(&self) -> impl Iterator<Item = &PdtDay> {
        self.days.iter().filter(|day| day.day_type == DayType::Shoot)
    }

    /// Summary in the shape produced by the extraction engine.
    pub fn to_analysis(&self) -> AnalysisResult {
        let shoot: Vec<&PdtDay> = self.shoot_days().collect();
        let period = match (
            shoot.iter().map(|day| day.date).min(),
            shoot.iter().map(|day| day.date).max(),
        ) {
            (Some(start), Some(end)) => Period::Range { start, end },
            _ => Period::Unknown,
        };

        let mut result = AnalysisResult::unknown();
        result.date_count = shoot.len();
        result.sequence_count = self.sequences.len();
        result.period = period;
        result.start_day_info = MATRIX_START_INFO.to_string();
        result.source = AnalysisSource::Matrix;
        result.dates = shoot
            .iter()
            .enumerate()
            .map(|(position, day)| DetectedDate {
                date: day.date,
                strategy: DateStrategy::Matrix,
                raw: pdt_model::format_display(day.date),
                line: position,
            })
            .collect();
        result.sequences = self
            .sequences
            .iter()
            .enumerate()
            .map(|(position, sequence)| SequenceToken {
                id: sequence.id.clone(),
                marker: None,
                kind: SequenceMatch::Cell,
                line: position,
            })
            .collect();
        result.trace = self.trace.clone();
        result
    }
}

/// Convert a spreadsheet date serial (1900 date system).
///
/// Serial 60 is the non-existent 29/02/1900 kept by spreadsheet software for
/// compatibility; serials below it are shifted by one day.
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let whole = serial.floor() as u64;
    let (epoch, days) = match whole {
        60 => return None,
        1..=59 => (NaiveDate::from_ymd_opt(1899, 12, 31)?, whole),
        _ => (NaiveDate::from_ymd_opt(1899, 12, 30)?, whole),
    };
    epoch.checked_add_days(Days::new(days))
}

/// Date cell: a serial number or a `DD/MM/YYYY` string. CSV exports of
/// unformatted date cells carry the serial as text.
pub fn parse_date_cell(cell: &MatrixCell) -> Option<NaiveDate> {
    match cell {
        MatrixCell::Number(serial) => excel_serial_to_date(*serial),
        MatrixCell::Text(text) => parse_display(text).or_else(|| {
            let trimmed = text.trim();
            let numeric = !trimmed.is_empty()
                && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.');
            numeric
                .then(|| trimmed.parse::<f64>().ok())
                .flatten()
                .and_then(excel_serial_to_date)
        }),
        MatrixCell::Empty => None,
    }
}

/// Sequence ids from a cell: comma, semicolon or whitespace separated;
/// `NULL` placeholders are dropped.
pub fn split_sequences(raw: &str) -> Vec<String> {
    SEQUENCE_SPLIT_REGEX
        .split(raw)
        .filter(|token| !token.is_empty() && !token.eq_ignore_ascii_case("NULL"))
        .map(str::to_string)
        .collect()
}

/// Cast names: comma or semicolon separated.
pub fn split_cast(raw: &str) -> Vec<String> {
    CAST_SPLIT_REGEX
        .split(raw)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Import a sheet that follows the matrix layout.
pub fn parse_matrix(table: &CellTable) -> Result<MatrixImport> {
    let columns = ColumnMap::resolve(&table.headers)?;
    let text = |row: usize, column: MatrixColumn| table.cell(row, columns.index(column)).to_text();

    let mut import = MatrixImport {
        days: Vec::new(),
        sequences: Vec::new(),
        skipped_rows: 0,
        trace: Trace::new(),
    };
    for row in 0..table.rows.len() {
        let date_cell = table.cell(row, columns.index(MatrixColumn::Date));
        let Some(date) = parse_date_cell(date_cell) else {
            if !date_cell.is_empty() {
                debug!(row, value = %date_cell.to_text(), "matrix row without a usable date");
            }
            import.skipped_rows += 1;
            import.trace.push(
                TraceEvent::reject(
                    Strategy::Matrix,
                    TraceReason::InvalidCalendarDate,
                    date_cell.to_text(),
                )
                .at_line(row),
            );
            continue;
        };

        let mut day = PdtDay::new(date, DayType::classify(&text(row, MatrixColumn::Type)));
        day.location = text(row, MatrixColumn::Locations);
        day.set = text(row, MatrixColumn::Sets);
        day.sequences = split_sequences(&text(row, MatrixColumn::Sequences));
        day.cast = split_cast(&text(row, MatrixColumn::Cast));
        day.extras = text(row, MatrixColumn::Extras);
        day.notes = text(row, MatrixColumn::Notes);

        let description = Some(day.set.clone()).filter(|set| !set.is_empty());
        import
            .sequences
            .extend(day.sequences.iter().map(|id| PdtSequence {
                id: id.clone(),
                date: Some(date),
                description: description.clone(),
            }));
        import.trace.push(
            TraceEvent::accept(
                Strategy::Matrix,
                TraceReason::Accepted,
                pdt_model::format_display(date),
            )
            .at_line(row),
        );
        import.days.push(day);
    }

    info!(
        days = import.days.len(),
        sequences = import.sequences.len(),
        skipped = import.skipped_rows,
        "matrix imported"
    );
    Ok(import)
}
