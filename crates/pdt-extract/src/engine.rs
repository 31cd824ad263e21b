//! Orchestration of the extraction strategies.

use chrono::NaiveDate;
use pdt_model::{AnalysisResult, AnalysisSource};
use tracing::{debug, info};

use crate::grid::scan_grid_dates;
use crate::ledger::DateLedger;
use crate::numeric::scan_numeric_dates;
use crate::offset::detect_shooting_day_offset;
use crate::options::ExtractOptions;
use crate::reconcile::reconcile;
use crate::sequences::scan_sequences;
use crate::textual::{scan_split_textual_dates, scan_textual_dates};
use crate::vertical::sequential_day_count;
use crate::year::detect_document_year;

/// Analyse schedule text with the default options.
///
/// `current_year` is only used when the text carries no `202x` token.
pub fn analyze(text: &str, current_year: i32) -> AnalysisResult {
    analyze_with_options(text, current_year, &ExtractOptions::default())
}

/// Analyse schedule text.
///
/// Pure and infallible: malformed input degrades to an empty result with an
/// `unknown` period.
pub fn analyze_with_options(
    text: &str,
    current_year: i32,
    options: &ExtractOptions,
) -> AnalysisResult {
    let mut result = AnalysisResult::unknown();
    let trace = &mut result.trace;
    let lines: Vec<&str> = text.split('\n').collect();
    debug!(lines = lines.len(), chars = text.len(), "analysing schedule text");

    let year = detect_document_year(text, current_year, trace);
    let start = detect_shooting_day_offset(text, trace);

    let mut ledger = DateLedger::default();
    scan_grid_dates(&lines, year.year, options, &mut ledger, trace);
    scan_numeric_dates(&lines, &mut ledger, trace);
    scan_textual_dates(&lines, year.year, &mut ledger, trace);
    if ledger.len() < options.sequential_threshold {
        scan_split_textual_dates(text, year.year, &mut ledger, trace);
    }

    let fallback = if ledger.len() < options.sequential_threshold {
        sequential_day_count(text, options, trace)
    } else {
        None
    };

    let sequences = scan_sequences(&lines, trace);
    let dates = ledger.into_dates();
    let calendar: Vec<NaiveDate> = dates.iter().map(|d| d.date).collect();
    let reconciled = reconcile(
        &calendar,
        fallback,
        start.offset,
        options.sequential_threshold,
        trace,
    );

    result.date_count = reconciled.date_count;
    result.sequence_count = sequences.len();
    result.period = reconciled.period;
    result.start_day_info = start.info;
    result.start_day_offset = start.offset;
    result.source = AnalysisSource::Engine;
    result.document_year = Some(year.year);
    result.dates = dates;
    result.sequences = sequences;
    result.fallback_day_count = fallback;

    info!(
        date_count = result.date_count,
        sequence_count = result.sequence_count,
        period = %result.period,
        start_day_offset = result.start_day_offset,
        "schedule analysed"
    );
    result
}
