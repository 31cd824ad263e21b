//! Integration of the optional AI pre-pass.
//!
//! An oracle result that carries a non-empty list of well-formed dates
//! supersedes the regex engine; it is audited for plausibility but never
//! rejected on those grounds. Any oracle failure falls through to the engine
//! with the reason recorded at the head of the trace.

use chrono::NaiveDate;
use pdt_model::{
    AnalysisResult, AnalysisSource, AuditWarning, DateStrategy, DetectedDate, Period,
    STANDARD_START_INFO, Strategy, Trace, TraceEvent, TraceReason, parse_display,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::analyze_with_options;
use crate::error::{AcquisitionError, OracleError};
use crate::options::ExtractOptions;

/// Raw bytes of an uploaded schedule plus its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Lower-cased file extension, if any.
    pub fn extension(&self) -> Option<String> {
        std::path::Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
    }
}

/// Shape returned by the AI document analysis service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleResponse {
    /// `DD/MM/YYYY` shooting dates.
    #[serde(default)]
    pub dates: Option<Vec<String>>,
    #[serde(default)]
    pub sequences_count: Option<usize>,
    #[serde(default)]
    pub start_day_info: Option<String>,
    #[serde(default)]
    pub start_day_offset: Option<u32>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl OracleResponse {
    pub fn from_json(raw: &str) -> Result<Self, OracleError> {
        serde_json::from_str(raw).map_err(|err| OracleError::Decode(err.to_string()))
    }
}

/// AI pre-pass over a source document.
///
/// Implementations own their network call and any timeout; a timeout is
/// reported as [`OracleError::Timeout`] and recovered like any other failure.
pub trait ScheduleOracle {
    fn analyze(&self, document: &SourceDocument) -> Result<OracleResponse, OracleError>;
}

/// Converts a source document into the line-oriented text the engine reads.
pub trait TextSource {
    fn extract_text(&self, document: &SourceDocument) -> Result<String, AcquisitionError>;
}

/// Plausibility checks on an ordered list of AI dates.
///
/// The span is measured from the first to the last date as returned.
pub fn audit_dates(dates: &[NaiveDate]) -> Vec<AuditWarning> {
    let (Some(first), Some(last)) = (dates.first(), dates.last()) else {
        return Vec::new();
    };
    let shooting_days = dates.len();
    let diff = (*last - *first).num_days();
    let mut warnings = Vec::new();
    if diff > 0 && shooting_days as i64 > diff + 1 {
        warnings.push(AuditWarning::ExceedsRange {
            shooting_days,
            span_days: diff + 1,
        });
    }
    if diff > 2 * shooting_days as i64 {
        warnings.push(AuditWarning::LargeGap {
            span_days: diff,
            shooting_days,
        });
    }
    warnings
}

/// Turn an oracle response into the final result, or explain why it cannot
/// be trusted.
pub fn accept_oracle_response(response: OracleResponse) -> Result<AnalysisResult, OracleError> {
    let raw_dates = response
        .dates
        .filter(|dates| !dates.is_empty())
        .ok_or(OracleError::Empty)?;

    let mut dates = Vec::with_capacity(raw_dates.len());
    for (position, raw) in raw_dates.iter().enumerate() {
        let date = parse_display(raw).ok_or_else(|| OracleError::MalformedDate(raw.clone()))?;
        dates.push(DetectedDate {
            date,
            strategy: DateStrategy::Oracle,
            raw: raw.clone(),
            line: position,
        });
    }

    let calendar: Vec<NaiveDate> = dates.iter().map(|d| d.date).collect();
    let warnings = audit_dates(&calendar);
    let mut trace = Trace::new();
    trace.push(TraceEvent::accept(
        Strategy::Oracle,
        TraceReason::OracleSuperseded,
        dates.len().to_string(),
    ));
    for warning in &warnings {
        warn!(%warning, "AI schedule audit");
        trace.push(TraceEvent::reject(
            Strategy::Oracle,
            TraceReason::AuditWarning,
            warning.to_string(),
        ));
    }
    if let Some(reasoning) = response.reasoning.as_deref().filter(|r| !r.trim().is_empty()) {
        debug!(reasoning, "AI reasoning");
    }

    let period = Period::Range {
        start: calendar[0],
        end: calendar[calendar.len() - 1],
    };
    let mut result = AnalysisResult::unknown();
    result.date_count = dates.len();
    result.sequence_count = response.sequences_count.unwrap_or(0);
    result.period = period;
    result.start_day_info = response
        .start_day_info
        .filter(|info| !info.trim().is_empty())
        .unwrap_or_else(|| STANDARD_START_INFO.to_string());
    result.start_day_offset = response.start_day_offset.unwrap_or(0);
    result.source = AnalysisSource::Oracle;
    result.dates = dates;
    result.warnings = warnings;
    result.trace = trace;
    Ok(result)
}

/// Analyse a document: AI pre-pass first, regex engine as guaranteed fallback.
///
/// Only a failure to read the document is an error.
pub fn analyze_document(
    document: &SourceDocument,
    oracle: Option<&dyn ScheduleOracle>,
    source: &dyn TextSource,
    current_year: i32,
    options: &ExtractOptions,
) -> Result<AnalysisResult, AcquisitionError> {
    let failure = match oracle {
        None => OracleError::NotConfigured,
        Some(oracle) => match oracle.analyze(document).and_then(accept_oracle_response) {
            Ok(result) => {
                info!(
                    document = %document.name,
                    date_count = result.date_count,
                    warnings = result.warnings.len(),
                    "AI result accepted"
                );
                return Ok(result);
            }
            Err(err) => err,
        },
    };
    if matches!(failure, OracleError::NotConfigured) {
        debug!(document = %document.name, "no AI pre-pass");
    } else {
        warn!(document = %document.name, error = %failure, "AI pre-pass failed, using regex engine");
    }

    let text = source.extract_text(document)?;
    let mut result = analyze_with_options(&text, current_year, options);
    result.trace.prepend(TraceEvent::reject(
        Strategy::Oracle,
        TraceReason::OracleFailure,
        failure.to_string(),
    ));
    Ok(result)
}
