//! Output of a shooting-schedule analysis.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::calendar::{format_display, parse_display};
use crate::detection::{DetectedDate, SequenceToken};
use crate::error::PdtError;
use crate::trace::Trace;

/// Period label when dates came from the sequential day counter.
pub const SEQUENTIAL_PERIOD_LABEL: &str = "dates not detected (sequential mode)";
/// Period label when nothing usable was found.
pub const UNKNOWN_PERIOD_LABEL: &str = "unknown";
/// `startDayInfo` when no "Nth day of shooting" marker exists.
pub const STANDARD_START_INFO: &str = "standard schedule start (day 1 assumed)";

/// Reported shooting period.
///
/// Serialized as its display string (`"DD/MM/YYYY - DD/MM/YYYY"` or a sentinel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Range { start: NaiveDate, end: NaiveDate },
    Sequential,
    Unknown,
}

impl Period {
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            Period::Range { start, end } => Some((*start, *end)),
            Period::Sequential | Period::Unknown => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Range { start, end } => {
                write!(f, "{} - {}", format_display(*start), format_display(*end))
            }
            Period::Sequential => f.write_str(SEQUENTIAL_PERIOD_LABEL),
            Period::Unknown => f.write_str(UNKNOWN_PERIOD_LABEL),
        }
    }
}

impl FromStr for Period {
    type Err = PdtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(UNKNOWN_PERIOD_LABEL) {
            return Ok(Period::Unknown);
        }
        if trimmed.eq_ignore_ascii_case(SEQUENTIAL_PERIOD_LABEL) {
            return Ok(Period::Sequential);
        }
        let (start, end) = trimmed
            .split_once(" - ")
            .ok_or_else(|| PdtError::InvalidPeriod(trimmed.to_string()))?;
        let start = parse_display(start).ok_or_else(|| PdtError::InvalidDate(start.to_string()))?;
        let end = parse_display(end).ok_or_else(|| PdtError::InvalidDate(end.to_string()))?;
        Ok(Period::Range { start, end })
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Which extraction path produced the final numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Heuristic regex engine.
    #[default]
    Engine,
    /// AI pre-pass result that passed the well-formedness check.
    Oracle,
    /// Structured spreadsheet following the column contract.
    Matrix,
}

impl fmt::Display for AnalysisSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalysisSource::Engine => "regex engine",
            AnalysisSource::Oracle => "AI pre-pass",
            AnalysisSource::Matrix => "spreadsheet matrix",
        })
    }
}

/// Plausibility warnings raised on an AI result. They flag, never reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditWarning {
    /// More shooting days than calendar days between the first and last date.
    ExceedsRange { shooting_days: usize, span_days: i64 },
    /// Span more than twice the number of shooting days.
    LargeGap { span_days: i64, shooting_days: usize },
}

impl fmt::Display for AuditWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuditWarning::ExceedsRange {
                shooting_days,
                span_days,
            } => write!(
                f,
                "shooting days ({shooting_days}) exceed date range ({span_days} days)"
            ),
            AuditWarning::LargeGap {
                span_days,
                shooting_days,
            } => write!(
                f,
                "large gap: {span_days} calendar days for {shooting_days} shooting days"
            ),
        }
    }
}

/// Final reconciled analysis of one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Reconciled number of shooting days.
    pub date_count: usize,
    /// Number of unique sequence tokens.
    pub sequence_count: usize,
    pub period: Period,
    pub start_day_info: String,
    pub start_day_offset: u32,
    pub source: AnalysisSource,
    /// Year assumed for dates without an explicit year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_year: Option<i32>,
    /// Unique dates in detection order.
    pub dates: Vec<DetectedDate>,
    /// Unique sequence tokens in detection order.
    pub sequences: Vec<SequenceToken>,
    /// Day count from the "jour de tournage" counter column, when computed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_day_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AuditWarning>,
    #[serde(default)]
    pub trace: Trace,
}

impl AnalysisResult {
    /// Result for a document where nothing was found.
    pub fn unknown() -> Self {
        Self {
            date_count: 0,
            sequence_count: 0,
            period: Period::Unknown,
            start_day_info: STANDARD_START_INFO.to_string(),
            start_day_offset: 0,
            source: AnalysisSource::Engine,
            document_year: None,
            dates: Vec::new(),
            sequences: Vec::new(),
            fallback_day_count: None,
            warnings: Vec::new(),
            trace: Trace::new(),
        }
    }

    /// True when the period is a real calendar range.
    pub fn has_date_range(&self) -> bool {
        self.period.range().is_some()
    }

    /// Unique detected dates in calendar order.
    pub fn sorted_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self.dates.iter().map(|d| d.date).collect();
        dates.sort_unstable();
        dates.dedup();
        dates
    }

    /// Shooting days including the ones elapsed before this document.
    pub fn total_shooting_days(&self) -> usize {
        self.date_count + self.start_day_offset as usize
    }
}
