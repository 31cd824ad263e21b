//! Structured audit trail of an analysis.
//!
//! Each strategy records what it accepted or rejected and why, so support staff
//! (and tests) can inspect decisions as data instead of scraping a debug string.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::detection::DateStrategy;

/// Stage of the analysis that emitted a trace event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    DocumentYear,
    ShootingDayOffset,
    Numeric,
    FrenchTextual,
    Grid,
    TextualSplitFallback,
    Vertical,
    Sequence,
    Reconciliation,
    Oracle,
    Matrix,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::DocumentYear => "document-year",
            Strategy::ShootingDayOffset => "shooting-day-offset",
            Strategy::Numeric => "numeric",
            Strategy::FrenchTextual => "french-textual",
            Strategy::Grid => "grid",
            Strategy::TextualSplitFallback => "textual-split-fallback",
            Strategy::Vertical => "vertical",
            Strategy::Sequence => "sequence",
            Strategy::Reconciliation => "reconciliation",
            Strategy::Oracle => "oracle",
            Strategy::Matrix => "matrix",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<DateStrategy> for Strategy {
    fn from(value: DateStrategy) -> Self {
        match value {
            DateStrategy::Numeric => Strategy::Numeric,
            DateStrategy::FrenchTextual => Strategy::FrenchTextual,
            DateStrategy::Grid => Strategy::Grid,
            DateStrategy::TextualSplitFallback => Strategy::TextualSplitFallback,
            DateStrategy::Oracle => Strategy::Oracle,
            DateStrategy::Matrix => Strategy::Matrix,
        }
    }
}

/// Why a candidate was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceReason {
    Accepted,
    DuplicateDate,
    DuplicateSequence,
    JourOff,
    InvalidCalendarDate,
    UnsupportedYear,
    WeekdayHeader,
    MonthRow,
    NoDayRow,
    Weekend,
    HeaderMissing,
    NotEnoughCandidates,
    RunExtended,
    JumpConfirmed,
    IsolatedJump,
    GapTooLarge,
    YearLike,
    DateSeparatorPrefix,
    OutOfRange,
    MostFrequentYear,
    CurrentYearFallback,
    ConfidentDates,
    SequentialFallback,
    NoDates,
    OracleSuperseded,
    OracleFailure,
    AuditWarning,
}

impl TraceReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceReason::Accepted => "accepted",
            TraceReason::DuplicateDate => "duplicate date",
            TraceReason::DuplicateSequence => "duplicate sequence",
            TraceReason::JourOff => "marked jour off",
            TraceReason::InvalidCalendarDate => "not a calendar date",
            TraceReason::UnsupportedYear => "unsupported year width",
            TraceReason::WeekdayHeader => "weekday header row",
            TraceReason::MonthRow => "month row",
            TraceReason::NoDayRow => "no day-number row above month row",
            TraceReason::Weekend => "weekend in grid",
            TraceReason::HeaderMissing => "no shooting-day header",
            TraceReason::NotEnoughCandidates => "not enough day candidates",
            TraceReason::RunExtended => "run extended",
            TraceReason::JumpConfirmed => "jump confirmed by successors",
            TraceReason::IsolatedJump => "isolated jump",
            TraceReason::GapTooLarge => "gap too large",
            TraceReason::YearLike => "looks like a year",
            TraceReason::DateSeparatorPrefix => "preceded by a date separator",
            TraceReason::OutOfRange => "out of range",
            TraceReason::MostFrequentYear => "most frequent year",
            TraceReason::CurrentYearFallback => "current year fallback",
            TraceReason::ConfidentDates => "confident date count",
            TraceReason::SequentialFallback => "sequential fallback",
            TraceReason::NoDates => "no dates",
            TraceReason::OracleSuperseded => "ai result supersedes engine",
            TraceReason::OracleFailure => "ai pre-pass failed",
            TraceReason::AuditWarning => "plausibility warning",
        }
    }
}

impl fmt::Display for TraceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One decision taken during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub strategy: Strategy,
    pub accepted: bool,
    pub reason: TraceReason,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl TraceEvent {
    pub fn accept(strategy: Strategy, reason: TraceReason, value: impl Into<String>) -> Self {
        Self {
            strategy,
            accepted: true,
            reason,
            value: value.into(),
            line: None,
        }
    }

    pub fn reject(strategy: Strategy, reason: TraceReason, value: impl Into<String>) -> Self {
        Self {
            strategy,
            accepted: false,
            reason,
            value: value.into(),
            line: None,
        }
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }
}

/// Ordered list of trace events with a few query helpers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn prepend(&mut self, event: TraceEvent) {
        self.events.insert(0, event);
    }

    pub fn extend(&mut self, other: Trace) {
        self.events.extend(other.events);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events emitted by one strategy, in order.
    pub fn by_strategy(&self, strategy: Strategy) -> impl Iterator<Item = &TraceEvent> {
        self.events
            .iter()
            .filter(move |event| event.strategy == strategy)
    }

    /// True if any event carries the given reason.
    pub fn contains_reason(&self, reason: TraceReason) -> bool {
        self.events.iter().any(|event| event.reason == reason)
    }
}
