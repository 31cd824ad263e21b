//! Insertion-ordered set of accepted dates shared by the date strategies.

use std::collections::HashSet;

use chrono::NaiveDate;
use pdt_model::{DetectedDate, Strategy, Trace, TraceEvent, TraceReason};
use tracing::debug;

#[derive(Debug, Default)]
pub(crate) struct DateLedger {
    dates: Vec<DetectedDate>,
    seen: HashSet<NaiveDate>,
    /// Dates a line marked as a day off; later full-text passes must not revive them.
    excluded: HashSet<NaiveDate>,
}

impl DateLedger {
    /// Record a candidate; returns false for a calendar value already present.
    pub(crate) fn insert(&mut self, detected: DetectedDate, trace: &mut Trace) -> bool {
        let strategy = Strategy::from(detected.strategy);
        let value = detected.display();
        if !self.seen.insert(detected.date) {
            trace.push(
                TraceEvent::reject(strategy, TraceReason::DuplicateDate, value).at_line(detected.line),
            );
            return false;
        }
        debug!(date = %value, strategy = %strategy, line = detected.line, "date accepted");
        trace.push(TraceEvent::accept(strategy, TraceReason::Accepted, value).at_line(detected.line));
        self.dates.push(detected);
        true
    }

    pub(crate) fn exclude(&mut self, date: NaiveDate) {
        self.excluded.insert(date);
    }

    pub(crate) fn is_excluded(&self, date: NaiveDate) -> bool {
        self.excluded.contains(&date)
    }

    pub(crate) fn len(&self) -> usize {
        self.dates.len()
    }

    pub(crate) fn into_dates(self) -> Vec<DetectedDate> {
        self.dates
    }
}
