//! Final date-count policy.

use chrono::NaiveDate;
use pdt_model::{Period, Strategy, Trace, TraceEvent, TraceReason, subtract_working_days};
use tracing::debug;

/// Reconciled date count and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub date_count: usize,
    pub period: Period,
}

/// Choose between the confident date set and the sequential day counter.
///
/// Fewer than `threshold` unique dates with a positive counter means the
/// layout defeated the date strategies: the counter wins and the period is
/// sequential. Otherwise the unique dates are counted and the period runs
/// from the earliest date, moved back `offset` working days, to the latest.
pub fn reconcile(
    dates: &[NaiveDate],
    fallback: Option<u32>,
    offset: u32,
    threshold: usize,
    trace: &mut Trace,
) -> Reconciled {
    if dates.len() < threshold
        && let Some(count) = fallback.filter(|count| *count > 0)
    {
        debug!(unique = dates.len(), count, "using sequential day counter");
        trace.push(TraceEvent::accept(
            Strategy::Reconciliation,
            TraceReason::SequentialFallback,
            count.to_string(),
        ));
        return Reconciled {
            date_count: count as usize,
            period: Period::Sequential,
        };
    }

    let (Some(first), Some(last)) = (dates.iter().min(), dates.iter().max()) else {
        trace.push(TraceEvent::reject(
            Strategy::Reconciliation,
            TraceReason::NoDates,
            "0",
        ));
        return Reconciled {
            date_count: 0,
            period: Period::Unknown,
        };
    };

    trace.push(TraceEvent::accept(
        Strategy::Reconciliation,
        TraceReason::ConfidentDates,
        dates.len().to_string(),
    ));
    Reconciled {
        date_count: dates.len(),
        period: Period::Range {
            start: subtract_working_days(*first, offset),
            end: *last,
        },
    }
}
