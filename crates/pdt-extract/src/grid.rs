//! Calendar-grid reconstruction.
//!
//! Grid schedules print a weekday row, a day-number row and a month row above
//! the per-day content. A month row is any line with two or more month tokens
//! that is not a weekday header; its day numbers come from the nearest line
//! above it holding at least two standalone numbers in `1..=31`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use pdt_model::{DateStrategy, DetectedDate, Strategy, Trace, TraceEvent, TraceReason, is_weekend};
use regex::{Match, Regex};
use tracing::debug;

use crate::ledger::DateLedger;
use crate::lexicon::{MONTH_TOKEN_REGEX, WEEKDAY_REGEX, month_number};
use crate::options::ExtractOptions;

static DAY_NUMBER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([1-9]|[12][0-9]|3[01])\b").expect("Invalid day number regex")
});

const MIN_WEEKDAY_TOKENS: usize = 3;
const MIN_ROW_TOKENS: usize = 2;

/// Day numbers for the month row at `row`: among the closest non-empty lines
/// above it, the one with the most day tokens.
fn find_day_row<'a>(lines: &[&'a str], row: usize, lookback: usize) -> Option<Vec<Match<'a>>> {
    let mut best: Option<Vec<Match<'a>>> = None;
    let mut non_empty = 0;
    for offset in 1..=lookback.min(row) {
        let line = lines[row - offset].trim();
        if line.is_empty() {
            continue;
        }
        non_empty += 1;
        let numbers: Vec<Match<'a>> = DAY_NUMBER_REGEX.find_iter(line).collect();
        if numbers.len() >= MIN_ROW_TOKENS {
            if best.as_ref().is_none_or(|current| numbers.len() > current.len()) {
                best = Some(numbers);
            }
            if non_empty >= 2 {
                break;
            }
        }
    }
    best
}

pub(crate) fn scan_grid_dates(
    lines: &[&str],
    year: i32,
    options: &ExtractOptions,
    ledger: &mut DateLedger,
    trace: &mut Trace,
) {
    for (index, raw_line) in lines.iter().enumerate().skip(1) {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        if WEEKDAY_REGEX.find_iter(line).count() >= MIN_WEEKDAY_TOKENS {
            trace.push(
                TraceEvent::reject(Strategy::Grid, TraceReason::WeekdayHeader, line).at_line(index),
            );
            continue;
        }
        let months: Vec<&str> = MONTH_TOKEN_REGEX
            .find_iter(line)
            .map(|m| m.as_str())
            .collect();
        let Some(last_month) = months.last().copied() else {
            continue;
        };
        if months.len() < MIN_ROW_TOKENS {
            continue;
        }
        trace.push(TraceEvent::accept(Strategy::Grid, TraceReason::MonthRow, line).at_line(index));

        let Some(days) = find_day_row(lines, index, options.grid_lookback_lines) else {
            trace.push(
                TraceEvent::reject(Strategy::Grid, TraceReason::NoDayRow, line).at_line(index),
            );
            continue;
        };
        debug!(line = index, days = days.len(), months = months.len(), "grid rows paired");

        for (k, day) in days.iter().enumerate() {
            let month_token = months.get(k).copied().unwrap_or(last_month);
            let raw = format!("{} {}", day.as_str(), month_token);
            let date = month_number(month_token).and_then(|month| {
                day.as_str()
                    .parse()
                    .ok()
                    .and_then(|d| NaiveDate::from_ymd_opt(year, month, d))
            });
            let Some(date) = date else {
                trace.push(
                    TraceEvent::reject(Strategy::Grid, TraceReason::InvalidCalendarDate, raw)
                        .at_line(index),
                );
                continue;
            };
            if options.skip_grid_weekends && is_weekend(date) {
                trace.push(TraceEvent::reject(Strategy::Grid, TraceReason::Weekend, raw).at_line(index));
                continue;
            }
            ledger.insert(
                DetectedDate {
                    date,
                    strategy: DateStrategy::Grid,
                    raw,
                    line: index,
                },
                trace,
            );
        }
    }
}
