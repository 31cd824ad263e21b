//! Numeric date scan (`DD/MM/YYYY`, `D-M-YY`, `DD.MM.YYYY`).

use std::sync::LazyLock;

use chrono::NaiveDate;
use pdt_model::{DateStrategy, DetectedDate, Strategy, Trace, TraceEvent, TraceReason};
use regex::Regex;
use tracing::debug;

use crate::ledger::DateLedger;
use crate::lexicon::FRENCH_DATE_REGEX;

pub(crate) static NUMERIC_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([0-9]{1,2})\s*[/.\-]\s*([0-9]{1,2})\s*[/.\-]\s*([0-9]{2,4})\b")
        .expect("Invalid numeric date regex")
});

static JOUR_OFF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)jour\s*off").expect("Invalid jour off regex"));

/// True if the line carries a date the line scans would pick up.
fn has_date(line: &str) -> bool {
    NUMERIC_DATE_REGEX.is_match(line) || FRENCH_DATE_REGEX.is_match(line)
}

/// A dated line is a day off when it says so itself, or when the following
/// line says so without carrying a date of its own.
pub(crate) fn is_jour_off(lines: &[&str], index: usize) -> bool {
    if lines.get(index).is_some_and(|line| JOUR_OFF_REGEX.is_match(line)) {
        return true;
    }
    lines
        .get(index + 1)
        .is_some_and(|next| !has_date(next) && JOUR_OFF_REGEX.is_match(next))
}

/// Resolve a 2- or 4-digit year; 3-digit years are not dates.
fn expand_year(raw: &str) -> Option<i32> {
    let value: i32 = raw.parse().ok()?;
    match raw.len() {
        4 => Some(value),
        2 => Some(2000 + value),
        _ => None,
    }
}

pub(crate) fn scan_numeric_dates(lines: &[&str], ledger: &mut DateLedger, trace: &mut Trace) {
    for (index, raw_line) in lines.iter().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        for caps in NUMERIC_DATE_REGEX.captures_iter(line) {
            let raw = &caps[0];
            let Some(year) = expand_year(&caps[3]) else {
                trace.push(
                    TraceEvent::reject(Strategy::Numeric, TraceReason::UnsupportedYear, raw)
                        .at_line(index),
                );
                continue;
            };
            let date = caps[1]
                .parse()
                .ok()
                .zip(caps[2].parse().ok())
                .and_then(|(day, month)| NaiveDate::from_ymd_opt(year, month, day));
            let Some(date) = date else {
                trace.push(
                    TraceEvent::reject(Strategy::Numeric, TraceReason::InvalidCalendarDate, raw)
                        .at_line(index),
                );
                continue;
            };
            if is_jour_off(lines, index) {
                debug!(line = index, raw, "numeric date marked jour off");
                ledger.exclude(date);
                trace.push(
                    TraceEvent::reject(Strategy::Numeric, TraceReason::JourOff, raw).at_line(index),
                );
                continue;
            }
            ledger.insert(
                DetectedDate {
                    date,
                    strategy: DateStrategy::Numeric,
                    raw: raw.to_string(),
                    line: index,
                },
                trace,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(text: &str) -> (Vec<DetectedDate>, Trace) {
        let lines: Vec<&str> = text.split('\n').collect();
        let mut ledger = DateLedger::default();
        let mut trace = Trace::new();
        scan_numeric_dates(&lines, &mut ledger, &mut trace);
        (ledger.into_dates(), trace)
    }

    #[test]
    fn separators_and_year_widths() {
        let (dates, _) = scan("10/11/2024\n11-11-24\n12 . 11 . 2024");
        let rendered: Vec<String> = dates.iter().map(DetectedDate::display).collect();
        assert_eq!(rendered, ["10/11/2024", "11/11/2024", "12/11/2024"]);
    }

    #[test]
    fn several_dates_on_one_line() {
        let (dates, _) = scan("du 03/02/2025 au 07/02/2025");
        assert_eq!(dates.len(), 2);
        assert!(dates.iter().all(|d| d.line == 0));
    }

    #[test]
    fn rejects_impossible_dates_and_three_digit_years() {
        let (dates, trace) = scan("31/02/2024\n10/11/202");
        assert!(dates.is_empty());
        assert!(trace.contains_reason(TraceReason::InvalidCalendarDate));
        assert!(trace.contains_reason(TraceReason::UnsupportedYear));
    }

    #[test]
    fn jour_off_on_same_or_next_line() {
        let (dates, trace) = scan("12/11/2024 - Jour Off\n13/11/2024\n  JOUR  OFF\n14/11/2024");
        let rendered: Vec<String> = dates.iter().map(DetectedDate::display).collect();
        assert_eq!(rendered, ["14/11/2024"]);
        assert_eq!(
            trace
                .by_strategy(Strategy::Numeric)
                .filter(|e| e.reason == TraceReason::JourOff)
                .count(),
            2
        );
    }

    #[test]
    fn jour_off_on_next_dated_line_does_not_leak() {
        let (dates, _) = scan("11/11/2024\n12/11/2024 jour off");
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].display(), "11/11/2024");
    }
}
