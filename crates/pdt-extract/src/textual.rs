//! French textual dates (`9 Mars`, `4 oct.`), per line and across line breaks.

use chrono::NaiveDate;
use pdt_model::{DateStrategy, DetectedDate, Strategy, Trace, TraceEvent, TraceReason};
use regex::Captures;
use tracing::debug;

use crate::ledger::DateLedger;
use crate::lexicon::{FRENCH_DATE_REGEX, month_number};
use crate::numeric::is_jour_off;

fn resolve(caps: &Captures<'_>, year: i32) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().ok()?;
    let month = month_number(&caps[2])?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn scan_textual_dates(
    lines: &[&str],
    year: i32,
    ledger: &mut DateLedger,
    trace: &mut Trace,
) {
    for (index, raw_line) in lines.iter().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        for caps in FRENCH_DATE_REGEX.captures_iter(line) {
            let raw = &caps[0];
            let Some(date) = resolve(&caps, year) else {
                trace.push(
                    TraceEvent::reject(Strategy::FrenchTextual, TraceReason::InvalidCalendarDate, raw)
                        .at_line(index),
                );
                continue;
            };
            if is_jour_off(lines, index) {
                ledger.exclude(date);
                trace.push(
                    TraceEvent::reject(Strategy::FrenchTextual, TraceReason::JourOff, raw)
                        .at_line(index),
                );
                continue;
            }
            ledger.insert(
                DetectedDate {
                    date,
                    strategy: DateStrategy::FrenchTextual,
                    raw: raw.to_string(),
                    line: index,
                },
                trace,
            );
        }
    }
}

/// Re-run the textual pattern over the whole text so a day number and a
/// month name split by a PDF line break still pair up.
pub(crate) fn scan_split_textual_dates(
    text: &str,
    year: i32,
    ledger: &mut DateLedger,
    trace: &mut Trace,
) {
    debug!(found = ledger.len(), "few dates found, scanning whole text");
    for caps in FRENCH_DATE_REGEX.captures_iter(text) {
        let raw = collapse_whitespace(&caps[0]);
        let line = text[..caps.get(0).map_or(0, |m| m.start())]
            .matches('\n')
            .count();
        let Some(date) = resolve(&caps, year) else {
            trace.push(
                TraceEvent::reject(
                    Strategy::TextualSplitFallback,
                    TraceReason::InvalidCalendarDate,
                    raw,
                )
                .at_line(line),
            );
            continue;
        };
        if ledger.is_excluded(date) {
            trace.push(
                TraceEvent::reject(Strategy::TextualSplitFallback, TraceReason::JourOff, raw)
                    .at_line(line),
            );
            continue;
        }
        ledger.insert(
            DetectedDate {
                date,
                strategy: DateStrategy::TextualSplitFallback,
                raw,
                line,
            },
            trace,
        );
    }
}
