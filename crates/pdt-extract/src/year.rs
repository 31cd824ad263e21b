//! Document-year detection.

use std::collections::HashMap;
use std::sync::LazyLock;

use pdt_model::{Strategy, Trace, TraceEvent, TraceReason};
use regex::Regex;
use tracing::debug;

static YEAR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"202[0-9]").expect("Invalid year regex"));

/// Year assumed for dates that carry no explicit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentYear {
    pub year: i32,
    /// False when no `202x` token was found and the current year was used.
    pub detected: bool,
}

/// Pick the most frequent `202x` token of the text.
///
/// On a tie the year that reached the winning count first is kept. Falls back
/// to `current_year` when the text has no such token.
pub fn detect_document_year(text: &str, current_year: i32, trace: &mut Trace) -> DocumentYear {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut best: Option<(&str, usize)> = None;
    for found in YEAR_REGEX.find_iter(text) {
        let count = counts.entry(found.as_str()).or_insert(0);
        *count += 1;
        if best.is_none_or(|(_, max)| *count > max) {
            best = Some((found.as_str(), *count));
        }
    }

    match best.and_then(|(token, count)| token.parse::<i32>().ok().map(|year| (year, count))) {
        Some((year, count)) => {
            debug!(year, occurrences = count, "document year detected");
            trace.push(TraceEvent::accept(
                Strategy::DocumentYear,
                TraceReason::MostFrequentYear,
                year.to_string(),
            ));
            DocumentYear {
                year,
                detected: true,
            }
        }
        None => {
            debug!(year = current_year, "no year token, using current year");
            trace.push(TraceEvent::accept(
                Strategy::DocumentYear,
                TraceReason::CurrentYearFallback,
                current_year.to_string(),
            ));
            DocumentYear {
                year: current_year,
                detected: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_frequent_year_wins() {
        let mut trace = Trace::new();
        let year = detect_document_year("2024 2025 2025 plan 2023", 2030, &mut trace);
        assert_eq!(year, DocumentYear { year: 2025, detected: true });
    }

    #[test]
    fn tie_keeps_first_to_reach_count() {
        let mut trace = Trace::new();
        let year = detect_document_year("2024 2025 2025 2024", 2030, &mut trace);
        assert_eq!(year.year, 2025);
        let year = detect_document_year("2024 2025", 2030, &mut trace);
        assert_eq!(year.year, 2024);
    }

    #[test]
    fn falls_back_to_current_year() {
        let mut trace = Trace::new();
        let year = detect_document_year("no year here 1999", 2026, &mut trace);
        assert_eq!(year, DocumentYear { year: 2026, detected: false });
        assert!(trace.contains_reason(TraceReason::CurrentYearFallback));
    }
}
