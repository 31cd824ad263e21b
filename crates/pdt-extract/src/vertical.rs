//! Sequential day counter under a "jour de tournage" column header.
//!
//! Used when a layout defeats the date strategies: the counter column
//! (1, 2, 3, ...) still tells how many shooting days the document covers.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use pdt_model::{Strategy, Trace, TraceEvent, TraceReason};
use regex::Regex;
use tracing::debug;

use crate::options::ExtractOptions;

static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)jour\s*(?:de)?\s*tournage").expect("Invalid shooting day header regex")
});

static COUNTER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9]{1,3})\b").expect("Invalid day counter regex"));

/// Prefix of `text` holding at most `max_chars` characters.
fn char_prefix(text: &str, max_chars: usize) -> &str {
    text.char_indices()
        .nth(max_chars)
        .map_or(text, |(end, _)| &text[..end])
}

/// Highest value reached by the quasi-consecutive run starting at the
/// smallest candidate, or `None` without a header or enough candidates.
pub fn sequential_day_count(text: &str, options: &ExtractOptions, trace: &mut Trace) -> Option<u32> {
    let Some(header) = HEADER_REGEX.find(text) else {
        trace.push(TraceEvent::reject(
            Strategy::Vertical,
            TraceReason::HeaderMissing,
            "jour de tournage",
        ));
        return None;
    };
    let window = char_prefix(&text[header.end()..], options.vertical_scan_chars);

    let candidates: BTreeSet<u32> = COUNTER_REGEX
        .captures_iter(window)
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .filter(|value| *value >= 1 && *value < options.vertical_max_day)
        .collect();
    if candidates.len() < 2 {
        trace.push(TraceEvent::reject(
            Strategy::Vertical,
            TraceReason::NotEnoughCandidates,
            candidates.len().to_string(),
        ));
        return None;
    }

    let sorted: Vec<u32> = candidates.iter().copied().collect();
    let mut max = sorted[0];
    for pair in sorted.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        let gap = current - previous;
        let step = format!("{previous} -> {current}");
        if gap <= 2 {
            max = current;
        } else if gap <= options.max_confirmed_jump {
            let confirmed = (1..=options.jump_confirmations)
                .all(|ahead| candidates.contains(&(current + ahead)));
            if !confirmed {
                trace.push(TraceEvent::reject(Strategy::Vertical, TraceReason::IsolatedJump, step));
                break;
            }
            trace.push(TraceEvent::accept(Strategy::Vertical, TraceReason::JumpConfirmed, step));
            max = current;
        } else {
            trace.push(TraceEvent::reject(Strategy::Vertical, TraceReason::GapTooLarge, step));
            break;
        }
    }

    debug!(candidates = sorted.len(), max, "sequential day counter");
    trace.push(TraceEvent::accept(
        Strategy::Vertical,
        TraceReason::RunExtended,
        max.to_string(),
    ));
    Some(max)
}
