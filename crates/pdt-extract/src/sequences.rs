//! Scene/sequence identifier scan.

use std::collections::HashSet;
use std::sync::LazyLock;

use pdt_model::{SceneMarker, SequenceMatch, SequenceToken, Strategy, Trace, TraceEvent, TraceReason};
use regex::Regex;

static CONTEXTUAL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([0-9]+[A-Z]?)\s+(INT|EXT|I\s*/\s*E|E\s*/\s*I|I\s*/\s*J|E\s*/\s*J|I\s*/\s*N|E\s*/\s*N)\b",
    )
    .expect("Invalid contextual sequence regex")
});

static STANDALONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{1,4}[A-Z]?$").expect("Invalid standalone sequence regex"));

static LINE_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+[A-Z]?)\s").expect("Invalid line start sequence regex"));

const YEAR_LIKE: std::ops::RangeInclusive<u64> = 1990..=2040;

/// A bare number in the year range is page furniture, not a scene.
fn is_year_like(id: &str) -> bool {
    SequenceToken::numeric_prefix(id).is_none_or(|value| YEAR_LIKE.contains(&value))
}

fn candidate(line: &str) -> Option<(String, Option<SceneMarker>, SequenceMatch)> {
    if let Some(caps) = CONTEXTUAL_REGEX.captures(line) {
        return Some((
            caps[1].to_string(),
            SceneMarker::parse(&caps[2]),
            SequenceMatch::Contextual,
        ));
    }
    if STANDALONE_REGEX.is_match(line) {
        return Some((line.to_string(), None, SequenceMatch::Standalone));
    }
    LINE_START_REGEX
        .captures(line)
        .map(|caps| (caps[1].to_string(), None, SequenceMatch::LineStart))
}

/// Collect unique sequence ids, keyed on the exact token (`12` != `12A`).
pub fn scan_sequences(lines: &[&str], trace: &mut Trace) -> Vec<SequenceToken> {
    let mut seen = HashSet::new();
    let mut tokens = Vec::new();

    for (index, raw_line) in lines.iter().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((id, marker, kind)) = candidate(line) else {
            continue;
        };
        if kind != SequenceMatch::Contextual && is_year_like(&id) {
            trace.push(TraceEvent::reject(Strategy::Sequence, TraceReason::YearLike, id).at_line(index));
            continue;
        }
        if !seen.insert(id.clone()) {
            trace.push(
                TraceEvent::reject(Strategy::Sequence, TraceReason::DuplicateSequence, id)
                    .at_line(index),
            );
            continue;
        }
        trace.push(TraceEvent::accept(Strategy::Sequence, TraceReason::Accepted, id.as_str()).at_line(index));
        tokens.push(SequenceToken {
            id,
            marker,
            kind,
            line: index,
        });
    }
    tokens
}
