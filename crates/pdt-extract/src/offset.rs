//! "Nth day of shooting" detection.
//!
//! A schedule that starts mid-production says so with a marker such as
//! `6ème jour de tournage`; the days before it are the offset.

use std::sync::LazyLock;

use pdt_model::{STANDARD_START_INFO, Strategy, Trace, TraceEvent, TraceReason};
use regex::Regex;
use tracing::debug;

/// Number, optional ordinal suffix (possibly split by PDF line breaks as in
/// `6\nè\nme`), then `jour [de] tournage`.
static START_DAY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)([0-9]+)\s*(?:[eè°]\s*[rm]?\s*e|er|ème|eme|°|e)?\s*jour\s*(?:de)?\s*tournage",
    )
    .expect("Invalid start day regex")
});

const DATE_SEPARATORS: [char; 4] = ['/', '-', ':', '.'];
const MAX_DAY_MARKER: u32 = 500;

/// Days already shot before the first date of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShootingDayOffset {
    pub offset: u32,
    pub info: String,
}

impl ShootingDayOffset {
    fn standard() -> Self {
        Self {
            offset: 0,
            info: STANDARD_START_INFO.to_string(),
        }
    }
}

/// Find the smallest plausible "Nth day of shooting" marker.
///
/// A number directly preceded by a date separator is part of a date
/// (`17.11.2024`), never a day marker. Only values in `2..500` count.
pub fn detect_shooting_day_offset(text: &str, trace: &mut Trace) -> ShootingDayOffset {
    let mut min_day: Option<u32> = None;

    for caps in START_DAY_REGEX.captures_iter(text) {
        let Some(number) = caps.get(1) else {
            continue;
        };
        let raw = number.as_str();
        if text[..number.start()]
            .chars()
            .next_back()
            .is_some_and(|c| DATE_SEPARATORS.contains(&c))
        {
            trace.push(TraceEvent::reject(
                Strategy::ShootingDayOffset,
                TraceReason::DateSeparatorPrefix,
                raw,
            ));
            continue;
        }
        match raw.parse::<u32>() {
            Ok(day) if day > 1 && day < MAX_DAY_MARKER => {
                trace.push(TraceEvent::accept(
                    Strategy::ShootingDayOffset,
                    TraceReason::Accepted,
                    raw,
                ));
                min_day = Some(min_day.map_or(day, |current| current.min(day)));
            }
            _ => trace.push(TraceEvent::reject(
                Strategy::ShootingDayOffset,
                TraceReason::OutOfRange,
                raw,
            )),
        }
    }

    match min_day {
        Some(day) => {
            let offset = day - 1;
            debug!(day, offset, "shooting day marker found");
            ShootingDayOffset {
                offset,
                info: format!("shooting day {day} detected ({offset} days already completed)"),
            }
        }
        None => ShootingDayOffset::standard(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset(text: &str) -> u32 {
        detect_shooting_day_offset(text, &mut Trace::new()).offset
    }

    #[test]
    fn ordinal_suffixes() {
        assert_eq!(offset("6ème jour de tournage"), 5);
        assert_eq!(offset("12e jour tournage"), 11);
        assert_eq!(offset("3° JOUR DE TOURNAGE"), 2);
        assert_eq!(offset("6\nè\nme jour de tournage"), 5);
    }

    #[test]
    fn smallest_marker_wins() {
        assert_eq!(offset("8ème jour de tournage ... 6ème jour de tournage"), 5);
    }

    #[test]
    fn first_day_is_not_an_offset() {
        assert_eq!(offset("1er jour de tournage"), 0);
    }

    #[test]
    fn date_fragments_are_rejected() {
        assert_eq!(offset("17.11.2024"), 0);
        let mut trace = Trace::new();
        let result = detect_shooting_day_offset("17.11 jour de tournage", &mut trace);
        assert_eq!(result.offset, 0);
        assert!(trace.contains_reason(TraceReason::DateSeparatorPrefix));
    }

    #[test]
    fn info_describes_offset() {
        let result = detect_shooting_day_offset("6ème jour de tournage", &mut Trace::new());
        assert_eq!(
            result.info,
            "shooting day 6 detected (5 days already completed)"
        );
        let result = detect_shooting_day_offset("", &mut Trace::new());
        assert_eq!(result.info, STANDARD_START_INFO);
    }
}
