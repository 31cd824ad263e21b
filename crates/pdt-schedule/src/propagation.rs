//! Date-shift proposals for items linked to the schedule.
//!
//! Logistics requests and reinforcement staff can follow a sequence or a
//! location. When the schedule moves, every linked item whose computed date
//! differs from its current one gets a pending [`DateShiftProposal`]; nothing
//! is overwritten here.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schedule::Schedule;

/// First and last day spent at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Span of every location key (linked location, else free text) in the schedule.
pub fn location_spans(schedule: &Schedule) -> BTreeMap<String, LocationSpan> {
    let mut spans: BTreeMap<String, LocationSpan> = BTreeMap::new();
    for day in &schedule.days {
        let Some(key) = day.location_key() else {
            continue;
        };
        spans
            .entry(key.to_string())
            .and_modify(|span| {
                span.start = span.start.min(day.date);
                span.end = span.end.max(day.date);
            })
            .or_insert(LocationSpan {
                start: day.date,
                end: day.date,
            });
    }
    spans
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogisticsKind {
    Pickup,
    Dropoff,
    PickupSet,
    DropoffSet,
    Usage,
}

impl LogisticsKind {
    fn is_pickup(self) -> bool {
        matches!(self, LogisticsKind::Pickup | LogisticsKind::PickupSet)
    }

    /// Days relative to the sequence date.
    fn sequence_shift(self) -> i64 {
        match self {
            LogisticsKind::Pickup | LogisticsKind::PickupSet => -1,
            LogisticsKind::Dropoff | LogisticsKind::DropoffSet => 1,
            LogisticsKind::Usage => 0,
        }
    }
}

/// Which end of a location span an item is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LinkType {
    Prelight,
    Demontage,
    #[default]
    Shooting,
}

/// How an item is tied to the schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleLink {
    #[serde(default)]
    pub linked_sequence_id: Option<String>,
    #[serde(default)]
    pub linked_location: Option<String>,
    #[serde(default)]
    pub link_type: Option<LinkType>,
    /// Added to the anchor date of a location link.
    #[serde(default)]
    pub day_offset: i64,
}

impl ScheduleLink {
    fn location_target(&self, spans: &BTreeMap<String, LocationSpan>) -> Option<(String, NaiveDate)> {
        let location = self.linked_location.as_deref()?;
        let span = spans.get(location)?;
        let anchor = if self.link_type == Some(LinkType::Demontage) {
            span.end
        } else {
            span.start
        };
        Some((location.to_string(), shift_days(anchor, self.day_offset)?))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogisticsRequest {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: LogisticsKind,
    pub date: NaiveDate,
    /// Sequence links only move the request when this is set.
    #[serde(default)]
    pub auto_update_dates: bool,
    #[serde(flatten)]
    pub link: ScheduleLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReinforcementAssignment {
    pub id: String,
    pub date: NaiveDate,
    #[serde(flatten)]
    pub link: ScheduleLink,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ShiftReason {
    Sequence { sequence: String },
    Location { location: String },
}

impl fmt::Display for ShiftReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftReason::Sequence { sequence } => write!(f, "sequence {sequence} moved"),
            ShiftReason::Location { location } => write!(f, "location {location} moved"),
        }
    }
}

/// Pending date change awaiting validation by the owning department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateShiftProposal {
    pub item_id: String,
    pub current: NaiveDate,
    pub proposed: NaiveDate,
    pub reason: ShiftReason,
}

fn shift_days(date: NaiveDate, offset: i64) -> Option<NaiveDate> {
    let magnitude = Days::new(offset.unsigned_abs());
    if offset < 0 {
        date.checked_sub_days(magnitude)
    } else {
        date.checked_add_days(magnitude)
    }
}

fn sequence_date(schedule: &Schedule, id: &str) -> Option<NaiveDate> {
    schedule
        .sequences
        .iter()
        .find(|sequence| sequence.id == id)
        .and_then(|sequence| sequence.date)
}

/// Logistics target for a sequence date: J-1 for pickups, J+1 for drop-offs,
/// J for usage. A Sunday target falls back to Saturday for pickups and
/// forward to Monday otherwise.
pub fn logistics_target(kind: LogisticsKind, sequence_date: NaiveDate) -> Option<NaiveDate> {
    let target = shift_days(sequence_date, kind.sequence_shift())?;
    if target.weekday() != Weekday::Sun {
        return Some(target);
    }
    if kind.is_pickup() {
        target.pred_opt()
    } else {
        target.succ_opt()
    }
}

fn proposal(
    item_id: &str,
    current: NaiveDate,
    target: Option<(ShiftReason, NaiveDate)>,
) -> Option<DateShiftProposal> {
    let (reason, proposed) = target?;
    (proposed != current).then(|| DateShiftProposal {
        item_id: item_id.to_string(),
        current,
        proposed,
        reason,
    })
}

/// Proposals for logistics requests. A location link takes precedence over a
/// sequence link when both resolve.
pub fn propose_logistics_shifts(
    schedule: &Schedule,
    requests: &[LogisticsRequest],
) -> Vec<DateShiftProposal> {
    let spans = location_spans(schedule);
    let proposals: Vec<DateShiftProposal> = requests
        .iter()
        .filter_map(|request| {
            let by_location = request
                .link
                .location_target(&spans)
                .map(|(location, date)| (ShiftReason::Location { location }, date));
            let by_sequence = || {
                let id = request.link.linked_sequence_id.as_deref()?;
                if !request.auto_update_dates {
                    return None;
                }
                let date = logistics_target(request.kind, sequence_date(schedule, id)?)?;
                Some((
                    ShiftReason::Sequence {
                        sequence: id.to_string(),
                    },
                    date,
                ))
            };
            proposal(&request.id, request.date, by_location.or_else(by_sequence))
        })
        .collect();
    debug!(
        requests = requests.len(),
        proposals = proposals.len(),
        "logistics shifts computed"
    );
    proposals
}

/// Proposals for reinforcement staff. Sequence links follow the sequence date
/// unchanged; location links take precedence.
pub fn propose_reinforcement_shifts(
    schedule: &Schedule,
    assignments: &[ReinforcementAssignment],
) -> Vec<DateShiftProposal> {
    let spans = location_spans(schedule);
    let proposals: Vec<DateShiftProposal> = assignments
        .iter()
        .filter_map(|assignment| {
            let by_location = assignment
                .link
                .location_target(&spans)
                .map(|(location, date)| (ShiftReason::Location { location }, date));
            let by_sequence = || {
                let id = assignment.link.linked_sequence_id.as_deref()?;
                Some((
                    ShiftReason::Sequence {
                        sequence: id.to_string(),
                    },
                    sequence_date(schedule, id)?,
                ))
            };
            proposal(&assignment.id, assignment.date, by_location.or_else(by_sequence))
        })
        .collect();
    debug!(
        assignments = assignments.len(),
        proposals = proposals.len(),
        "reinforcement shifts computed"
    );
    proposals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
    }

    #[test]
    fn sunday_targets_skip_forward_or_back() {
        // 2024-11-11 is a Monday, 2024-11-16 a Saturday.
        assert_eq!(logistics_target(LogisticsKind::Pickup, date(12)), Some(date(11)));
        assert_eq!(logistics_target(LogisticsKind::PickupSet, date(18)), Some(date(16)));
        assert_eq!(logistics_target(LogisticsKind::Dropoff, date(16)), Some(date(18)));
        assert_eq!(logistics_target(LogisticsKind::Usage, date(17)), Some(date(18)));
        assert_eq!(logistics_target(LogisticsKind::DropoffSet, date(13)), Some(date(14)));
    }

    #[test]
    fn negative_offsets_move_backwards() {
        assert_eq!(shift_days(date(12), -3), Some(date(9)));
        assert_eq!(shift_days(date(12), 0), Some(date(12)));
    }

    #[test]
    fn reason_display() {
        let reason = ShiftReason::Location {
            location: "Studio A".to_string(),
        };
        assert_eq!(reason.to_string(), "location Studio A moved");
    }
}
