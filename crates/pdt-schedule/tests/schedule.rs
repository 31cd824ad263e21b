use chrono::NaiveDate;
use pdt_extract::analyze;
use pdt_model::{DayType, Period};
use pdt_schedule::{
    DateShiftProposal, LinkType, LogisticsKind, LogisticsRequest, ReinforcementAssignment,
    Schedule, ScheduleLink, ShiftReason, location_spans, propose_logistics_shifts,
    propose_reinforcement_shifts,
};

const DOCUMENT: &str = "Lundi 11/11/2024\n\
                        12 INT CUISINE\n\
                        14 EXT PARC\n\
                        Mardi 12/11/2024\n\
                        15 INT BUREAU\n\
                        Mercredi 13/11/2024\n\
                        20 EXT RUE\n";

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, d).unwrap()
}

fn link_to_sequence(id: &str) -> ScheduleLink {
    ScheduleLink {
        linked_sequence_id: Some(id.to_string()),
        ..ScheduleLink::default()
    }
}

fn link_to_location(location: &str, link_type: LinkType, day_offset: i64) -> ScheduleLink {
    ScheduleLink {
        linked_location: Some(location.to_string()),
        link_type: Some(link_type),
        day_offset,
        ..ScheduleLink::default()
    }
}

/// Analysed document with 14 moved to Friday and locations filled in.
fn edited_schedule() -> Schedule {
    let mut schedule = Schedule::from_analysis(&analyze(DOCUMENT, 2024));
    schedule.reassign_sequence("14", date(15)).expect("reassign");
    for day in &mut schedule.days {
        day.location = if day.date <= date(12) { "Paris" } else { "Studio" }.to_string();
    }
    schedule
}

#[test]
fn sequences_follow_nearest_date_above() {
    let schedule = Schedule::from_analysis(&analyze(DOCUMENT, 2024));
    assert_eq!(schedule.days.len(), 3);
    assert_eq!(schedule.shoot_day_count(), 3);
    assert_eq!(schedule.day(date(11)).unwrap().sequences, ["12", "14"]);
    assert_eq!(schedule.day(date(12)).unwrap().sequences, ["15"]);
    assert_eq!(schedule.day(date(13)).unwrap().sequences, ["20"]);
    assert_eq!(
        schedule.period(),
        Period::Range {
            start: date(11),
            end: date(13)
        }
    );
}

#[test]
fn reassignment_rekeys_without_reanalysis() {
    let schedule = edited_schedule();
    let dates: Vec<NaiveDate> = schedule.days.iter().map(|day| day.date).collect();
    assert_eq!(dates, [date(11), date(12), date(13), date(15)]);
    assert_eq!(schedule.day(date(11)).unwrap().sequences, ["12"]);
    assert_eq!(schedule.day(date(15)).unwrap().day_type, DayType::Shoot);

    let grouped = schedule.sequences_by_date();
    assert_eq!(grouped[&date(15)], ["14"]);
    assert_eq!(grouped[&date(11)], ["12"]);
    assert_eq!(grouped.len(), 4);
}

#[test]
fn location_spans_cover_first_and_last_day() {
    let spans = location_spans(&edited_schedule());
    assert_eq!(spans["Paris"].start, date(11));
    assert_eq!(spans["Paris"].end, date(12));
    assert_eq!(spans["Studio"].start, date(13));
    assert_eq!(spans["Studio"].end, date(15));
}

#[test]
fn logistics_proposals() {
    let schedule = edited_schedule();
    let requests = [
        LogisticsRequest {
            id: "truck".to_string(),
            kind: LogisticsKind::Pickup,
            date: date(11),
            auto_update_dates: true,
            link: link_to_sequence("15"),
        },
        LogisticsRequest {
            id: "van".to_string(),
            kind: LogisticsKind::Dropoff,
            date: date(13),
            auto_update_dates: true,
            link: link_to_sequence("20"),
        },
        LogisticsRequest {
            id: "generator".to_string(),
            kind: LogisticsKind::PickupSet,
            date: date(8),
            auto_update_dates: true,
            link: link_to_sequence("12"),
        },
        LogisticsRequest {
            id: "manual".to_string(),
            kind: LogisticsKind::Usage,
            date: date(1),
            auto_update_dates: false,
            link: link_to_sequence("20"),
        },
        LogisticsRequest {
            id: "lights".to_string(),
            kind: LogisticsKind::Usage,
            date: date(13),
            auto_update_dates: true,
            link: ScheduleLink {
                linked_sequence_id: Some("12".to_string()),
                ..link_to_location("Studio", LinkType::Demontage, 1)
            },
        },
    ];

    let proposals = propose_logistics_shifts(&schedule, &requests);
    assert_eq!(
        proposals,
        [
            DateShiftProposal {
                item_id: "van".to_string(),
                current: date(13),
                proposed: date(14),
                reason: ShiftReason::Sequence {
                    sequence: "20".to_string()
                },
            },
            DateShiftProposal {
                item_id: "generator".to_string(),
                current: date(8),
                proposed: date(9),
                reason: ShiftReason::Sequence {
                    sequence: "12".to_string()
                },
            },
            DateShiftProposal {
                item_id: "lights".to_string(),
                current: date(13),
                proposed: date(16),
                reason: ShiftReason::Location {
                    location: "Studio".to_string()
                },
            },
        ]
    );
}

#[test]
fn reinforcement_proposals() {
    let schedule = edited_schedule();
    let assignments = [
        ReinforcementAssignment {
            id: "electro".to_string(),
            date: date(11),
            link: link_to_sequence("14"),
        },
        ReinforcementAssignment {
            id: "rigger".to_string(),
            date: date(11),
            link: link_to_location("Paris", LinkType::Prelight, -2),
        },
        ReinforcementAssignment {
            id: "grip".to_string(),
            date: date(11),
            link: link_to_location("Lyon", LinkType::Shooting, 0),
        },
        ReinforcementAssignment {
            id: "best-boy".to_string(),
            date: date(12),
            link: link_to_sequence("15"),
        },
    ];

    let proposals = propose_reinforcement_shifts(&schedule, &assignments);
    let summary: Vec<(&str, NaiveDate)> = proposals
        .iter()
        .map(|p| (p.item_id.as_str(), p.proposed))
        .collect();
    assert_eq!(summary, [("electro", date(15)), ("rigger", date(9))]);
    assert_eq!(proposals[1].reason.to_string(), "location Paris moved");
}

#[test]
fn requests_deserialize_from_camel_case() {
    let json = r#"{
        "id": "camion",
        "type": "pickup_set",
        "date": "2024-11-12",
        "autoUpdateDates": true,
        "linkedSequenceId": "12",
        "linkType": "DEMONTAGE",
        "dayOffset": -1
    }"#;
    let request: LogisticsRequest = serde_json::from_str(json).expect("decode request");
    assert_eq!(request.kind, LogisticsKind::PickupSet);
    assert_eq!(request.link.linked_sequence_id.as_deref(), Some("12"));
    assert_eq!(request.link.link_type, Some(LinkType::Demontage));
    assert_eq!(request.link.day_offset, -1);
    assert_eq!(request.link.linked_location, None);
}
