//! Schedule assembled from an analysis, editable without re-running it.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use pdt_ingest::MatrixImport;
use pdt_model::{
    AnalysisResult, DayType, DetectedDate, PdtDay, PdtSequence, Period, SequenceToken,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, ScheduleError};

/// Day rows and sequence assignments of a production.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Sorted by date, one row per date (see [`Schedule::new`]).
    pub days: Vec<PdtDay>,
    pub sequences: Vec<PdtSequence>,
}

/// Date of the closest detected date at or above `line`, else the first date
/// of the document.
fn attributed_date(dates: &[DetectedDate], line: usize) -> Option<NaiveDate> {
    let mut preceding: Option<&DetectedDate> = None;
    for candidate in dates.iter().filter(|d| d.line <= line) {
        if preceding.is_none_or(|best| candidate.line > best.line) {
            preceding = Some(candidate);
        }
    }
    preceding
        .or_else(|| dates.iter().min_by_key(|d| d.line))
        .map(|d| d.date)
}

fn fill_if_empty(target: &mut String, value: String) {
    if target.trim().is_empty() {
        *target = value;
    }
}

fn append_unique(target: &mut Vec<String>, values: Vec<String>) {
    for value in values {
        if !target.contains(&value) {
            target.push(value);
        }
    }
}

/// Fold `other` into `day`: the first row keeps its type and text fields,
/// blanks are filled from later rows, sequences and cast are unioned.
fn merge_day(day: &mut PdtDay, other: PdtDay) {
    fill_if_empty(&mut day.location, other.location);
    fill_if_empty(&mut day.set, other.set);
    fill_if_empty(&mut day.extras, other.extras);
    fill_if_empty(&mut day.notes, other.notes);
    if day.linked_location.is_none() {
        day.linked_location = other.linked_location;
    }
    append_unique(&mut day.sequences, other.sequences);
    append_unique(&mut day.cast, other.cast);
}

impl Schedule {
    /// Rows sharing a date are merged into the first of them.
    pub fn new(days: Vec<PdtDay>, sequences: Vec<PdtSequence>) -> Self {
        let mut merged: BTreeMap<NaiveDate, PdtDay> = BTreeMap::new();
        for day in days {
            match merged.get_mut(&day.date) {
                Some(existing) => {
                    debug!(date = %day.date, "merging duplicate day row");
                    merge_day(existing, day);
                }
                None => {
                    merged.insert(day.date, day);
                }
            }
        }
        Self {
            days: merged.into_values().collect(),
            sequences,
        }
    }

    /// One shooting day per detected date; every sequence token is attached
    /// to the nearest date above it in the document.
    pub fn from_analysis(result: &AnalysisResult) -> Self {
        let mut days: Vec<PdtDay> = result
            .sorted_dates()
            .into_iter()
            .map(|date| PdtDay::new(date, DayType::Shoot))
            .collect();

        let sequences: Vec<PdtSequence> = result
            .sequences
            .iter()
            .map(|token: &SequenceToken| PdtSequence {
                id: token.id.clone(),
                date: attributed_date(&result.dates, token.line),
                description: None,
            })
            .collect();

        for sequence in &sequences {
            if let Some(day) = sequence
                .date
                .and_then(|date| days.iter_mut().find(|day| day.date == date))
            {
                day.sequences.push(sequence.id.clone());
            }
        }
        debug!(
            days = days.len(),
            sequences = sequences.len(),
            "schedule assembled from analysis"
        );
        Self::new(days, sequences)
    }

    pub fn day(&self, date: NaiveDate) -> Option<&PdtDay> {
        self.days.iter().find(|day| day.date == date)
    }

    pub fn shoot_day_count(&self) -> usize {
        self.days
            .iter()
            .filter(|day| day.day_type == DayType::Shoot)
            .count()
    }

    /// First to last shooting day.
    pub fn period(&self) -> Period {
        let mut shoot = self
            .days
            .iter()
            .filter(|day| day.day_type == DayType::Shoot)
            .map(|day| day.date);
        match shoot.next() {
            Some(first) => Period::Range {
                start: first,
                end: shoot.last().unwrap_or(first),
            },
            None => Period::Unknown,
        }
    }

    /// Move a sequence to another date (human override).
    ///
    /// The id leaves every day row and joins the row of `date`; a shooting
    /// day is created when the schedule has no row for that date.
    pub fn reassign_sequence(&mut self, id: &str, date: NaiveDate) -> Result<()> {
        let mut found = false;
        for sequence in self.sequences.iter_mut().filter(|s| s.id == id) {
            sequence.date = Some(date);
            found = true;
        }
        if !found {
            return Err(ScheduleError::UnknownSequence(id.to_string()));
        }

        for day in &mut self.days {
            day.sequences.retain(|existing| existing != id);
        }
        match self.days.binary_search_by_key(&date, |day| day.date) {
            Ok(index) => self.days[index].sequences.push(id.to_string()),
            Err(index) => {
                let mut day = PdtDay::new(date, DayType::Shoot);
                day.sequences.push(id.to_string());
                self.days.insert(index, day);
            }
        }
        info!(sequence = id, date = %date, "sequence reassigned");
        Ok(())
    }

    /// Sequence ids per date, ordered by numeric prefix then id.
    pub fn sequences_by_date(&self) -> BTreeMap<NaiveDate, Vec<String>> {
        let mut grouped: BTreeMap<NaiveDate, Vec<String>> = BTreeMap::new();
        for sequence in &self.sequences {
            if let Some(date) = sequence.date {
                grouped.entry(date).or_default().push(sequence.id.clone());
            }
        }
        for ids in grouped.values_mut() {
            ids.sort_by(|a, b| {
                SequenceToken::numeric_prefix(a)
                    .cmp(&SequenceToken::numeric_prefix(b))
                    .then_with(|| a.cmp(b))
            });
            ids.dedup();
        }
        grouped
    }
}

impl From<MatrixImport> for Schedule {
    fn from(import: MatrixImport) -> Self {
        Schedule::new(import.days, import.sequences)
    }
}
