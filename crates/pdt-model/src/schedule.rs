//! Persisted schedule shape consumed by the reconciliation layer.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of calendar day in a shooting schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayType {
    #[default]
    Shoot,
    Prep,
    Off,
    Travel,
    Wrap,
}

impl DayType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Shoot => "SHOOT",
            DayType::Prep => "PREP",
            DayType::Off => "OFF",
            DayType::Travel => "TRAVEL",
            DayType::Wrap => "WRAP",
        }
    }

    /// Classify a free-text type cell by substring.
    ///
    /// Order matters: `PREP` wins over `OFF`, which wins over `TRAVEL`, then
    /// `WRAP`; anything else is a shooting day. Accented capitals are folded so
    /// `Prépa` reads as `PREPA`.
    pub fn classify(raw: &str) -> Self {
        let upper: String = raw
            .to_uppercase()
            .chars()
            .map(|c| match c {
                'É' | 'È' | 'Ê' | 'Ë' => 'E',
                other => other,
            })
            .collect();
        if upper.contains("PREP") {
            DayType::Prep
        } else if upper.contains("OFF") || upper.contains("REPOS") {
            DayType::Off
        } else if upper.contains("TRAVEL") || upper.contains("VOYAGE") {
            DayType::Travel
        } else if upper.contains("WRAP") || upper.contains("FIN") {
            DayType::Wrap
        } else {
            DayType::Shoot
        }
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SHOOT" => Ok(DayType::Shoot),
            "PREP" => Ok(DayType::Prep),
            "OFF" => Ok(DayType::Off),
            "TRAVEL" => Ok(DayType::Travel),
            "WRAP" => Ok(DayType::Wrap),
            other => Err(format!("unknown day type: {other}")),
        }
    }
}

/// One calendar row of the schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdtDay {
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub day_type: DayType,
    #[serde(default)]
    pub location: String,
    /// Decor / set name.
    #[serde(default)]
    pub set: String,
    #[serde(default)]
    pub sequences: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub extras: String,
    #[serde(default)]
    pub notes: String,
    /// Canonical location used to link logistics, when set by an operator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linked_location: Option<String>,
}

impl PdtDay {
    pub fn new(date: NaiveDate, day_type: DayType) -> Self {
        Self {
            date,
            day_type,
            location: String::new(),
            set: String::new(),
            sequences: Vec::new(),
            cast: Vec::new(),
            extras: String::new(),
            notes: String::new(),
            linked_location: None,
        }
    }

    /// Location key used for linking: the linked location, else the free text.
    pub fn location_key(&self) -> Option<&str> {
        self.linked_location
            .as_deref()
            .or(Some(self.location.as_str()))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }
}

/// A sequence id and the day it is scheduled on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdtSequence {
    pub id: String,
    /// `None` when the document carried no usable date.
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
