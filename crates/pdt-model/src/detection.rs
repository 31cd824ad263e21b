//! Typed partial results produced by the extraction strategies.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::format_display;

/// Which strategy produced a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DateStrategy {
    /// `DD/MM/YYYY`, `DD-MM-YY`, `DD.MM.YYYY` tokens on a single line.
    Numeric,
    /// `<day> <French month name>` on a single line.
    FrenchTextual,
    /// Day-number row paired with a month-name row in a calendar grid.
    Grid,
    /// `<day> <month>` split across lines, found on the whole text.
    TextualSplitFallback,
    /// Date list returned by the AI pre-pass.
    Oracle,
    /// Date cell of a structured spreadsheet.
    Matrix,
}

impl DateStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateStrategy::Numeric => "numeric",
            DateStrategy::FrenchTextual => "french-textual",
            DateStrategy::Grid => "grid",
            DateStrategy::TextualSplitFallback => "textual-split-fallback",
            DateStrategy::Oracle => "oracle",
            DateStrategy::Matrix => "matrix",
        }
    }
}

impl fmt::Display for DateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A calendar date found in the document, with provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedDate {
    pub date: NaiveDate,
    pub strategy: DateStrategy,
    /// Substring that produced the date (line breaks collapsed to spaces).
    pub raw: String,
    /// Zero-based line index where the match starts.
    pub line: usize,
}

impl DetectedDate {
    pub fn display(&self) -> String {
        format_display(self.date)
    }
}

/// Interior/exterior scene-heading marker that follows a sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SceneMarker {
    Int,
    Ext,
    /// `I/E`
    IntExt,
    /// `E/I`
    ExtInt,
    /// `I/J`
    IntDay,
    /// `E/J`
    ExtDay,
    /// `I/N`
    IntNight,
    /// `E/N`
    ExtNight,
}

impl SceneMarker {
    /// Parse a marker as matched in the text, tolerating inner whitespace and case.
    pub fn parse(value: &str) -> Option<Self> {
        let compact: String = value
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        match compact.as_str() {
            "INT" => Some(SceneMarker::Int),
            "EXT" => Some(SceneMarker::Ext),
            "I/E" => Some(SceneMarker::IntExt),
            "E/I" => Some(SceneMarker::ExtInt),
            "I/J" => Some(SceneMarker::IntDay),
            "E/J" => Some(SceneMarker::ExtDay),
            "I/N" => Some(SceneMarker::IntNight),
            "E/N" => Some(SceneMarker::ExtNight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SceneMarker::Int => "INT",
            SceneMarker::Ext => "EXT",
            SceneMarker::IntExt => "I/E",
            SceneMarker::ExtInt => "E/I",
            SceneMarker::IntDay => "I/J",
            SceneMarker::ExtDay => "E/J",
            SceneMarker::IntNight => "I/N",
            SceneMarker::ExtNight => "E/N",
        }
    }
}

impl fmt::Display for SceneMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a sequence token was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SequenceMatch {
    /// Number followed by a scene-heading marker (high confidence).
    Contextual,
    /// Line consisting of the number only.
    Standalone,
    /// Number at the start of a line, followed by whitespace.
    LineStart,
    /// Entry of the sequences cell of a structured spreadsheet.
    Cell,
}

/// A scene/sequence identifier such as `12`, `36A` or `5B`.
///
/// Engine results hold each id once; a spreadsheet import holds one token per
/// sequences-cell entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceToken {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<SceneMarker>,
    pub kind: SequenceMatch,
    /// Zero-based line index of the first occurrence.
    pub line: usize,
}

impl SequenceToken {
    /// Numeric prefix of the id (`"36A"` -> 36), used for natural ordering.
    pub fn numeric_prefix(id: &str) -> Option<u64> {
        let digits: String = id.chars().take_while(char::is_ascii_digit).collect();
        digits.parse().ok()
    }
}
