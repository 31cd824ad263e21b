use std::fmt;

use pdt_model::AnalysisResult;
use pdt_schedule::Schedule;

/// How a document was read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Spreadsheet with the eight matrix columns.
    Matrix,
    /// Spreadsheet flattened to text for the engine.
    Spreadsheet,
    /// JSON dump of positioned PDF text fragments.
    Fragments,
    Text,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InputKind::Matrix => "matrix spreadsheet",
            InputKind::Spreadsheet => "free-form spreadsheet",
            InputKind::Fragments => "PDF text fragments",
            InputKind::Text => "plain text",
        })
    }
}

#[derive(Debug)]
pub struct DocumentAnalysis {
    pub document: String,
    pub input: InputKind,
    pub result: AnalysisResult,
    pub schedule: Schedule,
}

impl DocumentAnalysis {
    /// One-line summary, e.g. `10 shooting days, 4 sequences, 04/10/2024 - 17/10/2024`.
    pub fn headline(&self) -> String {
        format!(
            "{} shooting days, {} sequences, {}",
            self.result.date_count, self.result.sequence_count, self.result.period
        )
    }
}
