//! Document loading and analysis dispatch for the `analyze` command.

use std::fs;
use std::path::{Path, PathBuf};

use pdt_extract::{
    AcquisitionError, ExtractOptions, OracleError, OracleResponse, ScheduleOracle, SourceDocument,
    TextSource, analyze_document,
};
use pdt_ingest::{
    CellTable, IngestError, flatten_table, fragments_from_json, parse_matrix, read_cell_table,
    reconstruct_text,
};
use pdt_schedule::Schedule;
use tracing::{debug, info, info_span, trace};

use crate::logging::redact_value;
use crate::types::{DocumentAnalysis, InputKind};

/// Inputs of one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest {
    pub path: PathBuf,
    pub current_year: i32,
    pub options: ExtractOptions,
    /// Saved AI pre-pass response used as the oracle.
    pub ai_result: Option<PathBuf>,
}

fn unreadable(document: &SourceDocument, reason: impl ToString) -> AcquisitionError {
    AcquisitionError::Unreadable {
        name: document.name.clone(),
        reason: reason.to_string(),
    }
}

fn input_kind(document: &SourceDocument) -> InputKind {
    match document.extension().as_deref() {
        Some("csv") => InputKind::Spreadsheet,
        Some("json") => InputKind::Fragments,
        _ => InputKind::Text,
    }
}

fn read_table(document: &SourceDocument) -> Result<CellTable, AcquisitionError> {
    read_cell_table(document.bytes.as_slice()).map_err(|err| unreadable(document, err))
}

/// Text acquisition by file extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextSource;

impl TextSource for FileTextSource {
    fn extract_text(&self, document: &SourceDocument) -> Result<String, AcquisitionError> {
        let text = match input_kind(document) {
            InputKind::Spreadsheet | InputKind::Matrix => flatten_table(&read_table(document)?),
            InputKind::Fragments => {
                let raw = std::str::from_utf8(&document.bytes)
                    .map_err(|err| unreadable(document, err))?;
                let fragments = fragments_from_json(raw).map_err(|err| unreadable(document, err))?;
                debug!(fragments = fragments.len(), "positioned fragments loaded");
                reconstruct_text(&fragments)
            }
            InputKind::Text => String::from_utf8(document.bytes.clone())
                .map_err(|err| unreadable(document, err))?,
        };
        trace!(text = redact_value(&text), "document text");
        Ok(text)
    }
}

/// Oracle backed by a saved AI response file.
#[derive(Debug, Clone)]
pub struct ResultFileOracle {
    pub path: PathBuf,
}

impl ScheduleOracle for ResultFileOracle {
    fn analyze(&self, _document: &SourceDocument) -> Result<OracleResponse, OracleError> {
        let raw = fs::read_to_string(&self.path).map_err(|err| {
            OracleError::Unavailable(format!("{}: {err}", self.path.display()))
        })?;
        OracleResponse::from_json(&raw)
    }
}

pub fn load_document(path: &Path) -> Result<SourceDocument, AcquisitionError> {
    let bytes = fs::read(path)?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceDocument::new(name, bytes))
}

/// Conforming spreadsheet with at least one valid row, read as a matrix.
fn try_matrix(document: &SourceDocument) -> Result<Option<DocumentAnalysis>, AcquisitionError> {
    let table = read_table(document)?;
    match parse_matrix(&table) {
        Ok(import) if !import.days.is_empty() => {
            let result = import.to_analysis();
            Ok(Some(DocumentAnalysis {
                document: document.name.clone(),
                input: InputKind::Matrix,
                result,
                schedule: Schedule::from(import),
            }))
        }
        Ok(_) => {
            debug!("matrix has no valid rows, flattening");
            Ok(None)
        }
        Err(IngestError::NonConformingHeaders { missing }) => {
            debug!(missing = ?missing, "not a matrix, flattening");
            Ok(None)
        }
        Err(err) => Err(unreadable(document, err)),
    }
}

/// Read, dispatch and analyse one document.
pub fn analyze_path(request: &AnalyzeRequest) -> Result<DocumentAnalysis, AcquisitionError> {
    let document = load_document(&request.path)?;
    let span = info_span!("analyze", document = %document.name);
    let _guard = span.enter();

    let input = input_kind(&document);
    if input == InputKind::Spreadsheet
        && let Some(analysis) = try_matrix(&document)?
    {
        info!(days = analysis.schedule.days.len(), "matrix imported");
        return Ok(analysis);
    }

    let oracle = request
        .ai_result
        .clone()
        .map(|path| ResultFileOracle { path });
    let result = analyze_document(
        &document,
        oracle.as_ref().map(|oracle| oracle as &dyn ScheduleOracle),
        &FileTextSource,
        request.current_year,
        &request.options,
    )?;
    let schedule = Schedule::from_analysis(&result);
    Ok(DocumentAnalysis {
        document: document.name,
        input,
        result,
        schedule,
    })
}
