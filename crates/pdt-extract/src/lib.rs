//! Date and sequence extraction for shooting schedules (PDT).
//!
//! The engine runs independent strategies over the document text (grid,
//! numeric, French textual, split-line textual, sequential day counter,
//! sequence tokens), each recording its decisions in a structured trace, and
//! reconciles their results with an explicit policy.

pub mod engine;
pub mod error;
mod grid;
mod ledger;
mod lexicon;
mod numeric;
pub mod offset;
pub mod options;
pub mod oracle;
pub mod reconcile;
pub mod sequences;
mod textual;
pub mod vertical;
pub mod year;

pub use engine::{analyze, analyze_with_options};
pub use error::{AcquisitionError, OracleError};
pub use offset::{ShootingDayOffset, detect_shooting_day_offset};
pub use options::ExtractOptions;
pub use oracle::{
    OracleResponse, ScheduleOracle, SourceDocument, TextSource, accept_oracle_response,
    analyze_document, audit_dates,
};
pub use reconcile::{Reconciled, reconcile};
pub use sequences::scan_sequences;
pub use vertical::sequential_day_count;
pub use year::{DocumentYear, detect_document_year};
