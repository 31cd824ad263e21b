use thiserror::Error;

/// Failure of the optional AI pre-pass. Always recovered by the regex engine.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("no AI pre-pass configured")]
    NotConfigured,
    #[error("AI pre-pass unavailable: {0}")]
    Unavailable(String),
    #[error("AI pre-pass timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("AI returned empty or invalid result")]
    Empty,
    #[error("AI returned a malformed date: {0}")]
    MalformedDate(String),
    #[error("AI response could not be decoded: {0}")]
    Decode(String),
}

/// Failure to turn a source document into text. Terminal for the caller.
#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot read document {name}: {reason}")]
    Unreadable { name: String, reason: String },
}
