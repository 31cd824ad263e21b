use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdtError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("invalid period: {0}")]
    InvalidPeriod(String),
}
