use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("sequence {0} is not in the schedule")]
    UnknownSequence(String),
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
