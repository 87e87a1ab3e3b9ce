use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimelineError {
    #[error("No valid activities found. Please use the format '09:00 - 09:15 Activity'.")]
    NoActivities,

    #[error("Invalid table layout: {reason}")]
    InvalidLayout { reason: String },
}

pub type TimelineResult<T> = Result<T, TimelineError>;
