use chrono::NaiveDate;
use thiserror::Error;

use crate::tasks::COMPETITION_DAYS;

/// Failures from the remote task store.
///
/// Both variants are recovered locally by falling back to the compiled-in
/// data. They are logged at the point of recovery and never surface to a
/// request handler.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unavailable(String),

    #[error("malformed stored document: {0}")]
    Malformed(String),
}

impl From<redis::RedisError> for StoreError {
    fn from(err: redis::RedisError) -> Self {
        Self::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// A competition window that cannot host the fixed 7-task schedule.
///
/// This is a configuration defect, checked once at startup and treated as
/// fatal there. It is never produced per request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum WindowError {
    #[error("window starts {start} but ends {end}")]
    Reversed { start: NaiveDate, end: NaiveDate },

    #[error("window spans {got} days, expected {COMPETITION_DAYS}")]
    WrongSpan { got: i64 },
}
