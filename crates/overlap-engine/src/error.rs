//! Error types for overlap-engine operations.

use chrono::{NaiveDate, NaiveTime};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlapError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    #[error("Empty range on {date}: end {end} is not after start {start}")]
    EmptyRange {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("Local time {date} {time} does not exist in {timezone} (DST gap)")]
    NonexistentLocalTime {
        date: NaiveDate,
        time: NaiveTime,
        timezone: String,
    },

    #[error("User name must not be empty")]
    EmptyUser,

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    #[error("Share token error: {0}")]
    ShareToken(String),

    #[error("Invalid schedule id '{0}': use letters, digits, '-' or '_'")]
    InvalidScheduleId(String),

    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, OverlapError>;
