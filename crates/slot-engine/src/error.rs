//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SlotError {
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid candidate step: {0} minutes")]
    InvalidStep(i64),

    #[error("Invalid event type: {0}")]
    InvalidEventType(String),

    #[error("Event type is not active: {0}")]
    EventInactive(String),

    #[error("Invalid booking: {0}")]
    InvalidBooking(String),

    #[error("Local time {0} does not exist in {1}")]
    NonexistentLocalTime(String, String),

    #[error("Slot is not available: {0}")]
    SlotUnavailable(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
