//! Error types for slot-engine operations.

use thiserror::Error;

/// Every failure the engine can report.
///
/// All variants describe caller input the engine refused; none of them come
/// from I/O or internal state, because the engine has neither.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid step: {0}")]
    InvalidStep(String),

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SlotError {
    /// Whether this error should be reported to a client as a rejected request
    /// (HTTP 400). Currently true for every variant.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            SlotError::InvalidDate(_)
                | SlotError::InvalidTime(_)
                | SlotError::InvalidDuration(_)
                | SlotError::InvalidStep(_)
                | SlotError::InvalidSchedule(_)
                | SlotError::InvalidRequest(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, SlotError>;
