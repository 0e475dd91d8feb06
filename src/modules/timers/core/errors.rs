use thiserror::Error;
use uuid::Uuid;

use crate::modules::timers::core::state::TimerStatus;
use crate::shared::infrastructure::store::StoreError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimerError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("timer {0} not found")]
    NotFound(Uuid),

    #[error("cannot {action} a timer in the {status} state")]
    InvalidState {
        action: &'static str,
        status: TimerStatus,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}
