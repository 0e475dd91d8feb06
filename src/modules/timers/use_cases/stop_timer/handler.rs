// Stop transition: Running -> Stopped. Same compare-and-set discipline
// as start, expecting Running.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::modules::timers::core::errors::TimerError;
use crate::modules::timers::core::state::{Timer, TimerStatus};
use crate::modules::timers::ports::TimerStore;
use crate::shared::infrastructure::store::retry_once;

pub struct StopTimerHandler {
    store: Arc<dyn TimerStore>,
}

impl StopTimerHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, id: Uuid) -> Result<Timer, TimerError> {
        let current = retry_once(|| self.store.find_by_id(id))
            .await?
            .ok_or(TimerError::NotFound(id))?;
        let stopped = current.stop(Utc::now())?;

        let swapped =
            retry_once(|| self.store.update_if_status(id, TimerStatus::Running, &stopped)).await?;
        if !swapped {
            return match self.store.find_by_id(id).await? {
                Some(current) => Err(TimerError::InvalidState {
                    action: "stop",
                    status: current.status,
                }),
                None => Err(TimerError::NotFound(id)),
            };
        }
        tracing::debug!(timer_id = %id, "timer stopped");
        Ok(stopped)
    }
}
