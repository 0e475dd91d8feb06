use std::sync::Arc;

use uuid::Uuid;

use crate::modules::timers::core::errors::TimerError;
use crate::modules::timers::core::state::Timer;
use crate::modules::timers::ports::TimerStore;
use crate::shared::infrastructure::store::retry_once;

pub struct GetTimerHandler {
    store: Arc<dyn TimerStore>,
}

impl GetTimerHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, id: Uuid) -> Result<Timer, TimerError> {
        retry_once(|| self.store.find_by_id(id))
            .await?
            .ok_or(TimerError::NotFound(id))
    }
}
