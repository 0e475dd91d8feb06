use std::sync::Arc;

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::modules::timers::core::errors::TimerError;
use crate::modules::timers::ports::TimerStore;
use crate::shared::infrastructure::store::retry_once;

pub struct TimerElapsedHandler {
    store: Arc<dyn TimerStore>,
}

impl TimerElapsedHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, id: Uuid) -> Result<Duration, TimerError> {
        let timer = retry_once(|| self.store.find_by_id(id))
            .await?
            .ok_or(TimerError::NotFound(id))?;
        timer.elapsed(Utc::now())
    }
}
