use std::sync::Arc;

use crate::modules::timers::core::errors::TimerError;
use crate::modules::timers::core::state::Timer;
use crate::modules::timers::ports::TimerStore;
use crate::shared::infrastructure::store::retry_once;

pub struct ListTimersHandler {
    store: Arc<dyn TimerStore>,
}

impl ListTimersHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self) -> Result<Vec<Timer>, TimerError> {
        let mut timers = retry_once(|| self.store.list_all()).await?;
        timers.sort_by_key(|t| (t.created_at, t.id));
        Ok(timers)
    }
}
