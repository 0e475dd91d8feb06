use std::sync::Arc;

use uuid::Uuid;

use crate::modules::timers::core::errors::TimerError;
use crate::modules::timers::ports::TimerStore;
use crate::shared::infrastructure::store::retry_once;

pub struct DeleteTimerHandler {
    store: Arc<dyn TimerStore>,
}

impl DeleteTimerHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, id: Uuid) -> Result<(), TimerError> {
        let deleted = retry_once(|| self.store.delete_by_id(id)).await?;
        if !deleted {
            return Err(TimerError::NotFound(id));
        }
        tracing::debug!(timer_id = %id, "timer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod delete_timer_handler_tests {
    use super::*;
    use crate::modules::timers::adapters::outbound::store_in_memory::InMemoryTimerStore;
    use crate::modules::timers::core::state::Timer;
    use chrono::Utc;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_delete_an_existing_timer() {
        let store = Arc::new(InMemoryTimerStore::new());
        let timer = Timer::new("pomodoro", Utc::now()).unwrap();
        store.insert(&timer).await.unwrap();

        DeleteTimerHandler::new(store.clone())
            .handle(timer.id)
            .await
            .expect("delete failed");
        assert_eq!(store.find_by_id(timer.id).await.unwrap(), None);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_with_not_found_for_an_unknown_id() {
        let store = Arc::new(InMemoryTimerStore::new());
        let id = Uuid::now_v7();
        let result = DeleteTimerHandler::new(store).handle(id).await;
        assert_eq!(result.unwrap_err(), TimerError::NotFound(id));
    }
}
