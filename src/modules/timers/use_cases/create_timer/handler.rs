use std::sync::Arc;

use chrono::Utc;

use crate::modules::timers::core::errors::TimerError;
use crate::modules::timers::core::state::Timer;
use crate::modules::timers::ports::TimerStore;
use crate::modules::timers::use_cases::create_timer::command::CreateTimer;
use crate::shared::infrastructure::store::retry_once;

pub struct CreateTimerHandler {
    store: Arc<dyn TimerStore>,
}

impl CreateTimerHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, command: CreateTimer) -> Result<Timer, TimerError> {
        let timer = Timer::new(&command.name, Utc::now())?;
        retry_once(|| self.store.insert(&timer)).await?;
        tracing::debug!(timer_id = %timer.id, name = %timer.name, "timer created");
        Ok(timer)
    }
}

#[cfg(test)]
mod create_timer_handler_tests {
    use super::*;
    use crate::modules::timers::adapters::outbound::store_in_memory::InMemoryTimerStore;
    use crate::modules::timers::core::state::TimerStatus;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_create_an_idle_timer() {
        let store = Arc::new(InMemoryTimerStore::new());
        let handler = CreateTimerHandler::new(store.clone());

        let timer = handler
            .handle(CreateTimer {
                name: "pomodoro".into(),
            })
            .await
            .expect("create failed");

        assert_eq!(timer.status, TimerStatus::Idle);
        assert_eq!(timer.started_at, None);
        assert_eq!(timer.stopped_at, None);
        assert_eq!(store.find_by_id(timer.id).await.unwrap(), Some(timer));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_an_empty_name_without_touching_the_store() {
        let store = Arc::new(InMemoryTimerStore::new());
        store.toggle_offline();
        let handler = CreateTimerHandler::new(store);

        let result = handler.handle(CreateTimer { name: "  ".into() }).await;
        assert!(matches!(result, Err(TimerError::Validation(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_retry_a_transient_store_failure() {
        let store = Arc::new(InMemoryTimerStore::new());
        store.fail_next(1);
        let handler = CreateTimerHandler::new(store);

        let result = handler
            .handle(CreateTimer {
                name: "pomodoro".into(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_a_persistent_store_failure() {
        let store = Arc::new(InMemoryTimerStore::new());
        store.toggle_offline();
        let handler = CreateTimerHandler::new(store);

        let result = handler
            .handle(CreateTimer {
                name: "pomodoro".into(),
            })
            .await;
        assert!(matches!(result, Err(TimerError::Store(_))));
    }
}
