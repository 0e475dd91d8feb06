// Start transition: Idle -> Running.
//
// The write goes through the store's compare-and-set so concurrent
// starts on one id cannot both win; the loser is told the state moved.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::modules::timers::core::errors::TimerError;
use crate::modules::timers::core::state::{Timer, TimerStatus};
use crate::modules::timers::ports::TimerStore;
use crate::shared::infrastructure::store::retry_once;

pub struct StartTimerHandler {
    store: Arc<dyn TimerStore>,
}

impl StartTimerHandler {
    pub fn new(store: Arc<dyn TimerStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, id: Uuid) -> Result<Timer, TimerError> {
        let current = retry_once(|| self.store.find_by_id(id))
            .await?
            .ok_or(TimerError::NotFound(id))?;
        let started = current.start(Utc::now())?;

        let swapped = retry_once(|| self.store.update_if_status(id, TimerStatus::Idle, &started))
            .await?;
        if !swapped {
            return Err(self.losing_side_error(id).await?);
        }
        tracing::debug!(timer_id = %id, "timer started");
        Ok(started)
    }

    // The CAS lost: re-read to report the state that beat us.
    async fn losing_side_error(&self, id: Uuid) -> Result<TimerError, TimerError> {
        match self.store.find_by_id(id).await? {
            Some(current) => Ok(TimerError::InvalidState {
                action: "start",
                status: current.status,
            }),
            None => Ok(TimerError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod start_timer_handler_tests {
    use super::*;
    use crate::modules::timers::adapters::outbound::store_in_memory::InMemoryTimerStore;
    use crate::modules::timers::core::state::Timer;
    use rstest::{fixture, rstest};
    use tokio::join;

    #[fixture]
    fn store() -> Arc<InMemoryTimerStore> {
        Arc::new(InMemoryTimerStore::new())
    }

    async fn seed_idle(store: &Arc<InMemoryTimerStore>) -> Timer {
        let timer = Timer::new("pomodoro", Utc::now()).unwrap();
        store.insert(&timer).await.unwrap();
        timer
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_start_an_idle_timer(store: Arc<InMemoryTimerStore>) {
        let timer = seed_idle(&store).await;
        let handler = StartTimerHandler::new(store.clone());

        let started = handler.handle(timer.id).await.expect("start failed");
        assert_eq!(started.status, TimerStatus::Running);
        assert!(started.started_at.is_some());

        let stored = store.find_by_id(timer.id).await.unwrap().unwrap();
        assert_eq!(stored, started);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_with_not_found_for_an_unknown_id(store: Arc<InMemoryTimerStore>) {
        let handler = StartTimerHandler::new(store);
        let id = Uuid::now_v7();
        assert_eq!(handler.handle(id).await.unwrap_err(), TimerError::NotFound(id));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_reject_starting_a_running_timer(store: Arc<InMemoryTimerStore>) {
        let timer = seed_idle(&store).await;
        let handler = StartTimerHandler::new(store);

        handler.handle(timer.id).await.expect("first start failed");
        let result = handler.handle(timer.id).await;
        assert_eq!(
            result.unwrap_err(),
            TimerError::InvalidState {
                action: "start",
                status: TimerStatus::Running
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_let_exactly_one_concurrent_start_win(store: Arc<InMemoryTimerStore>) {
        let timer = seed_idle(&store).await;
        let handler1 = StartTimerHandler::new(store.clone());
        let handler2 = StartTimerHandler::new(store);

        let (r1, r2) = join!(handler1.handle(timer.id), handler2.handle(timer.id));
        assert!(
            r1.is_ok() ^ r2.is_ok(),
            "exactly one start should win: {r1:?} / {r2:?}"
        );
        let err = r1.err().or(r2.err()).unwrap();
        assert!(matches!(err, TimerError::InvalidState { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_retry_a_transient_store_failure(store: Arc<InMemoryTimerStore>) {
        let timer = seed_idle(&store).await;
        store.fail_next(1);
        let handler = StartTimerHandler::new(store);
        assert!(handler.handle(timer.id).await.is_ok());
    }
}
