// In memory implementation of the TimerStore port.
//
// Purpose
// - Support handler tests and local development without a database.
// - `toggle_offline` and `fail_next` inject storage failures so callers
//   can exercise their unavailable and retry paths.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::modules::timers::core::state::{Timer, TimerStatus};
use crate::modules::timers::ports::TimerStore;
use crate::shared::infrastructure::store::StoreError;

#[derive(Default)]
pub struct InMemoryTimerStore {
    inner: RwLock<HashMap<Uuid, Timer>>,
    offline: AtomicBool,
    fail_next: AtomicUsize,
}

impl InMemoryTimerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    /// Fail the next `n` operations with a backend error, then recover.
    pub fn fail_next(&self, n: usize) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("timer store offline".into()));
        }
        let injected = self
            .fail_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if injected {
            return Err(StoreError::Backend("injected failure".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl TimerStore for InMemoryTimerStore {
    async fn insert(&self, timer: &Timer) -> Result<(), StoreError> {
        self.check_available()?;
        let mut guard = self.inner.write().await;
        if guard.contains_key(&timer.id) {
            return Err(StoreError::Backend(format!(
                "timer {} already exists",
                timer.id
            )));
        }
        guard.insert(timer.id, timer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Timer>, StoreError> {
        self.check_available()?;
        Ok(self.inner.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Timer>, StoreError> {
        self.check_available()?;
        Ok(self.inner.read().await.values().cloned().collect())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        self.check_available()?;
        Ok(self.inner.write().await.remove(&id).is_some())
    }

    async fn update_if_status(
        &self,
        id: Uuid,
        expected: TimerStatus,
        updated: &Timer,
    ) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut guard = self.inner.write().await;
        match guard.get_mut(&id) {
            Some(current) if current.status == expected => {
                *current = updated.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
