// In memory implementation of the TickStore port, with the same failure
// injection affordances as the timer store.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::modules::ticks::ports::TickStore;
use crate::shared::infrastructure::store::{StoreError, StorePing};

#[derive(Default)]
pub struct InMemoryTickStore {
    rows: RwLock<Vec<DateTime<Utc>>>,
    offline: AtomicBool,
    fail_next: AtomicUsize,
}

impl InMemoryTickStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn fail_next(&self, n: usize) {
        self.fail_next.store(n, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("tick store offline".into()));
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
impl TickStore for InMemoryTickStore {
    async fn insert_one(&self, tick: DateTime<Utc>) -> Result<(), StoreError> {
        self.check_available()?;
        self.rows.write().await.push(tick);
        Ok(())
    }

    async fn insert_batch(&self, ticks: &[DateTime<Utc>]) -> Result<(), StoreError> {
        self.check_available()?;
        self.rows.write().await.extend_from_slice(ticks);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<DateTime<Utc>>, StoreError> {
        self.check_available()?;
        Ok(self.rows.read().await.clone())
    }
}

#[async_trait]
impl StorePing for InMemoryTickStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}

#[cfg(test)]
mod in_memory_tick_store_tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_store_singles_and_batches() {
        let store = InMemoryTickStore::new();
        let base: DateTime<Utc> = "2026-01-02T03:04:05Z".parse().unwrap();
        store.insert_one(base).await.unwrap();
        store
            .insert_batch(&[base + chrono::Duration::seconds(1)])
            .await
            .unwrap();
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_pings_while_offline() {
        let store = InMemoryTickStore::new();
        store.toggle_offline();
        assert!(store.ping().await.is_err());
        store.toggle_offline();
        assert!(store.ping().await.is_ok());
    }
}
