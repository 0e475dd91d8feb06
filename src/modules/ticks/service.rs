// Write path between the queue and the tick store.
//
// A connection-class failure is not an error for the caller: the ticks
// go back to the head of the queue and the health monitor takes over.
// Any other backend failure propagates.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::modules::ticks::ports::TickStore;
use crate::modules::ticks::queue::TickQueue;
use crate::shared::infrastructure::db_health::DbHealthMonitor;
use crate::shared::infrastructure::store::StoreError;

pub struct TickService {
    store: Arc<dyn TickStore>,
    queue: Arc<TickQueue>,
    health: Arc<DbHealthMonitor>,
}

impl TickService {
    pub fn new(
        store: Arc<dyn TickStore>,
        queue: Arc<TickQueue>,
        health: Arc<DbHealthMonitor>,
    ) -> Self {
        Self {
            store,
            queue,
            health,
        }
    }

    pub async fn write_one(&self, tick: DateTime<Utc>) -> Result<(), StoreError> {
        match self.store.insert_one(tick).await {
            Ok(()) => Ok(()),
            Err(err) => self.handle_write_failure(vec![tick], err).await,
        }
    }

    pub async fn write_batch(&self, ticks: Vec<DateTime<Utc>>) -> Result<(), StoreError> {
        if ticks.is_empty() {
            return Ok(());
        }
        match self.store.insert_batch(&ticks).await {
            Ok(()) => Ok(()),
            Err(err) => self.handle_write_failure(ticks, err).await,
        }
    }

    pub async fn list_all(&self) -> Result<Vec<DateTime<Utc>>, StoreError> {
        match self.store.list_all().await {
            Ok(ticks) => Ok(ticks),
            Err(err) => {
                if err.is_connection_problem() {
                    self.health.mark_unavailable();
                }
                Err(err)
            }
        }
    }

    async fn handle_write_failure(
        &self,
        ticks: Vec<DateTime<Utc>>,
        err: StoreError,
    ) -> Result<(), StoreError> {
        if err.is_connection_problem() {
            tracing::error!(
                error = %err,
                count = ticks.len(),
                "connection problem during tick write, re-queueing"
            );
            self.queue.return_to_head(ticks).await;
            self.health.mark_unavailable();
            // The ticks are safe in the queue; the consumer backs off via
            // the health flag rather than an error from here.
            Ok(())
        } else {
            tracing::error!(error = %err, "unexpected error during tick write");
            Err(err)
        }
    }
}
