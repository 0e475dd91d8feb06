// Background consumer draining the tick queue into the store.
//
// Small backlog: write one tick at a time. Backlog at or above the
// threshold: switch to batches. While the database is marked
// unavailable the queue is left alone entirely.
//
// One iteration failing must never kill the loop.

use std::sync::Arc;
use std::time::Duration;

use crate::modules::ticks::queue::TickQueue;
use crate::modules::ticks::service::TickService;
use crate::shared::infrastructure::db_health::DbHealthMonitor;

#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub empty_queue_sleep: Duration,
    pub db_unavailable_sleep: Duration,
    pub batch_threshold: usize,
    pub max_batch_size: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Iteration {
    DbUnavailable,
    QueueEmpty,
    WroteOne,
    WroteBatch(usize),
    Failed,
}

pub struct TickConsumer {
    queue: Arc<TickQueue>,
    service: Arc<TickService>,
    health: Arc<DbHealthMonitor>,
    config: ConsumerConfig,
}

impl TickConsumer {
    pub fn new(
        queue: Arc<TickQueue>,
        service: Arc<TickService>,
        health: Arc<DbHealthMonitor>,
        config: ConsumerConfig,
    ) -> Self {
        Self {
            queue,
            service,
            health,
            config,
        }
    }

    pub async fn run(self: Arc<Self>) {
        tracing::info!("tick consumer started");
        loop {
            match self.run_once().await {
                Iteration::DbUnavailable => {
                    tokio::time::sleep(self.config.db_unavailable_sleep).await;
                }
                Iteration::QueueEmpty => {
                    tokio::time::sleep(self.config.empty_queue_sleep).await;
                }
                Iteration::WroteOne | Iteration::WroteBatch(_) => {}
                Iteration::Failed => {
                    // A connection-class failure already flipped the health
                    // flag; back off either way instead of spinning.
                    if !self.health.is_available() {
                        tokio::time::sleep(self.config.db_unavailable_sleep).await;
                    } else {
                        tokio::time::sleep(self.config.empty_queue_sleep).await;
                    }
                }
            }
        }
    }

    pub async fn run_once(&self) -> Iteration {
        if !self.health.is_available() {
            return Iteration::DbUnavailable;
        }

        let queue_len = self.queue.len().await;
        if queue_len == 0 {
            return Iteration::QueueEmpty;
        }

        if queue_len < self.config.batch_threshold {
            let one = self.queue.drain_up_to(1).await;
            let Some(tick) = one.first().copied() else {
                return Iteration::QueueEmpty;
            };
            match self.service.write_one(tick).await {
                Ok(()) => {
                    tracing::debug!(%tick, "wrote single tick");
                    Iteration::WroteOne
                }
                Err(err) => {
                    tracing::error!(error = %err, "tick consumer iteration failed");
                    Iteration::Failed
                }
            }
        } else {
            let batch = self.queue.drain_up_to(self.config.max_batch_size).await;
            let count = batch.len();
            match self.service.write_batch(batch).await {
                Ok(()) => {
                    tracing::debug!(count, "wrote tick batch");
                    Iteration::WroteBatch(count)
                }
                Err(err) => {
                    tracing::error!(error = %err, "tick consumer iteration failed");
                    Iteration::Failed
                }
            }
        }
    }
}
