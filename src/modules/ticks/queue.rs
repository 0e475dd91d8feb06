// Bounded in-memory buffer between the HTTP inbound and the consumer.
//
// Overflow policy: a full buffer drops the new entry and logs it; the
// inbound stays fire-and-forget. Failed writes go back to the head so
// the original order survives a database outage.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

pub struct TickQueue {
    max_buffer_size: usize,
    deque: Mutex<VecDeque<DateTime<Utc>>>,
}

impl TickQueue {
    pub fn new(max_buffer_size: usize) -> Self {
        Self {
            max_buffer_size,
            deque: Mutex::new(VecDeque::new()),
        }
    }

    /// Returns false when the buffer was full and the entry was dropped.
    pub async fn offer(&self, tick: DateTime<Utc>) -> bool {
        let mut deque = self.deque.lock().await;
        if deque.len() >= self.max_buffer_size {
            tracing::warn!(
                max_buffer_size = self.max_buffer_size,
                %tick,
                "tick buffer is full, dropping entry"
            );
            return false;
        }
        deque.push_back(tick);
        true
    }

    pub async fn drain_up_to(&self, max_elements: usize) -> Vec<DateTime<Utc>> {
        let mut deque = self.deque.lock().await;
        let take = max_elements.min(deque.len());
        deque.drain(..take).collect()
    }

    /// Push items back onto the head, preserving their original order.
    pub async fn return_to_head(&self, ticks: Vec<DateTime<Utc>>) {
        let mut deque = self.deque.lock().await;
        let count = ticks.len();
        for tick in ticks.into_iter().rev() {
            deque.push_front(tick);
        }
        tracing::debug!(count, "returned ticks to the head of the queue");
    }

    pub async fn len(&self) -> usize {
        self.deque.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
