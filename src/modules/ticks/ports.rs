use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::shared::infrastructure::store::StoreError;

#[async_trait]
pub trait TickStore: Send + Sync {
    async fn insert_one(&self, tick: DateTime<Utc>) -> Result<(), StoreError>;

    async fn insert_batch(&self, ticks: &[DateTime<Utc>]) -> Result<(), StoreError>;

    /// No ordering is promised; callers that care must sort.
    async fn list_all(&self) -> Result<Vec<DateTime<Utc>>, StoreError>;
}
