// Ports define what the timers module needs from the outside world,
// without implementing it.
//
// Boundaries
// - No concrete input or output here. Adapters implement these traits
//   in the adapters layer.

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::timers::core::state::{Timer, TimerStatus};
use crate::shared::infrastructure::store::StoreError;

#[async_trait]
pub trait TimerStore: Send + Sync {
    async fn insert(&self, timer: &Timer) -> Result<(), StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Timer>, StoreError>;

    async fn list_all(&self) -> Result<Vec<Timer>, StoreError>;

    /// Returns false when no row with that id existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Atomic compare-and-set: replace the record only while its status
    /// still matches `expected`. Returns false when the status moved on
    /// (or the row is gone), which serializes concurrent mutation per id.
    async fn update_if_status(
        &self,
        id: Uuid,
        expected: TimerStatus,
        updated: &Timer,
    ) -> Result<bool, StoreError>;
}
