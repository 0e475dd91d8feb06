// SQLite implementation of the TimerStore port.
//
// The compare-and-set in update_if_status relies on the status column in
// the WHERE clause: the UPDATE touches the row only while the stored
// status still matches, so concurrent start/stop on one id cannot both
// win.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::Row;
use uuid::Uuid;

use crate::modules::timers::core::state::{Timer, TimerStatus};
use crate::modules::timers::ports::TimerStore;
use crate::shared::infrastructure::store::{StoreError, StorePing};

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS timers (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    status TEXT NOT NULL,
    started_at TEXT,
    stopped_at TEXT,
    created_at TEXT NOT NULL
)
"#;

pub struct SqliteTimerStore {
    pool: SqlitePool,
}

impl SqliteTimerStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

fn row_to_timer(row: &SqliteRow) -> Result<Timer, StoreError> {
    let id: String = row.try_get("id")?;
    let status: String = row.try_get("status")?;
    Ok(Timer {
        id: Uuid::parse_str(&id).map_err(|e| StoreError::Backend(format!("bad timer id: {e}")))?,
        name: row.try_get("name")?,
        status: status
            .parse::<TimerStatus>()
            .map_err(StoreError::Backend)?,
        started_at: row.try_get::<Option<DateTime<Utc>>, _>("started_at")?,
        stopped_at: row.try_get::<Option<DateTime<Utc>>, _>("stopped_at")?,
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl TimerStore for SqliteTimerStore {
    async fn insert(&self, timer: &Timer) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO timers (id, name, status, started_at, stopped_at, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(timer.id.to_string())
        .bind(&timer.name)
        .bind(timer.status.as_str())
        .bind(timer.started_at)
        .bind(timer.stopped_at)
        .bind(timer.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Timer>, StoreError> {
        let row = sqlx::query(
            "SELECT id, name, status, started_at, stopped_at, created_at \
             FROM timers WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_timer).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Timer>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, name, status, started_at, stopped_at, created_at FROM timers",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(row_to_timer).collect()
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM timers WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn update_if_status(
        &self,
        id: Uuid,
        expected: TimerStatus,
        updated: &Timer,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            "UPDATE timers SET name = ?, status = ?, started_at = ?, stopped_at = ? \
             WHERE id = ? AND status = ?",
        )
        .bind(&updated.name)
        .bind(updated.status.as_str())
        .bind(updated.started_at)
        .bind(updated.stopped_at)
        .bind(id.to_string())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}

#[async_trait]
impl StorePing for SqliteTimerStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod sqlite_timer_store_tests {
    use super::*;
    use chrono::Utc;
    use sqlx::sqlite::SqlitePoolOptions;

    // One connection, otherwise every pooled connection would get its
    // own private :memory: database.
    async fn store() -> SqliteTimerStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let store = SqliteTimerStore::new(pool);
        store.migrate().await.expect("migrate failed");
        store
    }

    #[tokio::test]
    async fn it_should_round_trip_a_timer_through_sqlite() {
        let store = store().await;
        let timer = Timer::new("pomodoro", Utc::now()).unwrap();
        store.insert(&timer).await.expect("insert failed");

        let found = store.find_by_id(timer.id).await.expect("find failed");
        assert_eq!(found, Some(timer.clone()));
        assert_eq!(store.list_all().await.unwrap(), vec![timer]);
    }

    #[tokio::test]
    async fn it_should_reject_duplicate_primary_keys() {
        let store = store().await;
        let timer = Timer::new("pomodoro", Utc::now()).unwrap();
        store.insert(&timer).await.unwrap();
        let err = store.insert(&timer).await.unwrap_err();
        assert!(!err.is_connection_problem());
    }

    #[tokio::test]
    async fn it_should_swap_only_when_the_status_matches() {
        let store = store().await;
        let timer = Timer::new("pomodoro", Utc::now()).unwrap();
        store.insert(&timer).await.unwrap();

        let started = timer.start(Utc::now()).unwrap();
        assert!(
            store
                .update_if_status(timer.id, TimerStatus::Idle, &started)
                .await
                .unwrap()
        );
        assert!(
            !store
                .update_if_status(timer.id, TimerStatus::Idle, &started)
                .await
                .unwrap()
        );

        let found = store.find_by_id(timer.id).await.unwrap().unwrap();
        assert_eq!(found.status, TimerStatus::Running);
        assert_eq!(found.started_at, started.started_at);
    }

    #[tokio::test]
    async fn it_should_delete_and_report_missing_rows() {
        let store = store().await;
        let timer = Timer::new("pomodoro", Utc::now()).unwrap();
        store.insert(&timer).await.unwrap();
        assert!(store.delete_by_id(timer.id).await.unwrap());
        assert!(!store.delete_by_id(timer.id).await.unwrap());
    }

    #[tokio::test]
    async fn it_should_answer_pings() {
        let store = store().await;
        store.ping().await.expect("ping failed");
    }
}
