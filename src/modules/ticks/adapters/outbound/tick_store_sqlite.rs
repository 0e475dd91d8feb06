// SQLite implementation of the TickStore port.
//
// The batch insert runs inside one transaction so a failed batch leaves
// no partial rows behind and can be re-queued whole.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqlitePool;

use crate::modules::ticks::ports::TickStore;
use crate::shared::infrastructure::store::{StoreError, StorePing};

const CREATE_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS ticks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    time TEXT NOT NULL
)
"#;

const INSERT_SQL: &str = "INSERT INTO ticks (time) VALUES (?)";

// Deliberately no ORDER BY, matching the port's contract.
const SELECT_ALL_SQL: &str = "SELECT time FROM ticks";

pub struct SqliteTickStore {
    pool: SqlitePool,
}

impl SqliteTickStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TickStore for SqliteTickStore {
    async fn insert_one(&self, tick: DateTime<Utc>) -> Result<(), StoreError> {
        sqlx::query(INSERT_SQL).bind(tick).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_batch(&self, ticks: &[DateTime<Utc>]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for tick in ticks {
            sqlx::query(INSERT_SQL).bind(tick).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<DateTime<Utc>>, StoreError> {
        let rows = sqlx::query_scalar::<_, DateTime<Utc>>(SELECT_ALL_SQL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[async_trait]
impl StorePing for SqliteTickStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod sqlite_tick_store_tests {
    use super::*;
    use chrono::Duration;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> SqliteTickStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory sqlite");
        let store = SqliteTickStore::new(pool);
        store.migrate().await.expect("migrate failed");
        store
    }

    #[tokio::test]
    async fn it_should_round_trip_singles_and_batches() {
        let store = store().await;
        let base: DateTime<Utc> = "2026-01-02T03:04:05Z".parse().unwrap();
        let batch: Vec<_> = (1..4).map(|i| base + Duration::seconds(i)).collect();

        store.insert_one(base).await.expect("insert failed");
        store.insert_batch(&batch).await.expect("batch failed");

        let mut all = store.list_all().await.expect("list failed");
        all.sort();
        let mut expected = vec![base];
        expected.extend(batch);
        assert_eq!(all, expected);
    }

    #[tokio::test]
    async fn it_should_answer_pings() {
        store().await.ping().await.expect("ping failed");
    }
}
