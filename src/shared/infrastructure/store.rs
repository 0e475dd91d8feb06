// Shared storage primitives for the outbound adapters.
//
// Purpose
// - One error vocabulary for every store port, so callers can tell a
//   connection-class failure (retriable, triggers the health monitor)
//   from any other backend failure.
//
// Boundaries
// - No domain types here. Ports in the modules build on these.

use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqliteSynchronous};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_connection_problem(&self) -> bool {
        matches!(self, StoreError::Unavailable(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if is_connection_error(&err) {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Backend(err.to_string())
        }
    }
}

// SQLSTATE class 08 is the connection-exception class; sqlx surfaces
// socket and pool failures as dedicated variants instead.
fn is_connection_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => true,
        sqlx::Error::Database(db) => db.code().map(|c| c.starts_with("08")).unwrap_or(false),
        _ => false,
    }
}

/// Liveness probe for a storage backend, used by the health monitor.
#[async_trait::async_trait]
pub trait StorePing: Send + Sync {
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Runs a store operation and, on failure, runs it exactly once more
/// before surfacing the error.
pub async fn retry_once<T, Fut>(mut op: impl FnMut() -> Fut) -> Result<T, StoreError>
where
    Fut: Future<Output = Result<T, StoreError>>,
{
    match op().await {
        Ok(value) => Ok(value),
        Err(first) => {
            tracing::warn!(error = %first, "store operation failed, retrying once");
            op().await
        }
    }
}

/// Create a SqlitePool with WAL mode and common settings.
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StoreError> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| StoreError::Backend(format!("invalid database URL: {e}")))?
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    tracing::debug!("database pool created");
    Ok(pool)
}

#[cfg(test)]
mod store_error_tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    fn it_should_classify_unavailable_as_a_connection_problem() {
        assert!(StoreError::Unavailable("down".into()).is_connection_problem());
        assert!(!StoreError::Backend("constraint".into()).is_connection_problem());
    }

    #[rstest]
    fn it_should_map_io_errors_to_unavailable() {
        let err = sqlx::Error::Io(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(StoreError::from(err).is_connection_problem());
    }

    #[rstest]
    fn it_should_map_row_not_found_to_backend() {
        assert!(!StoreError::from(sqlx::Error::RowNotFound).is_connection_problem());
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_not_retry_a_successful_operation() {
        let calls = AtomicUsize::new(0);
        let result = retry_once(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok::<_, StoreError>(42) }
        })
        .await;
        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_retry_exactly_once_after_a_failure() {
        let calls = AtomicUsize::new(0);
        let result = retry_once(|| {
            let attempt = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if attempt == 0 {
                    Err(StoreError::Backend("transient".into()))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;
        assert_eq!(result, Ok(1));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_surface_the_second_failure() {
        let result: Result<(), _> =
            retry_once(|| async { Err(StoreError::Unavailable("still down".into())) }).await;
        assert_eq!(result, Err(StoreError::Unavailable("still down".into())));
    }
}
