use async_trait::async_trait;
use shortly_core::{IdError, IdSource};
use sqlx::mysql::MySqlDatabaseError;
use sqlx::MySqlPool;
use std::future::Future;
use std::time::Duration;
use tracing::{trace, warn};

const SCHEMA: &str = include_str!("../ddl/mysql/id_sequence.sql");

/// `ER_DUP_ENTRY`: the auto-increment column is pinned at its maximum.
const ER_DUP_ENTRY: u16 = 1062;
/// `ER_AUTOINC_READ_FAILED`: the engine cannot produce another value.
const ER_AUTOINC_READ_FAILED: u16 = 1467;

/// Upper bound for a single statement.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// An identifier source backed by a MySQL `AUTO_INCREMENT` ticket table.
///
/// Each call inserts one row into `id_sequence` and returns its id. The
/// engine guarantees distinct, increasing values across connections. Rows
/// below the issued id are pruned after each call so the table stays small.
#[derive(Debug, Clone)]
pub struct MySqlIdSource {
    pool: MySqlPool,
    timeout: Duration,
}

fn map_sqlx_error(err: sqlx::Error) -> IdError {
    let number = err
        .as_database_error()
        .and_then(|db| db.try_downcast_ref::<MySqlDatabaseError>())
        .map(MySqlDatabaseError::number);

    match number {
        Some(ER_DUP_ENTRY | ER_AUTOINC_READ_FAILED) => IdError::Exhausted,
        _ => IdError::Unavailable(format!("failed to draw from id_sequence: {err}")),
    }
}

impl MySqlIdSource {
    pub fn new(pool: MySqlPool) -> Self {
        Self::with_timeout(pool, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(pool: MySqlPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Creates the `id_sequence` table if it does not exist yet.
    pub async fn create_schema(&self) -> Result<(), IdError> {
        self.bounded(sqlx::query(SCHEMA).execute(&self.pool))
            .await
            .map(|_| ())
    }

    async fn bounded<T>(
        &self,
        fut: impl Future<Output = Result<T, sqlx::Error>>,
    ) -> Result<T, IdError> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| {
                IdError::Unavailable(format!("mysql statement timed out after {:?}", self.timeout))
            })?
            .map_err(map_sqlx_error)
    }
}

#[async_trait]
impl IdSource for MySqlIdSource {
    async fn next_id(&self) -> Result<u64, IdError> {
        let result = self
            .bounded(sqlx::query("INSERT INTO id_sequence () VALUES ()").execute(&self.pool))
            .await?;

        let id = result.last_insert_id();
        trace!(id, "issued identifier");

        let pruned = self
            .bounded(
                sqlx::query("DELETE FROM id_sequence WHERE id < ?")
                    .bind(id)
                    .execute(&self.pool),
            )
            .await;
        if let Err(e) = pruned {
            warn!(id, error = %e, "failed to prune id_sequence");
        }

        Ok(id)
    }
}
