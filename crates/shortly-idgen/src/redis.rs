use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use shortly_core::{IdError, IdSource};
use std::time::Duration;
use tracing::{trace, warn};
use typed_builder::TypedBuilder;

/// Redis key holding the shared counter.
pub const DEFAULT_COUNTER_KEY: &str = "shortly:id_counter";

/// Upper bound for a single round-trip to Redis.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for a [`RedisIdSource`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisIdSourceConfig {
    /// Key of the counter shared by every instance.
    #[builder(default = DEFAULT_COUNTER_KEY.to_string(), setter(into))]
    pub key: String,
    /// Applied to connecting and to every `INCR`.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for RedisIdSourceConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// An identifier source backed by a Redis `INCR` counter.
///
/// `INCR` is atomic on the server, so any number of processes sharing the
/// key receive distinct, increasing values. The first value issued from a
/// fresh key is 1.
#[derive(Clone)]
pub struct RedisIdSource {
    conn: ConnectionManager,
    config: RedisIdSourceConfig,
}

fn map_redis_error(err: redis::RedisError) -> IdError {
    let message = err.to_string();
    // Redis refuses to INCR past i64::MAX with "increment or decrement would overflow".
    if message.contains("overflow") {
        IdError::Exhausted
    } else {
        IdError::Unavailable(format!("failed to increment counter: {message}"))
    }
}

impl RedisIdSource {
    /// Creates a source from an existing connection manager.
    ///
    /// The manager can be shared with other Redis users such as the cache.
    pub fn new(conn: ConnectionManager, config: RedisIdSourceConfig) -> Self {
        Self { conn, config }
    }

    /// Opens a new connection manager and creates a source on top of it.
    pub async fn connect(redis_url: &str, config: RedisIdSourceConfig) -> Result<Self, IdError> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| IdError::Unavailable(format!("invalid redis url: {e}")))?;

        let conn = tokio::time::timeout(config.timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                IdError::Unavailable(format!(
                    "connecting to redis timed out after {:?}",
                    config.timeout
                ))
            })?
            .map_err(|e| IdError::Unavailable(format!("failed to connect to redis: {e}")))?;

        Ok(Self::new(conn, config))
    }

    /// Returns the counter key.
    pub fn key(&self) -> &str {
        &self.config.key
    }
}

#[async_trait]
impl IdSource for RedisIdSource {
    async fn next_id(&self) -> Result<u64, IdError> {
        let mut conn = self.conn.clone();

        let reply = tokio::time::timeout(
            self.config.timeout,
            conn.incr::<_, _, i64>(&self.config.key, 1_i64),
        )
        .await
        .map_err(|_| {
            warn!(key = %self.config.key, "INCR timed out");
            IdError::Unavailable(format!(
                "INCR {} timed out after {:?}",
                self.config.key, self.config.timeout
            ))
        })?
        .map_err(|e| {
            warn!(key = %self.config.key, error = %e, "Redis error on INCR");
            map_redis_error(e)
        })?;

        // A negative counter can only come from outside writes; its values
        // would collide with ones already issued.
        let id = u64::try_from(reply).map_err(|_| IdError::Exhausted)?;
        trace!(key = %self.config.key, id, "issued identifier");
        Ok(id)
    }
}
