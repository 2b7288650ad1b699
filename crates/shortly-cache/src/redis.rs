use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use shortly_core::cache::Result;
use shortly_core::{CacheError, ShortCode, UrlCache};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

pub const DEFAULT_KEY_PREFIX: &str = "shortly:url:";
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings for a [`RedisUrlCache`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisCacheConfig {
    /// Prepended to every short code to form the Redis key.
    #[builder(default = DEFAULT_KEY_PREFIX.to_string(), setter(into))]
    pub key_prefix: String,
    /// Expiry set on every entry with `SETEX`.
    #[builder(default = DEFAULT_TTL)]
    pub ttl: Duration,
    /// Upper bound for a single round-trip.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,
}

impl Default for RedisCacheConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A Redis-based implementation of [`UrlCache`].
///
/// Values are stored as plain strings under `{key_prefix}{code}` and expire
/// on the server.
#[derive(Clone)]
pub struct RedisUrlCache {
    conn: ConnectionManager,
    config: RedisCacheConfig,
}

fn map_redis_error(operation: &str, err: redis::RedisError) -> CacheError {
    let message = format!("{operation}: {err}");
    if err.is_timeout() {
        CacheError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        CacheError::Unavailable(message)
    } else {
        CacheError::Operation(message)
    }
}

impl RedisUrlCache {
    /// Creates a cache on top of an existing connection manager.
    pub fn new(conn: ConnectionManager, config: RedisCacheConfig) -> Self {
        Self { conn, config }
    }

    /// Opens a new connection manager for `redis_url`.
    pub async fn connect(redis_url: &str, config: RedisCacheConfig) -> Result<Self> {
        let client = redis::Client::open(redis_url)
            .map_err(|e| CacheError::Initialization(format!("invalid redis url: {e}")))?;

        let conn = tokio::time::timeout(config.timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| {
                CacheError::Unavailable(format!(
                    "connecting to redis timed out after {:?}",
                    config.timeout
                ))
            })?
            .map_err(|e| map_redis_error("failed to connect to redis", e))?;

        Ok(Self::new(conn, config))
    }

    pub fn config(&self) -> &RedisCacheConfig {
        &self.config
    }

    fn cache_key(&self, code: &ShortCode) -> String {
        format!("{}{}", self.config.key_prefix, code.as_str())
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.config.timeout, fut).await {
            Ok(result) => result.map_err(|e| map_redis_error(operation, e)),
            Err(_) => Err(CacheError::Timeout(format!(
                "{operation}: no reply within {:?}",
                self.config.timeout
            ))),
        }
    }
}

#[async_trait]
impl UrlCache for RedisUrlCache {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        let key = self.cache_key(code);
        trace!(code = %code, "Fetching URL from Redis cache");

        let mut conn = self.conn.clone();
        let cached = self
            .bounded(
                "failed to fetch value from Redis",
                conn.get::<_, Option<String>>(&key),
            )
            .await
            .inspect_err(|e| warn!(code = %code, error = %e, "Redis error on get"))?;

        match cached {
            Some(url) => {
                debug!(code = %code, "Cache hit in Redis");
                Ok(Some(url))
            }
            None => {
                trace!(code = %code, "Cache miss in Redis");
                Ok(None)
            }
        }
    }

    async fn set_url(&self, code: &ShortCode, url: &str) -> Result<()> {
        let key = self.cache_key(code);
        let ttl_secs = self.config.ttl.as_secs().max(1);
        trace!(code = %code, ttl_secs, "Storing URL in Redis cache");

        let mut conn = self.conn.clone();
        self.bounded(
            "failed to write value to Redis",
            conn.set_ex::<_, _, ()>(&key, url, ttl_secs),
        )
        .await
        .inspect_err(|e| warn!(code = %code, error = %e, "Failed to cache URL in Redis"))?;

        debug!(code = %code, "Cached URL in Redis");
        Ok(())
    }
}
