use async_trait::async_trait;
use moka::future::Cache;
use shortly_core::cache::Result;
use shortly_core::{ShortCode, UrlCache};
use std::time::Duration;
use tracing::{debug, trace};
use typed_builder::TypedBuilder;

pub const DEFAULT_MAX_CAPACITY: u64 = 10_000;
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// An in-process URL cache backed by Moka.
///
/// Suited to single-node deployments or as the L1 tier of a
/// [`LayeredCache`](crate::LayeredCache) in front of Redis. Every entry
/// expires a fixed time after insertion.
#[derive(Debug, Clone)]
pub struct MokaUrlCache {
    cache: Cache<String, String>,
}

impl MokaUrlCache {
    /// Creates a cache with the default capacity and the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        Self::with_capacity(DEFAULT_MAX_CAPACITY, ttl)
    }

    /// Creates a cache holding at most `max_capacity` entries.
    pub fn with_capacity(max_capacity: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(ttl)
            .build();
        Self { cache }
    }

    pub fn builder() -> MokaCacheConfigBuilder {
        MokaCacheConfig::builder()
    }

    /// Number of entries currently held, after pending maintenance runs.
    pub async fn entry_count(&self) -> u64 {
        self.cache.run_pending_tasks().await;
        self.cache.entry_count()
    }
}

impl Default for MokaUrlCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[async_trait]
impl UrlCache for MokaUrlCache {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        trace!(code = %code, "Fetching URL from Moka cache");

        match self.cache.get(code.as_str()).await {
            Some(url) => {
                debug!(code = %code, "Cache hit in Moka");
                Ok(Some(url))
            }
            None => {
                trace!(code = %code, "Cache miss in Moka");
                Ok(None)
            }
        }
    }

    async fn set_url(&self, code: &ShortCode, url: &str) -> Result<()> {
        trace!(code = %code, "Storing URL in Moka cache");

        self.cache
            .insert(code.as_str().to_string(), url.to_string())
            .await;
        debug!(code = %code, "Cached URL in Moka");
        Ok(())
    }
}

/// Settings for a [`MokaUrlCache`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct MokaCacheConfig {
    #[builder(default = DEFAULT_MAX_CAPACITY)]
    pub max_capacity: u64,
    #[builder(default = DEFAULT_TTL)]
    pub ttl: Duration,
}

impl From<MokaCacheConfig> for MokaUrlCache {
    fn from(config: MokaCacheConfig) -> Self {
        MokaUrlCache::with_capacity(config.max_capacity, config.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ShortCode {
        ShortCode::new_unchecked(s)
    }

    #[tokio::test]
    async fn get_and_set() {
        let cache = MokaUrlCache::default();
        let c = code("abc123");

        assert!(cache.get_url(&c).await.unwrap().is_none());

        cache.set_url(&c, "https://example.com").await.unwrap();

        assert_eq!(
            cache.get_url(&c).await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }

    #[tokio::test]
    async fn codes_are_case_sensitive() {
        let cache = MokaUrlCache::default();
        cache
            .set_url(&code("aB"), "https://upper.example")
            .await
            .unwrap();

        assert!(cache.get_url(&code("ab")).await.unwrap().is_none());
        assert!(cache.get_url(&code("AB")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn later_set_overwrites() {
        let cache = MokaUrlCache::default();
        let c = code("k");

        cache.set_url(&c, "https://one.example").await.unwrap();
        cache.set_url(&c, "https://two.example").await.unwrap();

        assert_eq!(
            cache.get_url(&c).await.unwrap().as_deref(),
            Some("https://two.example")
        );
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache = MokaUrlCache::with_capacity(100, Duration::from_millis(50));
        let c = code("abc123");

        cache.set_url(&c, "https://example.com").await.unwrap();
        assert!(cache.get_url(&c).await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(cache.get_url(&c).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn builder_applies_settings() {
        let cache: MokaUrlCache = MokaUrlCache::builder()
            .max_capacity(1000)
            .ttl(Duration::from_secs(60))
            .build()
            .into();

        let c = code("abc123");
        cache.set_url(&c, "https://example.com").await.unwrap();
        assert!(cache.get_url(&c).await.unwrap().is_some());
        assert_eq!(cache.entry_count().await, 1);
    }

    #[test]
    fn config_defaults() {
        let config = MokaCacheConfig::builder().build();
        assert_eq!(config.max_capacity, 10_000);
        assert_eq!(config.ttl, Duration::from_secs(3600));
    }

    #[tokio::test]
    async fn holds_many_entries() {
        let cache = MokaUrlCache::with_capacity(100, DEFAULT_TTL);

        for i in 0..50 {
            let c = code(&format!("code{i}"));
            cache
                .set_url(&c, &format!("https://example{i}.com"))
                .await
                .unwrap();
        }

        assert_eq!(
            cache.get_url(&code("code0")).await.unwrap().as_deref(),
            Some("https://example0.com")
        );
        assert_eq!(
            cache.get_url(&code("code49")).await.unwrap().as_deref(),
            Some("https://example49.com")
        );
    }
}
