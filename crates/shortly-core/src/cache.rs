use crate::error::CacheError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, CacheError>;

/// A cache of original URLs keyed by [`ShortCode`].
///
/// Entries are a disposable replica of the mapping store. Implementations
/// apply one fixed time-to-live to every entry and expire entries on their
/// own; there is no invalidation path because mappings never change once
/// created.
#[async_trait]
pub trait UrlCache: Send + Sync + 'static {
    /// Get the original URL from cache.
    ///
    /// Returns `Ok(None)` if the key is not in the cache or has expired.
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Store the original URL in cache under the configured TTL.
    async fn set_url(&self, code: &ShortCode, url: &str) -> Result<()>;
}

#[async_trait]
impl<T: UrlCache + ?Sized> UrlCache for Arc<T> {
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        (**self).get_url(code).await
    }

    async fn set_url(&self, code: &ShortCode, url: &str) -> Result<()> {
        (**self).set_url(code, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct TestCache {
        items: Mutex<HashMap<String, String>>,
    }

    #[async_trait]
    impl UrlCache for TestCache {
        async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
            let items = self.items.lock().await;
            Ok(items.get(code.as_str()).cloned())
        }

        async fn set_url(&self, code: &ShortCode, url: &str) -> Result<()> {
            let mut items = self.items.lock().await;
            items.insert(code.as_str().to_string(), url.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn shared_cache_is_usable_as_trait_object() {
        let cache: Arc<dyn UrlCache> = Arc::new(TestCache::default());
        let code = ShortCode::from_id(42);

        assert_eq!(cache.get_url(&code).await.unwrap(), None);
        cache.set_url(&code, "https://example.com").await.unwrap();
        assert_eq!(
            cache.get_url(&code).await.unwrap().as_deref(),
            Some("https://example.com")
        );
    }
}
