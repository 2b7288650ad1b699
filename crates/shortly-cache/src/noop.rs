use async_trait::async_trait;
use shortly_core::cache::Result;
use shortly_core::{ShortCode, UrlCache};

/// A cache that stores nothing.
///
/// Every lookup misses, so every resolve goes to the mapping store.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopUrlCache;

#[async_trait]
impl UrlCache for NoopUrlCache {
    async fn get_url(&self, _code: &ShortCode) -> Result<Option<String>> {
        Ok(None)
    }

    async fn set_url(&self, _code: &ShortCode, _url: &str) -> Result<()> {
        Ok(())
    }
}
