use async_trait::async_trait;
use shortly_core::cache::Result;
use shortly_core::{ShortCode, UrlCache};
use tracing::{debug, trace, warn};

/// A two-tier cache composed of a fast local L1 and a shared L2.
///
/// - **Get**: try L1, then L2. An L2 hit is copied back into L1 so later
///   reads stay local. A failing L1 is skipped rather than failing the read.
/// - **Set**: write-through, L2 first and then L1.
///
/// ```rust
/// use shortly_cache::{LayeredCache, MokaUrlCache};
/// use std::time::Duration;
///
/// let l1 = MokaUrlCache::new(Duration::from_secs(60));
/// let l2 = MokaUrlCache::new(Duration::from_secs(3600));
/// let cache = LayeredCache::new(l1, l2);
/// # let _ = cache;
/// ```
#[derive(Debug, Clone)]
pub struct LayeredCache<L1, L2> {
    l1: L1,
    l2: L2,
}

impl<L1, L2> LayeredCache<L1, L2> {
    pub fn new(l1: L1, l2: L2) -> Self {
        Self { l1, l2 }
    }

    pub fn l1(&self) -> &L1 {
        &self.l1
    }

    pub fn l2(&self) -> &L2 {
        &self.l2
    }

    pub fn into_inner(self) -> (L1, L2) {
        (self.l1, self.l2)
    }
}

#[async_trait]
impl<L1, L2> UrlCache for LayeredCache<L1, L2>
where
    L1: UrlCache,
    L2: UrlCache,
{
    async fn get_url(&self, code: &ShortCode) -> Result<Option<String>> {
        trace!(code = %code, "Fetching URL from layered cache");

        match self.l1.get_url(code).await {
            Ok(Some(url)) => {
                debug!(code = %code, "L1 cache hit");
                return Ok(Some(url));
            }
            Ok(None) => trace!(code = %code, "L1 cache miss, trying L2"),
            Err(e) => warn!(code = %code, error = %e, "L1 cache failed, trying L2"),
        }

        match self.l2.get_url(code).await? {
            Some(url) => {
                debug!(code = %code, "L2 cache hit, backfilling L1");
                if let Err(e) = self.l1.set_url(code, &url).await {
                    warn!(code = %code, error = %e, "Failed to backfill L1");
                }
                Ok(Some(url))
            }
            None => {
                trace!(code = %code, "L2 cache miss");
                Ok(None)
            }
        }
    }

    async fn set_url(&self, code: &ShortCode, url: &str) -> Result<()> {
        trace!(code = %code, "Storing URL in layered cache");

        self.l2.set_url(code, url).await?;
        debug!(code = %code, "Stored in L2 cache");

        self.l1.set_url(code, url).await?;
        debug!(code = %code, "Stored in L1 cache");

        Ok(())
    }
}
