use crate::error::{Result, ShortenerError};
use crate::shortener::{ShortenParams, Shortener};
use async_trait::async_trait;
use shortly_core::{validator, IdSource, Mapping, Repository, ShortCode, StorageError, UrlCache};
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// The shortening and resolution orchestrator.
///
/// Holds no mutable state of its own; every call goes straight to the three
/// collaborators. Uniqueness of codes rests entirely on the identifier
/// source, and the store's primary key is the only duplicate guard.
#[derive(Debug)]
pub struct ShortenerService<I, C, R> {
    id_source: Arc<I>,
    cache: Arc<C>,
    repository: Arc<R>,
}

impl<I, C, R> Clone for ShortenerService<I, C, R> {
    fn clone(&self) -> Self {
        Self {
            id_source: Arc::clone(&self.id_source),
            cache: Arc::clone(&self.cache),
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<I: IdSource, C: UrlCache, R: Repository> ShortenerService<I, C, R> {
    pub fn new(id_source: I, cache: C, repository: R) -> Self {
        Self::from_shared(Arc::new(id_source), Arc::new(cache), Arc::new(repository))
    }

    /// Builds a service from collaborators that are also used elsewhere.
    pub fn from_shared(id_source: Arc<I>, cache: Arc<C>, repository: Arc<R>) -> Self {
        Self {
            id_source,
            cache,
            repository,
        }
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    async fn populate_cache(&self, code: &ShortCode, url: &str) {
        if let Err(e) = self.cache.set_url(code, url).await {
            warn!(code = %code, error = %e, "Failed to populate cache");
        }
    }
}

#[async_trait]
impl<I: IdSource, C: UrlCache, R: Repository> Shortener for ShortenerService<I, C, R> {
    async fn create(&self, params: ShortenParams) -> Result<Mapping> {
        if !validator::is_valid(&params.original_url) {
            return Err(ShortenerError::InvalidUrl(params.original_url));
        }

        let id = self.id_source.next_id().await?;
        let code = ShortCode::from_id(id);
        trace!(code = %code, id, "issued short code");

        let mapping = self
            .repository
            .insert(&code, &params.original_url, params.expiration_time)
            .await
            .inspect_err(|e| {
                if matches!(e, StorageError::Conflict(_)) {
                    error!(code = %code, id, "Freshly issued short code already stored");
                }
            })?;

        self.populate_cache(&code, &mapping.original_url).await;
        debug!(code = %code, "Created mapping");
        Ok(mapping)
    }

    async fn resolve(&self, code: &str) -> Result<String> {
        let Ok(code) = ShortCode::parse(code) else {
            trace!(code, "Rejected malformed short code");
            return Err(ShortenerError::NotFound(code.to_string()));
        };

        match self.cache.get_url(&code).await {
            Ok(Some(url)) => {
                debug!(code = %code, "Resolved from cache");
                return Ok(url);
            }
            Ok(None) => trace!(code = %code, "Cache miss"),
            Err(e) => warn!(code = %code, error = %e, "Cache lookup failed, using store"),
        }

        let Some(mapping) = self
            .repository
            .get(&code)
            .await
            .map_err(ShortenerError::Storage)?
        else {
            trace!(code = %code, "Short code not found");
            return Err(ShortenerError::NotFound(code.to_string()));
        };

        self.populate_cache(&code, &mapping.original_url).await;
        debug!(code = %code, "Resolved from store");
        Ok(mapping.original_url)
    }
}
