use crate::error::StorageError;
use crate::mapping::Mapping;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use jiff::Timestamp;
use std::sync::Arc;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// The durable table of mappings, keyed by short code.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Inserts a new mapping and returns it as stored.
    ///
    /// The insert is atomic. Returns `Err(StorageError::Conflict)` if the
    /// code already exists; the existing record is left untouched.
    async fn insert(
        &self,
        code: &ShortCode,
        original_url: &str,
        expiration_time: Option<Timestamp>,
    ) -> Result<Mapping>;

    /// Retrieves the mapping for a given short code.
    ///
    /// Returns `None` if the code does not exist. Expired mappings are
    /// still returned.
    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>>;
}

#[async_trait]
impl<T: Repository + ?Sized> Repository for Arc<T> {
    async fn insert(
        &self,
        code: &ShortCode,
        original_url: &str,
        expiration_time: Option<Timestamp>,
    ) -> Result<Mapping> {
        (**self).insert(code, original_url, expiration_time).await
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        (**self).get(code).await
    }
}
