use crate::error::Result;
use async_trait::async_trait;
use jiff::Timestamp;
use shortly_core::Mapping;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenParams {
    /// The original URL to be shortened.
    pub original_url: String,
    /// When the mapping stops being logically valid, if ever.
    pub expiration_time: Option<Timestamp>,
}

impl ShortenParams {
    pub fn new(original_url: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            expiration_time: None,
        }
    }

    pub fn expiring_at(mut self, expiration_time: Timestamp) -> Self {
        self.expiration_time = Some(expiration_time);
        self
    }
}

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Shortens a URL under a freshly issued code and returns the stored mapping.
    async fn create(&self, params: ShortenParams) -> Result<Mapping>;

    /// Returns the original URL behind `code`.
    async fn resolve(&self, code: &str) -> Result<String>;
}
