use shortly_core::{IdError, StorageError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShortenerError>;

#[derive(Debug, Clone, Error)]
pub enum ShortenerError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("identifier source failed: {0}")]
    IdSource(#[from] IdError),
    /// A freshly issued code was already stored. Indicates a misbehaving
    /// identifier source, not a user error.
    #[error("short code already exists: {0}")]
    CodeConflict(String),
    #[error("storage error: {0}")]
    Storage(StorageError),
    #[error("short code not found: {0}")]
    NotFound(String),
}

impl ShortenerError {
    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::IdSource(_) | Self::Storage(_))
    }
}

impl From<StorageError> for ShortenerError {
    fn from(value: StorageError) -> Self {
        match value {
            StorageError::Conflict(code) => Self::CodeConflict(code),
            other => Self::Storage(other),
        }
    }
}
