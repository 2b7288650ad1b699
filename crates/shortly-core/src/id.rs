use crate::error::IdError;
use async_trait::async_trait;
use std::sync::Arc;

/// A source of globally unique, strictly increasing identifiers.
///
/// Every call returns a value no other caller, in this process or any other
/// sharing the same backend, has received or will receive. Values need not be
/// contiguous. Atomicity is provided by the backend, never by in-process
/// locking across callers.
#[async_trait]
pub trait IdSource: Send + Sync + 'static {
    /// Issues the next identifier.
    ///
    /// Fails with [`IdError::Unavailable`] if the backend cannot be reached
    /// in time and with [`IdError::Exhausted`] once the counter's range is
    /// used up.
    async fn next_id(&self) -> Result<u64, IdError>;
}

#[async_trait]
impl<T: IdSource + ?Sized> IdSource for Arc<T> {
    async fn next_id(&self) -> Result<u64, IdError> {
        (**self).next_id().await
    }
}
