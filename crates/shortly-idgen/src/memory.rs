use async_trait::async_trait;
use shortly_core::{IdError, IdSource};
use std::sync::atomic::{AtomicU64, Ordering};

/// A process-local identifier source backed by an atomic counter.
///
/// Uniqueness holds only within one process. Multi-instance deployments
/// must use a shared backend such as [`RedisIdSource`](crate::RedisIdSource).
#[derive(Debug)]
pub struct InMemoryIdSource {
    next: AtomicU64,
}

impl InMemoryIdSource {
    /// Creates a source whose first identifier is 1, like a fresh Redis counter.
    pub fn new() -> Self {
        Self::with_offset(1)
    }

    /// Creates a source whose first identifier is `offset`.
    ///
    /// Useful for resuming from a known state or distributing
    /// counter ranges across nodes.
    pub fn with_offset(offset: u64) -> Self {
        Self {
            next: AtomicU64::new(offset),
        }
    }

    fn issue(&self) -> Result<u64, IdError> {
        // u64::MAX is never issued: it marks the counter as used up.
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_add(1)
            })
            .map_err(|_| IdError::Exhausted)
    }
}

impl Default for InMemoryIdSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdSource for InMemoryIdSource {
    async fn next_id(&self) -> Result<u64, IdError> {
        self.issue()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[tokio::test]
    async fn starts_at_one_and_increases() {
        let source = InMemoryIdSource::new();

        assert_eq!(source.next_id().await.unwrap(), 1);
        assert_eq!(source.next_id().await.unwrap(), 2);
        assert_eq!(source.next_id().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn with_offset_starts_at_offset() {
        let source = InMemoryIdSource::with_offset(1000);

        assert_eq!(source.next_id().await.unwrap(), 1000);
        assert_eq!(source.next_id().await.unwrap(), 1001);
    }

    #[tokio::test]
    async fn reports_exhaustion_instead_of_wrapping() {
        let source = InMemoryIdSource::with_offset(u64::MAX - 1);

        assert_eq!(source.next_id().await.unwrap(), u64::MAX - 1);
        assert_eq!(source.next_id().await, Err(IdError::Exhausted));
        assert_eq!(source.next_id().await, Err(IdError::Exhausted));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_callers_never_share_an_id() {
        let source = Arc::new(InMemoryIdSource::new());
        let mut handles = vec![];

        for _ in 0..32 {
            let source = Arc::clone(&source);
            handles.push(tokio::spawn(async move {
                let mut ids = Vec::with_capacity(500);
                for _ in 0..500 {
                    ids.push(source.next_id().await.unwrap());
                }
                ids
            }));
        }

        let mut seen = HashSet::new();
        for handle in handles {
            let ids = handle.await.unwrap();
            // each caller observes its own ids in increasing order
            assert!(ids.windows(2).all(|w| w[0] < w[1]));
            for id in ids {
                assert!(seen.insert(id), "id {id} issued twice");
            }
        }
        assert_eq!(seen.len(), 32 * 500);
    }

    #[test]
    fn source_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InMemoryIdSource>();
    }
}
