use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use jiff::Timestamp;
use shortly_core::repository::Result;
use shortly_core::{Mapping, Repository, ShortCode, StorageError};
use tracing::trace;

/// In-memory implementation of [`Repository`] using DashMap.
///
/// Inserts go through the entry API, so a check for an existing code and the
/// write that follows happen under the same shard lock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, Mapping>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(
        &self,
        code: &ShortCode,
        original_url: &str,
        expiration_time: Option<Timestamp>,
    ) -> Result<Mapping> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                let mapping = Mapping::new(
                    code.clone(),
                    original_url,
                    expiration_time,
                    Timestamp::now(),
                );
                slot.insert(mapping.clone());
                trace!(code = %code, "stored mapping in memory");
                Ok(mapping)
            }
        }
    }

    async fn get(&self, code: &ShortCode) -> Result<Option<Mapping>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }
}
