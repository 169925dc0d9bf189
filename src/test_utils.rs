use async_trait::async_trait;
use serde_json::Value;

use crate::storage::{CreateOutcome, KvEntry, KvKey, KvStore, MemoryKv, StoreError};

/// Store whose every call fails as if the database were unreachable.
#[derive(Debug, Default)]
pub struct DownKv;

#[async_trait]
impl KvStore for DownKv {
    async fn get(&self, _key: &KvKey) -> Result<Option<KvEntry>, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn create_if_absent(
        &self,
        _key: &KvKey,
        _value: Value,
    ) -> Result<CreateOutcome, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }

    async fn scan_prefix(&self, _prefix: &KvKey) -> Result<Vec<KvEntry>, StoreError> {
        Err(StoreError::Backend(sqlx::Error::PoolTimedOut))
    }
}

/// In-memory store whose point reads always miss, so callers only learn about an
/// existing key from the conditional write.
#[derive(Default)]
pub struct BlindReadKv {
    pub inner: MemoryKv,
}

#[async_trait]
impl KvStore for BlindReadKv {
    async fn get(&self, _key: &KvKey) -> Result<Option<KvEntry>, StoreError> {
        Ok(None)
    }

    async fn create_if_absent(
        &self,
        key: &KvKey,
        value: Value,
    ) -> Result<CreateOutcome, StoreError> {
        self.inner.create_if_absent(key, value).await
    }

    async fn scan_prefix(&self, prefix: &KvKey) -> Result<Vec<KvEntry>, StoreError> {
        self.inner.scan_prefix(prefix).await
    }
}
