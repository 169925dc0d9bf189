use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

/// Hierarchical key. Orders part by part, so a prefix sorts before all of its extensions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KvKey(Vec<String>);

impl KvKey {
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(parts.into_iter().map(Into::into).collect())
    }

    pub fn parts(&self) -> &[String] {
        &self.0
    }

    pub fn starts_with(&self, prefix: &KvKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

#[derive(Debug, Clone)]
pub struct KvEntry {
    pub key: KvKey,
    pub value: Value,
    pub versionstamp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { versionstamp: u64 },
    AlreadyExists,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store backend error: {0}")]
    Backend(#[from] sqlx::Error),
    #[error("stored value could not be decoded: {0}")]
    Codec(#[from] serde_json::Error),
}

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &KvKey) -> Result<Option<KvEntry>, StoreError>;

    /// Writes `value` only if `key` has never been written. Atomic with respect to
    /// every other call on the same store.
    async fn create_if_absent(&self, key: &KvKey, value: Value)
        -> Result<CreateOutcome, StoreError>;

    /// Entries whose key starts with `prefix`, in key order.
    async fn scan_prefix(&self, prefix: &KvKey) -> Result<Vec<KvEntry>, StoreError>;
}

#[derive(Default)]
struct MemoryInner {
    entries: BTreeMap<KvKey, KvEntry>,
    last_version: u64,
}

/// Process-local store. Used when no database is configured and in tests.
#[derive(Default)]
pub struct MemoryKv {
    inner: RwLock<MemoryInner>,
}

impl MemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKv {
    async fn get(&self, key: &KvKey) -> Result<Option<KvEntry>, StoreError> {
        Ok(self.inner.read().await.entries.get(key).cloned())
    }

    async fn create_if_absent(
        &self,
        key: &KvKey,
        value: Value,
    ) -> Result<CreateOutcome, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.entries.contains_key(key) {
            return Ok(CreateOutcome::AlreadyExists);
        }
        inner.last_version += 1;
        let versionstamp = inner.last_version;
        inner.entries.insert(
            key.clone(),
            KvEntry {
                key: key.clone(),
                value,
                versionstamp,
            },
        );
        Ok(CreateOutcome::Created { versionstamp })
    }

    async fn scan_prefix(&self, prefix: &KvKey) -> Result<Vec<KvEntry>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .entries
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(_, e)| e.clone())
            .collect())
    }
}
