//! In-process blob store.

use std::collections::BTreeMap;

use time::OffsetDateTime;
use tokio::sync::RwLock;

use super::{BlobError, BlobMeta, BlobStore, public_url, validate_key};

struct Entry {
    bytes: Vec<u8>,
    uploaded_at: OffsetDateTime,
}

/// Blob store held in memory. Ordered by key so listings are stable.
pub struct MemoryBlobStore {
    base_url: String,
    entries: RwLock<BTreeMap<String, Entry>>,
}

impl MemoryBlobStore {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), entries: RwLock::new(BTreeMap::new()) }
    }

    fn meta(&self, key: &str, entry: &Entry) -> BlobMeta {
        BlobMeta {
            pathname: key.to_owned(),
            url: public_url(&self.base_url, key),
            size: entry.bytes.len() as u64,
            uploaded_at: entry.uploaded_at,
        }
    }
}

impl Default for MemoryBlobStore {
    fn default() -> Self {
        Self::new("/blobs")
    }
}

#[async_trait::async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError> {
        validate_key(key)?;
        Ok(self.entries.read().await.get(key).map(|e| e.bytes.clone()))
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<BlobMeta, BlobError> {
        validate_key(key)?;
        let entry = Entry { bytes, uploaded_at: OffsetDateTime::now_utc() };
        let meta = self.meta(key, &entry);
        self.entries.write().await.insert(key.to_owned(), entry);
        Ok(meta)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, BlobError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_owned()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, e)| self.meta(k, e))
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<bool, BlobError> {
        validate_key(key)?;
        Ok(self.entries.write().await.remove(key).is_some())
    }
}

#[cfg(test)]
#[path = "memory_test.rs"]
mod tests;
