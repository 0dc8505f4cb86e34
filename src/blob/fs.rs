//! Filesystem blob store.
//!
//! Each key maps to a file under the root directory, with `/` in the key
//! becoming directory separators. Writes go to a sibling temp file that is
//! renamed over the target, so readers see either the old or the new value.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use time::OffsetDateTime;
use tracing::debug;

use super::{BlobError, BlobMeta, BlobStore, public_url, validate_key};

/// Prefix of in-flight temp files; never listed.
const TEMP_PREFIX: &str = ".tmp-";

pub struct FsBlobStore {
    root: PathBuf,
    base_url: String,
    temp_seq: AtomicU64,
}

impl FsBlobStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the root directory cannot be created.
    pub async fn open(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Result<Self, BlobError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root, base_url: base_url.into(), temp_seq: AtomicU64::new(0) })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |p, seg| p.join(seg))
    }

    fn meta(&self, key: String, metadata: &std::fs::Metadata) -> BlobMeta {
        let uploaded_at = metadata.modified().map_or_else(|_| OffsetDateTime::now_utc(), OffsetDateTime::from);
        BlobMeta { url: public_url(&self.base_url, &key), pathname: key, size: metadata.len(), uploaded_at }
    }

    /// Walk the tree below the root, collecting `(key, metadata)` pairs.
    async fn walk(&self) -> Result<Vec<(String, std::fs::Metadata)>, BlobError> {
        let mut out = Vec::new();
        let mut pending = vec![(self.root.clone(), String::new())];
        while let Some((dir, prefix)) = pending.pop() {
            let mut entries = match tokio::fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };
            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with(TEMP_PREFIX) {
                    continue;
                }
                let key = if prefix.is_empty() { name } else { format!("{prefix}/{name}") };
                let metadata = entry.metadata().await?;
                if metadata.is_dir() {
                    pending.push((entry.path(), key));
                } else if metadata.is_file() {
                    out.push((key, metadata));
                }
            }
        }
        Ok(out)
    }
}

#[async_trait::async_trait]
impl BlobStore for FsBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BlobError> {
        validate_key(key)?;
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<BlobMeta, BlobError> {
        validate_key(key)?;
        let target = self.path_for(key);
        let dir = target.parent().map_or_else(|| self.root.clone(), Path::to_path_buf);
        tokio::fs::create_dir_all(&dir).await?;

        let seq = self.temp_seq.fetch_add(1, Ordering::Relaxed);
        let temp = dir.join(format!("{TEMP_PREFIX}{}-{seq}", std::process::id()));
        tokio::fs::write(&temp, &bytes).await?;
        if let Err(e) = tokio::fs::rename(&temp, &target).await {
            if let Err(cleanup) = tokio::fs::remove_file(&temp).await {
                debug!(error = %cleanup, path = %temp.display(), "temp blob cleanup failed");
            }
            return Err(e.into());
        }

        let metadata = tokio::fs::metadata(&target).await?;
        debug!(key, bytes = metadata.len(), "blob written");
        Ok(self.meta(key.to_owned(), &metadata))
    }

    async fn list(&self, prefix: &str) -> Result<Vec<BlobMeta>, BlobError> {
        let mut metas: Vec<BlobMeta> = self
            .walk()
            .await?
            .into_iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, metadata)| self.meta(key, &metadata))
            .collect();
        metas.sort_by(|a, b| a.pathname.cmp(&b.pathname));
        Ok(metas)
    }

    async fn delete(&self, key: &str) -> Result<bool, BlobError> {
        validate_key(key)?;
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "fs_test.rs"]
mod tests;
