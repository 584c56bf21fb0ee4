// Cache store for reading and writing cached data.
// Defines the key-value store seam and a filesystem implementation with TTL expiry.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::trace;

use crate::error::{Result, VanityError};

use super::keys::{cache_dir, entry_path};

/// Default TTL for cached repository metadata: 1 hour.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// Durable key-value store with per-entry expiry.
///
/// Implementations must never return an entry older than the TTL it was
/// written with; callers do not re-check age.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Read a live entry, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write an entry that expires after `ttl`.
    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;
}

/// Wrapper for cached data with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    /// The cached data.
    pub data: T,
    /// When the data was cached.
    pub cached_at: DateTime<Utc>,
    /// Lifetime of the entry in seconds.
    pub ttl_secs: u64,
}

impl<T> CachedData<T> {
    /// Create a new cached data entry.
    pub fn new(data: T, ttl: Duration) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
            ttl_secs: ttl.as_secs(),
        }
    }

    /// Check if this cached data has expired as of `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let elapsed = now
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::ZERO);

        elapsed >= Duration::from_secs(self.ttl_secs)
    }

    /// Check if this cached data has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Cache store keeping one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a store in the platform cache directory.
    pub fn in_cache_dir() -> Result<Self> {
        cache_dir()
            .map(Self::new)
            .ok_or_else(|| VanityError::Cache("no cache directory for this platform".to_string()))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write data atomically via a uniquely named temp file.
    async fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = path.with_extension(format!(
            "{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let written = async {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(contents).await?;
            file.sync_all().await?;
            drop(file);
            fs::rename(&temp_path, path).await
        }
        .await;

        if let Err(e) = written {
            // Best effort; the write error is what gets reported.
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}

#[async_trait]
impl CacheStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = entry_path(&self.root, key);
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let cached: CachedData<String> = serde_json::from_str(&contents)?;
        if cached.is_expired() {
            trace!(key, "file cache entry expired");
            // Expired files are only garbage; a failed removal changes nothing.
            let _ = fs::remove_file(&path).await;
            return Ok(None);
        }

        Ok(Some(cached.data))
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let path = entry_path(&self.root, key);
        let cached = CachedData::new(value, ttl);
        let json = serde_json::to_vec_pretty(&cached)?;

        Self::write_atomic(&path, &json).await?;
        trace!(key, ttl_secs = ttl.as_secs(), "file cache entry written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_put_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store
            .put("repo:octo/checksum", r#"{"name":"checksum"}"#, DEFAULT_TTL)
            .await
            .unwrap();

        let value = store.get("repo:octo/checksum").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"{"name":"checksum"}"#));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.get("repo:octo/none").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store.put("k", "first", DEFAULT_TTL).await.unwrap();
        store.put("k", "second", DEFAULT_TTL).await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_expired_entry_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = "repos:octo:Go";

        let mut cached = CachedData::new("[]".to_string(), Duration::from_secs(300));
        cached.cached_at = Utc::now() - chrono::Duration::seconds(600);
        let path = entry_path(temp_dir.path(), key);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, serde_json::to_string(&cached).unwrap()).unwrap();

        assert!(store.get(key).await.unwrap().is_none());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let path = entry_path(temp_dir.path(), "k");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        assert!(matches!(store.get("k").await, Err(VanityError::Json(_))));
    }

    #[tokio::test]
    async fn test_entries_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let key = "repo:octo/checksum";

        {
            let store = FileStore::new(temp_dir.path());
            store
                .put(key, r#"{"name":"checksum"}"#, DEFAULT_TTL)
                .await
                .unwrap();
        }

        let reopened = FileStore::new(temp_dir.path());
        assert_eq!(
            reopened.get(key).await.unwrap().as_deref(),
            Some(r#"{"name":"checksum"}"#)
        );
        assert!(reopened.get("repo:octo/other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let path = entry_path(temp_dir.path(), "k");

        // A non-empty directory at the entry path makes the final rename fail.
        std::fs::create_dir_all(path.join("occupied")).unwrap();

        assert!(matches!(
            store.put("k", "value", DEFAULT_TTL).await,
            Err(VanityError::Io(_))
        ));

        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|name| name.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {:?}", leftovers);
    }

    #[test]
    fn test_expiry_boundary() {
        let mut data = CachedData::new("test", Duration::from_secs(300));
        let now = data.cached_at;

        assert!(!data.is_expired_at(now));
        assert!(data.is_expired_at(now + chrono::Duration::seconds(300)));

        data.ttl_secs = 0;
        assert!(data.is_expired_at(now));
    }
}
