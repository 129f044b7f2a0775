// src/resume/session.rs
//! Injectable key-value persistence for flow state

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tracing::{info, warn};

use crate::utils::{encode_session_key, ensure_dir_exists, remove_file_if_exists, write_file_safe};

/// Raw JSON storage keyed by string. Object safe so stores can be swapped
/// behind `&dyn SessionStore`.
#[rocket::async_trait]
pub trait SessionStore: Send + Sync {
    async fn load_raw(&self, key: &str) -> Result<Option<String>>;
    async fn save_raw(&self, key: &str, value: &str) -> Result<()>;
    async fn clear(&self, key: &str) -> Result<()>;
}

/// Typed helpers over any [`SessionStore`].
#[rocket::async_trait]
pub trait SessionStoreExt {
    async fn load<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;
    async fn save<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()>;
}

#[rocket::async_trait]
impl<S: SessionStore + ?Sized> SessionStoreExt for S {
    /// A stored value that no longer parses is treated as absent.
    async fn load<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>> {
        let Some(raw) = self.load_raw(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding unreadable session state for {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn save<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).context("Failed to serialize session state")?;
        self.save_raw(key, &raw).await
    }
}

// ===== In-Memory =====

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[rocket::async_trait]
impl SessionStore for MemorySessionStore {
    async fn load_raw(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn save_raw(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

// ===== On Disk =====

/// One JSON file per key under a directory. Keys are percent-encoded into
/// file names, so distinct keys never share a file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    root: PathBuf,
}

impl FileSessionStore {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        ensure_dir_exists(&root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_session_key(key)))
    }

    /// Remove session files untouched for at least `max_age`.
    pub async fn sweep_expired(&self, max_age: Duration) -> Result<usize> {
        let mut entries = tokio::fs::read_dir(&self.root)
            .await
            .with_context(|| format!("Failed to list session directory: {}", self.root.display()))?;

        let now = SystemTime::now();
        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            let modified = match entry.metadata().await.and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    warn!("Skipping session file {}: {}", path.display(), e);
                    continue;
                }
            };
            let age = now.duration_since(modified).unwrap_or_default();
            if age >= max_age {
                remove_file_if_exists(&path).await?;
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Removed {} expired session file(s) from {}", removed, self.root.display());
        }
        Ok(removed)
    }
}

#[rocket::async_trait]
impl SessionStore for FileSessionStore {
    async fn load_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read file: {}", path.display())),
        }
    }

    async fn save_raw(&self, key: &str, value: &str) -> Result<()> {
        write_file_safe(&self.path_for(key), value).await
    }

    async fn clear(&self, key: &str) -> Result<()> {
        remove_file_if_exists(&self.path_for(key)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Progress {
        step: String,
        answers: Vec<String>,
    }

    #[tokio::test]
    async fn test_memory_store_round_trip_and_clear() {
        let store = MemorySessionStore::new();
        let progress = Progress {
            step: "tone".to_string(),
            answers: vec!["job".to_string()],
        };
        store.save("flow", &progress).await.unwrap();
        assert_eq!(store.load::<Progress>("flow").await.unwrap(), Some(progress));

        store.clear("flow").await.unwrap();
        assert_eq!(store.load::<Progress>("flow").await.unwrap(), None);
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_value_reads_as_absent() {
        let store = MemorySessionStore::new();
        store.save_raw("flow", "{not json").await.unwrap();
        assert_eq!(store.load::<Progress>("flow").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let store: Box<dyn SessionStore> = Box::new(MemorySessionStore::new());
        store.save("k", &42u32).await.unwrap();
        assert_eq!(store.load::<u32>("k").await.unwrap(), Some(42));
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path()).await.unwrap();
        store.save_raw("fresh", "{}").await.unwrap();
        tokio::fs::write(dir.path().join("notes.txt"), "x").await.unwrap();

        assert_eq!(store.sweep_expired(Duration::from_secs(3600)).await.unwrap(), 0);
        assert!(store.load_raw("fresh").await.unwrap().is_some());

        assert_eq!(store.sweep_expired(Duration::ZERO).await.unwrap(), 1);
        assert!(store.load_raw("fresh").await.unwrap().is_none());
        assert!(dir.path().join("notes.txt").exists());
    }
}
