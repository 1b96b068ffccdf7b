//! Local layout storage adapters.
//!
//! - [`MemoryLayoutStorage`] keeps states in a map for the life of the
//!   process.
//! - [`FileLayoutStorage`] keeps one JSON object on disk, keyed by
//!   `tenant:user:role`, mirroring the browser-local persistence the
//!   dashboard started with.

use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::error::CoreError;

use super::store::LayoutStorage;
use super::{DashboardLayoutState, LayoutKey};

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryLayoutStorage {
    states: RwLock<HashMap<String, DashboardLayoutState>>,
}

impl MemoryLayoutStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.states.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.states.read().await.is_empty()
    }
}

#[async_trait]
impl LayoutStorage for MemoryLayoutStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn load(&self, key: &LayoutKey) -> Result<Option<DashboardLayoutState>, CoreError> {
        Ok(self.states.read().await.get(&key.storage_key()).cloned())
    }

    async fn store(&self, key: &LayoutKey, state: &DashboardLayoutState) -> Result<(), CoreError> {
        self.states
            .write()
            .await
            .insert(key.storage_key(), state.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON file
// ---------------------------------------------------------------------------

/// Layouts persisted as a single JSON object file.
///
/// Entries are kept as raw JSON so one unreadable entry does not hide the
/// others; an entry that fails to deserialize loads as absent and is
/// replaced by the role default. Writes go to a sibling temp file that is
/// renamed over the original.
pub struct FileLayoutStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLayoutStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, serde_json::Value>, CoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(CoreError::Internal(format!(
                    "Failed to read layout file {}: {e}",
                    self.path.display()
                )))
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            CoreError::Internal(format!(
                "Layout file {} is not a JSON object: {e}",
                self.path.display()
            ))
        })
    }

    async fn write_all(&self, entries: &BTreeMap<String, serde_json::Value>) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                CoreError::Internal(format!(
                    "Failed to create layout directory {}: {e}",
                    parent.display()
                ))
            })?;
        }

        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| CoreError::Internal(format!("Failed to encode layouts: {e}")))?;

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await.map_err(|e| {
            CoreError::Internal(format!("Failed to write {}: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            CoreError::Internal(format!(
                "Failed to replace layout file {}: {e}",
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl LayoutStorage for FileLayoutStorage {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn load(&self, key: &LayoutKey) -> Result<Option<DashboardLayoutState>, CoreError> {
        let entries = self.read_all().await?;
        Ok(entries
            .get(&key.storage_key())
            .and_then(|value| serde_json::from_value(value.clone()).ok()))
    }

    async fn store(&self, key: &LayoutKey, state: &DashboardLayoutState) -> Result<(), CoreError> {
        let value = serde_json::to_value(state)
            .map_err(|e| CoreError::Internal(format!("Failed to encode layout: {e}")))?;

        let _guard = self.write_lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.storage_key(), value);
        self.write_all(&entries).await
    }

    async fn health_check(&self) -> Result<(), CoreError> {
        self.read_all().await.map(|_| ())
    }
}
