// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! File-backed store: one JSON object per installation, rewritten on every
//! mutation via write-to-temp-then-rename so a crash mid-write leaves the
//! previous snapshot intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::store::KeyValueStore;

const STORE_FILE_NAME: &str = "family_points_store.json";

/// Persistent [`KeyValueStore`] backed by a single JSON file.
///
/// The whole map is held in memory; reads never touch the disk after open.
pub struct FileStore {
    path: PathBuf,
    entries: DashMap<String, String>,
    /// Serializes snapshot writes; per-key atomicity is all we promise.
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open (or create) the store under `data_dir`.
    pub async fn open(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(STORE_FILE_NAME);
        let entries = DashMap::new();

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => {
                let snapshot: BTreeMap<String, String> = serde_json::from_str(&contents)
                    .map_err(|e| {
                        AppError::Storage(format!("Corrupt store file {}: {}", path.display(), e))
                    })?;
                for (k, v) in snapshot {
                    entries.insert(k, v);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No local store yet, starting empty");
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read store file {}: {}",
                    path.display(),
                    e
                )));
            }
        }

        Ok(Self {
            path,
            entries,
            write_lock: Mutex::new(()),
        })
    }

    /// Write the current snapshot to disk atomically.
    async fn persist(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;

        // Stable key order keeps the file diff-friendly.
        let snapshot: BTreeMap<String, String> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();

        let body = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| AppError::Storage(format!("Failed to encode store snapshot: {}", e)))?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, body).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            AppError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist().await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        self.persist().await
    }
}
