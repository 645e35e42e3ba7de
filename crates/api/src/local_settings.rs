//! File-backed key/value settings local to one installation.
//!
//! The layout configuration is not shared through the document store; it
//! lives in a small JSON object file under [`LAYOUT_SETTINGS_KEY`]. A missing
//! file, a missing key, or an unreadable value all fall back to defaults.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use siliconedge_core::layout::{LayoutSettings, LAYOUT_SETTINGS_KEY};
use tokio::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON object file of named settings. Writes are serialized.
pub struct LocalSettings {
    path: PathBuf,
    lock: Mutex<()>,
}

impl LocalSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the value under `key`. `None` if absent or not decodable.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        let _guard = self.lock.lock().await;
        let entries = self.read_all().await?;
        Ok(entries.get(key).cloned().and_then(|value| {
            serde_json::from_value(value)
                .map_err(|e| tracing::warn!(key, error = %e, "Ignoring unreadable local setting"))
                .ok()
        }))
    }

    /// Store `value` under `key`, keeping the other entries.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_all(&entries).await
    }

    /// Remove `key`. Returns `true` if it was present.
    pub async fn remove(&self, key: &str) -> Result<bool, SettingsError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_all().await?;
        let existed = entries.remove(key).is_some();
        if existed {
            self.write_all(&entries).await?;
        }
        Ok(existed)
    }

    // -- layout ------------------------------------------------------------

    /// The saved layout, or defaults.
    pub async fn layout(&self) -> Result<LayoutSettings, SettingsError> {
        Ok(self.get(LAYOUT_SETTINGS_KEY).await?.unwrap_or_default())
    }

    pub async fn save_layout(&self, layout: &LayoutSettings) -> Result<(), SettingsError> {
        self.set(LAYOUT_SETTINGS_KEY, layout).await
    }

    /// Drop the saved layout so defaults apply again.
    pub async fn reset_layout(&self) -> Result<LayoutSettings, SettingsError> {
        self.remove(LAYOUT_SETTINGS_KEY).await?;
        Ok(LayoutSettings::default())
    }

    // -- file access -------------------------------------------------------

    async fn read_all(&self) -> Result<Map<String, Value>, SettingsError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match serde_json::from_slice(&raw) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) | Err(_) => {
                tracing::warn!(path = %self.path.display(), "Local settings file is not a JSON object, starting fresh");
                Ok(Map::new())
            }
        }
    }

    async fn write_all(&self, entries: &Map<String, Value>) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let body = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, body).await.map_err(io_err)
    }
}
