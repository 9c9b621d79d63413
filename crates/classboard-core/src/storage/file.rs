//! Snapshot store backed by a single JSON file.

use super::{BoxFuture, Storage, StorageError, StorageResult, decode_lists, encode_lists};
use crate::config::BoardConfig;
use crate::lists::List;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Stores the list snapshot in `<dir>/<key>.json`.
///
/// Saves go to a sibling temp file first and are renamed into place, so a
/// crash mid-write leaves the previous snapshot intact.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Store under `key` inside `dir`, creating the directory if needed.
    ///
    /// Characters outside `[A-Za-z0-9_-]` in the key become `_`.
    pub fn new(dir: impl Into<PathBuf>, key: &str) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StorageError::Io(format!("cannot create {}: {}", dir.display(), e)))?;
        let stem: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        Ok(Self {
            path: dir.join(format!("{}.json", stem)),
        })
    }

    /// Store under the configured `lists_key` inside `dir`.
    pub fn with_config(dir: impl Into<PathBuf>, config: &BoardConfig) -> StorageResult<Self> {
        Self::new(dir, &config.lists_key)
    }

    /// Store under the configured key in the per-user data directory,
    /// e.g. `~/.local/share/classboard/` on Linux.
    pub fn default_location(config: &BoardConfig) -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("no data or home directory".to_string()))?;
        Self::with_config(base.join("classboard"), config)
    }

    /// File the snapshot lives in.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl Storage for FileStorage {
    fn load(&self) -> BoxFuture<'_, StorageResult<Option<Vec<List>>>> {
        Box::pin(async move {
            match fs::read_to_string(&self.path) {
                Ok(json) => decode_lists(&json).map(Some),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StorageError::Io(format!(
                    "cannot read {}: {}",
                    self.path.display(),
                    e
                ))),
            }
        })
    }

    fn save(&self, lists: &[List]) -> BoxFuture<'_, StorageResult<()>> {
        let encoded = encode_lists(lists);
        Box::pin(async move {
            let staging = self.staging_path();
            fs::write(&staging, encoded?).map_err(|e| {
                StorageError::Io(format!("cannot write {}: {}", staging.display(), e))
            })?;
            fs::rename(&staging, &self.path).map_err(|e| {
                StorageError::Io(format!("cannot replace {}: {}", self.path.display(), e))
            })
        })
    }
}
