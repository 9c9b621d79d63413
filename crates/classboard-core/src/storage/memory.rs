//! In-memory snapshot store.

use super::{BoxFuture, Storage, StorageError, StorageResult, decode_lists, encode_lists};
use crate::lists::List;
use std::sync::RwLock;

/// Keeps the serialized snapshot in memory, for tests and ephemeral boards.
///
/// The value goes through the same encoding as [`FileStorage`](super::FileStorage),
/// so a reload exercises the real format.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: RwLock<Option<String>>,
    saves: RwLock<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already serialized snapshot.
    pub fn with_snapshot(json: impl Into<String>) -> Self {
        Self {
            snapshot: RwLock::new(Some(json.into())),
            saves: RwLock::new(0),
        }
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves.read().map(|n| *n).unwrap_or(0)
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StorageError {
    StorageError::Other(format!("snapshot lock poisoned: {}", e))
}

impl Storage for MemoryStorage {
    fn load(&self) -> BoxFuture<'_, StorageResult<Option<Vec<List>>>> {
        Box::pin(async move {
            let snapshot = self.snapshot.read().map_err(poisoned)?;
            snapshot.as_deref().map(decode_lists).transpose()
        })
    }

    fn save(&self, lists: &[List]) -> BoxFuture<'_, StorageResult<()>> {
        let encoded = encode_lists(lists);
        Box::pin(async move {
            let encoded = encoded?;
            *self.snapshot.write().map_err(poisoned)? = Some(encoded);
            *self.saves.write().map_err(poisoned)? += 1;
            Ok(())
        })
    }
}
