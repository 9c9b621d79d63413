//! Durable snapshot store for the list collection.
//!
//! A backend holds exactly one value: the whole list collection, stored
//! under a key fixed when the backend is built. `ListRegistry` reads it
//! once at startup and replaces it after every mutation.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use crate::lists::List;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Default key the list collection is stored under.
pub const LISTS_STORAGE_KEY: &str = "class-board-lists";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Malformed list snapshot: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Backend holding the persisted list snapshot.
pub trait Storage {
    /// Read the snapshot. `None` means nothing has been written yet.
    fn load(&self) -> BoxFuture<'_, StorageResult<Option<Vec<List>>>>;

    /// Replace the snapshot with `lists`.
    fn save(&self, lists: &[List]) -> BoxFuture<'_, StorageResult<()>>;
}

/// Serialized form shared by all backends: a JSON array of list records.
pub(crate) fn encode_lists(lists: &[List]) -> StorageResult<String> {
    serde_json::to_string(lists).map_err(|e| StorageError::Serialization(e.to_string()))
}

pub(crate) fn decode_lists(json: &str) -> StorageResult<Vec<List>> {
    serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_format_is_record_array() {
        let mut list = List::new("Names");
        list.items = vec!["Alice".to_string(), String::new()];

        let json = encode_lists(std::slice::from_ref(&list)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["name"], "Names");
        assert_eq!(value[0]["items"][1], "");
        assert_eq!(value[0]["id"], list.id.to_string());

        assert_eq!(decode_lists(&json).unwrap(), vec![list]);
    }

    #[test]
    fn test_decode_rejects_non_array() {
        let result = decode_lists(r#"{"lists": []}"#);
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
