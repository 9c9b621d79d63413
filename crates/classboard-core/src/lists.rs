//! Named item lists and their persisted registry.

use crate::randomizer::items_from_text;
use crate::storage::Storage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for lists.
pub type ListId = Uuid;

/// A named, ordered sequence of items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    /// Display name. Not required to be unique.
    pub name: String,
    /// One item per line, blanks included.
    pub items: Vec<String>,
}

impl List {
    /// Create an empty list with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Number of items with visible content.
    pub fn non_blank_count(&self) -> usize {
        self.items.iter().filter(|item| !item.trim().is_empty()).count()
    }
}

/// Partial update for a list. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListUpdate {
    pub name: Option<String>,
    pub items: Option<Vec<String>>,
}

impl ListUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            items: None,
        }
    }

    pub fn items(items: Vec<String>) -> Self {
        Self {
            name: None,
            items: Some(items),
        }
    }

    /// Items edited as free text, one per line.
    pub fn items_from_text(text: &str) -> Self {
        Self::items(items_from_text(text))
    }
}

/// Owns the ordered list collection and writes it through to storage.
pub struct ListRegistry<S: Storage> {
    lists: Vec<List>,
    storage: Arc<S>,
}

impl<S: Storage> ListRegistry<S> {
    /// Start from the snapshot currently held by `storage`.
    ///
    /// An empty store starts an empty collection. An unreadable snapshot is
    /// logged and also starts empty; the next mutation overwrites it.
    pub fn load(storage: Arc<S>) -> Self {
        let lists = match pollster::block_on(storage.load()) {
            Ok(snapshot) => snapshot.unwrap_or_default(),
            Err(e) => {
                log::warn!("Discarding unreadable list snapshot: {}", e);
                Vec::new()
            }
        };
        log::debug!("Loaded {} lists", lists.len());
        Self { lists, storage }
    }

    /// All lists in display order.
    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub fn get(&self, id: ListId) -> Option<&List> {
        self.lists.iter().find(|list| list.id == id)
    }

    /// Look up an optional reference. Dangling ids resolve to `None`.
    pub fn resolve(&self, id: Option<ListId>) -> Option<&List> {
        id.and_then(|id| self.get(id))
    }

    /// Index of a list in display order.
    pub fn position(&self, id: ListId) -> Option<usize> {
        self.lists.iter().position(|list| list.id == id)
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Append a new empty list.
    pub fn add_list(&mut self, name: impl Into<String>) -> ListId {
        let list = List::new(name);
        let id = list.id;
        log::debug!("Adding list {} '{}'", id, list.name);
        self.lists.push(list);
        self.persist();
        id
    }

    /// Merge `update` into the list. Returns false if the list is absent.
    pub fn update_list(&mut self, id: ListId, update: ListUpdate) -> bool {
        let Some(list) = self.lists.iter_mut().find(|list| list.id == id) else {
            return false;
        };
        if let Some(name) = update.name {
            list.name = name;
        }
        if let Some(items) = update.items {
            list.items = items;
        }
        self.persist();
        true
    }

    /// Delete a list. Widgets that copied its items keep their copy.
    pub fn remove_list(&mut self, id: ListId) -> Option<List> {
        let index = self.position(id)?;
        let removed = self.lists.remove(index);
        log::debug!("Removed list {} '{}'", id, removed.name);
        self.persist();
        Some(removed)
    }

    /// Move the list at `from` to `to`, shifting the lists in between.
    /// Out-of-range indices leave the collection untouched.
    pub fn reorder_lists(&mut self, from: usize, to: usize) -> bool {
        let len = self.lists.len();
        if from >= len || to >= len {
            log::warn!("Ignoring list reorder {} -> {} with {} lists", from, to, len);
            return false;
        }
        if from == to {
            return true;
        }
        let list = self.lists.remove(from);
        self.lists.insert(to, list);
        self.persist();
        true
    }

    /// Write the whole collection through to storage.
    fn persist(&self) {
        if let Err(e) = pollster::block_on(self.storage.save(&self.lists)) {
            log::warn!("Failed to persist {} lists: {}", self.lists.len(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{BoxFuture, MemoryStorage, StorageError, StorageResult};

    fn registry() -> (Arc<MemoryStorage>, ListRegistry<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let registry = ListRegistry::load(storage.clone());
        (storage, registry)
    }

    fn names<S: Storage>(registry: &ListRegistry<S>) -> Vec<&str> {
        registry.lists().iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_load_empty_store() {
        let (storage, registry) = registry();
        assert!(registry.is_empty());
        assert_eq!(storage.save_count(), 0);
    }

    #[test]
    fn test_load_existing_snapshot() {
        let mut list = List::new("Colors");
        list.items = vec!["red".to_string(), String::new()];
        let json = serde_json::to_string(&[list.clone()]).unwrap();

        let registry = ListRegistry::load(Arc::new(MemoryStorage::with_snapshot(json)));
        assert_eq!(registry.lists(), &[list]);
    }

    #[test]
    fn test_add_list_appends() {
        let (_, mut registry) = registry();
        let a = registry.add_list("A");
        let b = registry.add_list("B");

        assert_eq!(names(&registry), vec!["A", "B"]);
        assert_eq!(registry.position(a), Some(0));
        assert_eq!(registry.position(b), Some(1));
        assert!(registry.get(a).unwrap().items.is_empty());
    }

    #[test]
    fn test_names_need_not_be_unique() {
        let (_, mut registry) = registry();
        let a = registry.add_list("Same");
        let b = registry.add_list("Same");
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_update_list_merges_fields() {
        let (_, mut registry) = registry();
        let id = registry.add_list("Names");

        assert!(registry.update_list(id, ListUpdate::items_from_text("Alice\n\nBob")));
        assert!(registry.update_list(id, ListUpdate::name("Students")));

        let list = registry.get(id).unwrap();
        assert_eq!(list.name, "Students");
        assert_eq!(list.items, vec!["Alice", "", "Bob"]);
        assert_eq!(list.non_blank_count(), 2);
    }

    #[test]
    fn test_noops_do_not_write() {
        let (storage, mut registry) = registry();
        registry.add_list("A");
        registry.add_list("B");
        assert_eq!(storage.save_count(), 2);

        assert!(!registry.update_list(Uuid::new_v4(), ListUpdate::name("x")));
        assert!(registry.remove_list(Uuid::new_v4()).is_none());
        assert!(!registry.reorder_lists(0, 2));
        assert!(registry.reorder_lists(1, 1));
        assert_eq!(storage.save_count(), 2);
    }

    #[test]
    fn test_remove_list() {
        let (_, mut registry) = registry();
        let a = registry.add_list("A");
        registry.add_list("B");

        assert_eq!(registry.remove_list(a).map(|l| l.name), Some("A".to_string()));
        assert!(registry.remove_list(a).is_none());
        assert_eq!(names(&registry), vec!["B"]);
    }

    #[test]
    fn test_resolve_dangling_reference() {
        let (_, mut registry) = registry();
        let id = registry.add_list("Gone");
        registry.remove_list(id);

        assert!(registry.resolve(Some(id)).is_none());
        assert!(registry.resolve(None).is_none());
    }

    #[test]
    fn test_reorder_lists() {
        let (_, mut registry) = registry();
        for name in ["A", "B", "C", "D"] {
            registry.add_list(name);
        }

        assert!(registry.reorder_lists(0, 2));
        assert_eq!(names(&registry), vec!["B", "C", "A", "D"]);

        assert!(registry.reorder_lists(3, 0));
        assert_eq!(names(&registry), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_out_of_range_is_noop() {
        let (_, mut registry) = registry();
        registry.add_list("A");
        registry.add_list("B");

        assert!(!registry.reorder_lists(0, 2));
        assert!(!registry.reorder_lists(5, 0));
        assert_eq!(names(&registry), vec!["A", "B"]);
    }

    #[test]
    fn test_mutations_write_through_and_reload() {
        let (storage, mut registry) = registry();
        let id = registry.add_list("Names");
        let items = vec!["Alice".to_string(), String::new(), "   ".to_string()];
        registry.update_list(id, ListUpdate::items(items));
        registry.add_list("");
        registry.reorder_lists(1, 0);

        let reloaded = ListRegistry::load(storage.clone());
        assert_eq!(reloaded.lists(), registry.lists());
        assert_eq!(reloaded.get(id).unwrap().items, vec!["Alice", "", "   "]);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_backed_registry_uses_configured_key() {
        use crate::config::BoardConfig;
        use crate::storage::FileStorage;

        let dir = tempfile::tempdir().unwrap();
        let config = BoardConfig {
            lists_key: "period-3".to_string(),
            ..Default::default()
        };
        let storage = Arc::new(FileStorage::with_config(dir.path(), &config).unwrap());
        let mut registry = ListRegistry::load(storage.clone());
        let id = registry.add_list("Names");
        registry.update_list(id, ListUpdate::items_from_text("Alice\n\nBob"));

        assert!(dir.path().join("period-3.json").is_file());
        let reopened = FileStorage::with_config(dir.path(), &config).unwrap();
        let reloaded = ListRegistry::load(Arc::new(reopened));
        assert_eq!(reloaded.lists(), registry.lists());

        let other = FileStorage::with_config(dir.path(), &BoardConfig::default()).unwrap();
        assert!(ListRegistry::load(Arc::new(other)).is_empty());
    }

    #[test]
    fn test_storage_failures_are_absorbed() {
        struct Broken;
        impl Storage for Broken {
            fn load(&self) -> BoxFuture<'_, StorageResult<Option<Vec<List>>>> {
                Box::pin(async { Err(StorageError::Serialization("bad".to_string())) })
            }
            fn save(&self, _: &[List]) -> BoxFuture<'_, StorageResult<()>> {
                Box::pin(async { Err(StorageError::Io("disk full".to_string())) })
            }
        }

        let mut registry = ListRegistry::load(Arc::new(Broken));
        assert!(registry.is_empty());

        // Write failures stay in-memory only.
        let id = registry.add_list("Kept");
        assert_eq!(registry.get(id).unwrap().name, "Kept");
    }
}
