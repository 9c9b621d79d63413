//! ClassBoard Core Library
//!
//! Platform-agnostic state for the ClassBoard canvas: the widget registry,
//! the randomizer selection engine and the persisted named lists.

pub mod config;
pub mod lists;
pub mod randomizer;
pub mod storage;
pub mod widget;

pub use config::BoardConfig;
pub use lists::{List, ListId, ListRegistry, ListUpdate};
pub use randomizer::{ItemSource, RandomizerData, SourceBinding};
pub use storage::{LISTS_STORAGE_KEY, MemoryStorage, Storage, StorageError, StorageResult};
pub use widget::{
    Geometry, Widget, WidgetData, WidgetId, WidgetKind, WidgetRegistry, WidgetUpdate,
    parse_dimension,
};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
