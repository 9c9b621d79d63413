//! Board configuration.

use crate::storage::LISTS_STORAGE_KEY;
use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

/// Tunables for widget placement and list persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Size given to every newly created widget.
    pub widget_size: Size,
    /// Offset subtracted from the viewport center to place a new widget.
    pub spawn_offset: Vec2,
    /// Maximum jitter (in pixels, per axis) applied to spawn positions.
    pub spawn_jitter: f64,
    /// Viewport size assumed until the presentation layer reports one.
    pub viewport_size: Size,
    /// Key the list snapshot is stored under; see `FileStorage::with_config`.
    pub lists_key: String,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            widget_size: Size::new(320.0, 200.0),
            spawn_offset: Vec2::new(150.0, 100.0),
            spawn_jitter: 20.0,
            viewport_size: Size::new(800.0, 600.0),
            lists_key: LISTS_STORAGE_KEY.to_string(),
        }
    }
}

impl BoardConfig {
    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
