//! Registry owning every widget on the board.

use super::state::{Geometry, Widget, WidgetData, WidgetId, WidgetKind, WidgetUpdate};
use crate::config::BoardConfig;
use kurbo::{Point, Size};
use rand::Rng;
use uuid::Uuid;

/// Owns all widgets, the selection and the settings-surface flag.
///
/// Stacking uses `z_index` values that only ever grow: a created or raised
/// widget gets one more than the current maximum.
#[derive(Debug, Clone)]
pub struct WidgetRegistry {
    /// Widgets in creation order.
    widgets: Vec<Widget>,
    selected: Option<WidgetId>,
    settings_open: bool,
    /// Viewport size reported by the presentation layer.
    viewport_size: Size,
    config: BoardConfig,
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetRegistry {
    /// Create an empty registry with the default config.
    pub fn new() -> Self {
        Self::with_config(BoardConfig::default())
    }

    pub fn with_config(config: BoardConfig) -> Self {
        Self {
            widgets: Vec::new(),
            selected: None,
            settings_open: false,
            viewport_size: config.viewport_size,
            config,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Set the viewport size used to place new widgets.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// Highest z-index in use, or 0 when empty.
    pub fn max_z(&self) -> u64 {
        self.widgets.iter().map(|w| w.z_index).max().unwrap_or(0)
    }

    /// Create a widget near the viewport center, select it and return its id.
    pub fn create_widget<R: Rng + ?Sized>(
        &mut self,
        kind: WidgetKind,
        rng: &mut R,
    ) -> WidgetId {
        let id = Uuid::new_v4();
        let center = Point::new(
            self.viewport_size.width / 2.0,
            self.viewport_size.height / 2.0,
        );
        let origin = Point::new(
            center.x - self.config.spawn_offset.x + self.jitter(rng),
            center.y - self.config.spawn_offset.y + self.jitter(rng),
        );
        let widget = Widget {
            id,
            geometry: Geometry::new(origin, self.config.widget_size),
            z_index: self.max_z() + 1,
            data: WidgetData::initial(kind),
        };
        log::debug!("Created {:?} widget {} at z {}", kind, id, widget.z_index);
        self.widgets.push(widget);
        self.selected = Some(id);
        id
    }

    fn jitter<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let spread = self.config.spawn_jitter;
        if spread > 0.0 {
            rng.gen_range(-spread..spread)
        } else {
            0.0
        }
    }

    /// Remove a widget. Removing the selected widget clears the selection
    /// and closes the settings surface.
    pub fn remove_widget(&mut self, id: WidgetId) -> Option<Widget> {
        let index = self.widgets.iter().position(|w| w.id == id)?;
        let removed = self.widgets.remove(index);
        if self.selected == Some(id) {
            self.selected = None;
            self.settings_open = false;
        }
        log::debug!("Removed widget {}", id);
        Some(removed)
    }

    /// Remove whichever widget is selected.
    pub fn remove_selected(&mut self) -> Option<Widget> {
        let id = self.selected?;
        self.remove_widget(id)
    }

    /// Change the selection, raising the selected widget to the top.
    ///
    /// `None` clears the selection and closes the settings surface. Unknown
    /// ids are ignored.
    pub fn select_widget(&mut self, id: Option<WidgetId>) {
        let Some(id) = id else {
            self.selected = None;
            self.settings_open = false;
            return;
        };
        let max_z = self.max_z();
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            log::debug!("Ignoring selection of unknown widget {}", id);
            return;
        };
        if widget.z_index != max_z {
            widget.z_index = max_z + 1;
        }
        self.selected = Some(id);
    }

    /// Merge a partial update into a widget. Returns false if it is absent.
    ///
    /// A payload of a different kind than the widget is ignored.
    pub fn update_widget(&mut self, id: WidgetId, update: WidgetUpdate) -> bool {
        let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) else {
            return false;
        };
        update.apply_geometry(&mut widget.geometry);
        if let Some(data) = update.data {
            if data.kind() == widget.kind() {
                widget.data = data;
            } else {
                log::warn!(
                    "Ignoring {:?} payload for {:?} widget {}",
                    data.kind(),
                    widget.kind(),
                    id
                );
            }
        }
        true
    }

    /// Raise a widget above all others, regardless of where it is now.
    pub fn bring_to_front(&mut self, id: WidgetId) {
        let max_z = self.max_z();
        if let Some(widget) = self.widgets.iter_mut().find(|w| w.id == id) {
            widget.z_index = max_z + 1;
        }
    }

    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Widgets in creation order.
    pub fn widgets(&self) -> &[Widget] {
        &self.widgets
    }

    /// Widgets in z-order (back to front).
    pub fn widgets_ordered(&self) -> Vec<&Widget> {
        let mut ordered: Vec<&Widget> = self.widgets.iter().collect();
        ordered.sort_by_key(|w| w.z_index);
        ordered
    }

    /// Widgets under a point, front to back.
    pub fn widgets_at_point(&self, point: Point) -> Vec<WidgetId> {
        self.widgets_ordered()
            .into_iter()
            .rev()
            .filter(|w| w.geometry.rect().contains(point))
            .map(|w| w.id)
            .collect()
    }

    pub fn selected(&self) -> Option<WidgetId> {
        self.selected
    }

    pub fn selected_widget(&self) -> Option<&Widget> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn is_selected(&self, id: WidgetId) -> bool {
        self.selected == Some(id)
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn set_settings_open(&mut self, open: bool) {
        self.settings_open = open;
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }
}
