//! Randomizer selection engine.
//!
//! Every function here is a pure transition from one [`RandomizerData`] to
//! the next. The caller stores the result back on its widget with
//! [`WidgetRegistry::update_widget`](crate::widget::WidgetRegistry::update_widget).
//! Randomness always comes from the caller's `Rng`, so draws are
//! reproducible with a seeded generator.

use crate::lists::{List, ListId};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// Where a randomizer's items came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemSource {
    /// Items typed in by the user.
    #[default]
    Manual,
    /// Items copied from a named list.
    List,
}

/// Payload of a randomizer widget.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RandomizerData {
    /// Candidate items. Duplicates and blanks are kept as entered.
    pub items: Vec<String>,
    /// When false, drawn values are excluded until reset.
    pub allow_repeats: bool,
    /// Values already drawn, in draw order.
    pub picked_items: Vec<String>,
    /// Result of the most recent draw.
    pub last_picked: Option<String>,
    #[serde(default)]
    pub source: ItemSource,
    /// List the items were last copied from. Lookup key only; the list may
    /// since have been deleted.
    #[serde(default)]
    pub list_id: Option<ListId>,
}

/// Target of a source switch.
#[derive(Debug, Clone, Copy)]
pub enum SourceBinding<'a> {
    Manual,
    List(&'a List),
}

/// Values currently eligible for a draw, in item order.
///
/// Without repeats a drawn value excludes every equal item, not just the
/// instance that was drawn.
pub fn pool(data: &RandomizerData) -> Vec<&str> {
    data.items
        .iter()
        .filter(|item| data.allow_repeats || !data.picked_items.contains(item))
        .map(String::as_str)
        .collect()
}

/// Draw one item uniformly from the pool.
///
/// An empty item list or an exhausted pool returns the data unchanged.
pub fn pick<R: Rng + ?Sized>(data: &RandomizerData, rng: &mut R) -> RandomizerData {
    let mut next = data.clone();
    if data.items.is_empty() {
        return next;
    }
    let Some(picked) = pool(data).choose(rng).map(|item| item.to_string()) else {
        return next;
    };
    if !data.allow_repeats {
        next.picked_items.push(picked.clone());
    }
    next.last_picked = Some(picked);
    next
}

/// Clear the draw history.
pub fn reset(data: &RandomizerData) -> RandomizerData {
    RandomizerData {
        picked_items: Vec::new(),
        last_picked: None,
        ..data.clone()
    }
}

/// Whether every item has been drawn.
///
/// This compares lengths, so with duplicate values the pool can already be
/// empty while this still reports false.
pub fn is_exhausted(data: &RandomizerData) -> bool {
    !data.allow_repeats && !data.items.is_empty() && data.picked_items.len() == data.items.len()
}

/// `(drawn, total)` for the "n / m picked" readout.
pub fn progress(data: &RandomizerData) -> (usize, usize) {
    (data.picked_items.len(), data.items.len())
}

/// Switch where items come from.
///
/// Binding a list copies its current items and always restarts the draw
/// history. Switching back to manual keeps the current items as they are
/// and clears the history only if the source actually changed.
pub fn set_source(data: &RandomizerData, binding: SourceBinding<'_>) -> RandomizerData {
    match binding {
        SourceBinding::List(list) => RandomizerData {
            items: list.items.clone(),
            source: ItemSource::List,
            list_id: Some(list.id),
            picked_items: Vec::new(),
            last_picked: None,
            ..data.clone()
        },
        SourceBinding::Manual if data.source == ItemSource::Manual => data.clone(),
        SourceBinding::Manual => RandomizerData {
            source: ItemSource::Manual,
            ..reset(data)
        },
    }
}

/// Replace the items after a manual edit.
///
/// History entries whose value no longer appears are dropped, and the
/// history never outgrows the item count.
pub fn set_items(data: &RandomizerData, items: Vec<String>) -> RandomizerData {
    let mut picked_items: Vec<String> = data
        .picked_items
        .iter()
        .filter(|picked| items.contains(picked))
        .cloned()
        .collect();
    picked_items.truncate(items.len());
    RandomizerData {
        items,
        picked_items,
        ..data.clone()
    }
}

/// Toggle repeats. Enabling them drops the draw history.
pub fn set_allow_repeats(data: &RandomizerData, allow_repeats: bool) -> RandomizerData {
    let mut next = data.clone();
    next.allow_repeats = allow_repeats;
    if allow_repeats {
        next.picked_items.clear();
    }
    next
}

/// Split free text into items, one per line. Blank lines are items too.
pub fn items_from_text(text: &str) -> Vec<String> {
    text.split('\n').map(str::to_string).collect()
}

/// Inverse of [`items_from_text`].
pub fn items_to_text(items: &[String]) -> String {
    items.join("\n")
}
