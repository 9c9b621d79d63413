//! Widget system for the board canvas.
//!
//! This module provides:
//! - Widget entities with geometry, stacking and a kind-specific payload
//! - The registry owning them, together with selection state
//!
//! Payload logic (such as randomizer draws) lives elsewhere; the registry
//! only stores the results.

mod registry;
mod state;

pub use registry::WidgetRegistry;
pub use state::{
    Geometry, Payload, Widget, WidgetData, WidgetId, WidgetKind, WidgetUpdate, parse_dimension,
};
