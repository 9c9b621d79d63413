//! Widget entity definitions.

use crate::randomizer::RandomizerData;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for widgets.
pub type WidgetId = Uuid;

/// Opaque payload for widget kinds without engine logic.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// The kind of a widget. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Randomizer,
    Timer,
    Poll,
    Image,
    Text,
}

impl WidgetKind {
    /// All kinds in toolbar order.
    pub const ALL: [WidgetKind; 5] = [
        WidgetKind::Randomizer,
        WidgetKind::Timer,
        WidgetKind::Poll,
        WidgetKind::Image,
        WidgetKind::Text,
    ];
}

/// Kind-specific widget payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum WidgetData {
    Randomizer(RandomizerData),
    Timer(Payload),
    Poll(Payload),
    Image(Payload),
    Text(Payload),
}

impl WidgetData {
    /// Fresh payload for a newly created widget.
    pub fn initial(kind: WidgetKind) -> Self {
        match kind {
            WidgetKind::Randomizer => WidgetData::Randomizer(RandomizerData::default()),
            WidgetKind::Timer => WidgetData::Timer(Payload::new()),
            WidgetKind::Poll => WidgetData::Poll(Payload::new()),
            WidgetKind::Image => WidgetData::Image(Payload::new()),
            WidgetKind::Text => WidgetData::Text(Payload::new()),
        }
    }

    /// The widget kind this payload belongs to.
    pub fn kind(&self) -> WidgetKind {
        match self {
            WidgetData::Randomizer(_) => WidgetKind::Randomizer,
            WidgetData::Timer(_) => WidgetKind::Timer,
            WidgetData::Poll(_) => WidgetKind::Poll,
            WidgetData::Image(_) => WidgetKind::Image,
            WidgetData::Text(_) => WidgetKind::Text,
        }
    }

    pub fn as_randomizer(&self) -> Option<&RandomizerData> {
        match self {
            WidgetData::Randomizer(data) => Some(data),
            _ => None,
        }
    }
}

/// Position and size in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    pub fn new(origin: Point, size: Size) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width: size.width,
            height: size.height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bounds as a kurbo Rect.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.origin(), self.size())
    }
}

/// A positioned, z-ordered widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Widget {
    pub(crate) id: WidgetId,
    pub(crate) geometry: Geometry,
    pub(crate) z_index: u64,
    pub(crate) data: WidgetData,
}

impl Widget {
    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn kind(&self) -> WidgetKind {
        self.data.kind()
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn data(&self) -> &WidgetData {
        &self.data
    }

    /// Randomizer payload, if this is a randomizer widget.
    pub fn randomizer(&self) -> Option<&RandomizerData> {
        self.data.as_randomizer()
    }
}

/// Partial update for a widget. `None` fields are left untouched.
///
/// Identity, kind and stacking are not part of an update; stacking only
/// changes through selection or [`bring_to_front`](super::WidgetRegistry::bring_to_front).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetUpdate {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// Replaces the whole payload.
    pub data: Option<WidgetData>,
}

impl WidgetUpdate {
    /// Move to a new origin (end of a drag).
    pub fn position(origin: Point) -> Self {
        Self {
            x: Some(origin.x),
            y: Some(origin.y),
            ..Default::default()
        }
    }

    /// Set origin and size together (end of a resize).
    pub fn bounds(rect: Rect) -> Self {
        Self {
            x: Some(rect.x0),
            y: Some(rect.y0),
            width: Some(rect.width()),
            height: Some(rect.height()),
            data: None,
        }
    }

    pub fn data(data: WidgetData) -> Self {
        Self {
            data: Some(data),
            ..Default::default()
        }
    }

    pub fn randomizer(data: RandomizerData) -> Self {
        Self::data(WidgetData::Randomizer(data))
    }

    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub(crate) fn apply_geometry(&self, geometry: &mut Geometry) {
        if let Some(x) = self.x {
            geometry.x = x;
        }
        if let Some(y) = self.y {
            geometry.y = y;
        }
        if let Some(width) = self.width {
            geometry.width = width;
        }
        if let Some(height) = self.height {
            geometry.height = height;
        }
    }
}

/// Parse a numeric geometry field typed by the user.
///
/// Reads an optional sign and the leading decimal digits, ignoring leading
/// whitespace and anything after the digits. Input without leading digits
/// becomes `0.0`.
pub fn parse_dimension(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let Ok(value) = rest[..digits_end].parse::<f64>() else {
        return 0.0;
    };
    if negative { -value } else { value }
}
