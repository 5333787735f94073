use serde::{Deserialize, Serialize};

use crate::foundation::core::Point;
use crate::foundation::error::HypnoResult;
use crate::scene::settings::merge_fields;

/// Opaque identity of a text overlay within one editing session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(pub u64);

impl std::fmt::Display for OverlayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "overlay-{}", self.0)
    }
}

/// Everything about a label except its identity and position.
///
/// Doubles as the "new label" template; [`Default`] is the stock template.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// Label content; `\n` separates lines.
    pub text: String,
    /// Font size in pixels at the 1080 px reference width.
    pub font_size: f64,
    /// Text color (CSS).
    pub color: String,
    /// Box fill color (CSS).
    pub background_color: String,
    /// Box padding at the reference width.
    pub padding: f64,
    /// Box corner radius at the reference width.
    pub border_radius: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            text: "TG:\nRFV34D".to_owned(),
            font_size: 32.0,
            color: "#000000".to_owned(),
            background_color: "#ffffff".to_owned(),
            padding: 16.0,
            border_radius: 12.0,
            line_height: 1.2,
        }
    }
}

impl TextStyle {
    /// Copy with one field replaced, addressed by its wire name (`"fontSize"`, `"text"`).
    pub fn with_field(&self, field: &str, value: serde_json::Value) -> HypnoResult<Self> {
        let mut patch = serde_json::Map::new();
        patch.insert(field.to_owned(), value);
        merge_fields(self, &patch, "text")
    }
}

/// A draggable text label. `(x, y)` is the normalized center of its box.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOverlay {
    /// Session-unique identity.
    pub id: OverlayId,
    /// Normalized anchor x.
    pub x: f64,
    /// Normalized anchor y.
    pub y: f64,
    /// Content and appearance.
    pub style: TextStyle,
}

impl TextOverlay {
    /// New label centered on the canvas.
    pub fn centered(id: OverlayId, style: TextStyle) -> Self {
        Self {
            id,
            x: 0.5,
            y: 0.5,
            style,
        }
    }

    /// Normalized anchor.
    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Lines of the label, split on `\n`.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.style.text.split('\n')
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/overlay.rs"]
mod tests;
