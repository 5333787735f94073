use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Point;
use crate::foundation::error::{HypnoError, HypnoResult};

/// Composite operator used to lay the pattern strokes over the background.
///
/// Wire tokens are the lowercase hyphenated names (`"hard-light"`); `"source-over"` is accepted
/// on import as an alias of `normal`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Source-over.
    #[default]
    #[serde(alias = "source-over")]
    Normal,
    /// Multiply.
    Multiply,
    /// Screen.
    Screen,
    /// Overlay.
    Overlay,
    /// Darken.
    Darken,
    /// Lighten.
    Lighten,
    /// Hard light.
    HardLight,
    /// Soft light.
    SoftLight,
    /// Difference.
    Difference,
    /// Additive (`plus`).
    Lighter,
}

impl BlendMode {
    /// Every mode, in control-panel order.
    pub const ALL: [BlendMode; 10] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Lighter,
    ];

    /// Wire token.
    pub fn as_str(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Lighter => "lighter",
        }
    }
}

/// Pattern, background and sparkle parameters for one render.
///
/// Treated as an immutable snapshot; edits go through [`PatternSettings::with_field`] or the
/// session's update messages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSettings {
    /// Pattern center, normalized x.
    pub center_x: f64,
    /// Pattern center, normalized y.
    pub center_y: f64,
    /// Distance between rings / spiral arms in pixels.
    pub spacing: f64,
    /// Stroke width in pixels.
    pub thickness: f64,
    /// Spiral rotation in radians.
    pub rotation: f64,
    /// Primary stroke color (CSS).
    pub color: String,
    /// Stroke opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stroke composite operator.
    pub blend_mode: BlendMode,
    /// Rings instead of a spiral.
    pub is_concentric: bool,
    /// `"original"`, `"W:H"`, or the fixed `"1280:1063"` token.
    pub aspect_ratio: String,
    /// Background blur in pixels.
    pub blur: f64,
    /// Smooth background resampling.
    pub anti_aliasing: bool,
    /// Draw a second, interleaved copy of the pattern.
    pub is_double: bool,
    /// Color of the second copy.
    pub secondary_color: String,
    /// Radius perturbation amplitude in pixels.
    pub deformation_amount: f64,
    /// Radius perturbation frequency.
    pub deformation_frequency: f64,
    /// Number of sparkle dots.
    pub sparkle_amount: u32,
    /// Upper bound (exclusive) for sparkle radii.
    pub sparkle_size: f64,
    /// Sparkle layer opacity.
    pub sparkle_opacity: f64,
    /// Sparkle color (CSS).
    pub sparkle_color: String,
    /// Sparkle layer blur in pixels.
    pub sparkle_blur: f64,
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self {
            center_x: 0.5,
            center_y: 0.5,
            spacing: 20.0,
            thickness: 10.0,
            rotation: 0.0,
            color: "#000000".to_owned(),
            opacity: 0.8,
            blend_mode: BlendMode::Normal,
            is_concentric: false,
            aspect_ratio: "original".to_owned(),
            blur: 0.0,
            anti_aliasing: true,
            is_double: false,
            secondary_color: "#ffffff".to_owned(),
            deformation_amount: 0.0,
            deformation_frequency: 10.0,
            sparkle_amount: 500,
            sparkle_size: 1.5,
            sparkle_opacity: 0.7,
            sparkle_color: "#ffffff".to_owned(),
            sparkle_blur: 0.0,
        }
    }
}

impl PatternSettings {
    /// Pattern center in normalized coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// Copy with a new normalized center.
    pub fn with_center(&self, center: Point) -> Self {
        Self {
            center_x: center.x,
            center_y: center.y,
            ..self.clone()
        }
    }

    /// Copy with one field replaced, addressed by its wire name (`"spacing"`, `"blendMode"`).
    pub fn with_field(&self, field: &str, value: serde_json::Value) -> HypnoResult<Self> {
        let mut patch = serde_json::Map::new();
        patch.insert(field.to_owned(), value);
        self.merged(&patch)
    }

    /// Copy with every key of `patch` written over the current values.
    ///
    /// Unknown keys are rejected so typos never silently vanish.
    pub fn merged(&self, patch: &serde_json::Map<String, serde_json::Value>) -> HypnoResult<Self> {
        merge_fields(self, patch, "settings")
    }
}

/// Write `patch` over the JSON object form of `value` and read it back.
pub(crate) fn merge_fields<T>(
    value: &T,
    patch: &serde_json::Map<String, serde_json::Value>,
    what: &str,
) -> HypnoResult<T>
where
    T: Serialize + DeserializeOwned,
{
    let serde_json::Value::Object(mut current) = serde_json::to_value(value)? else {
        return Err(HypnoError::evaluation(format!(
            "{what} did not serialize to an object"
        )));
    };
    for (key, v) in patch {
        if !current.contains_key(key) {
            return Err(HypnoError::validation(format!(
                "unknown {what} field \"{key}\""
            )));
        }
        current.insert(key.clone(), v.clone());
    }
    Ok(serde_json::from_value(serde_json::Value::Object(current))?)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/settings.rs"]
mod tests;
