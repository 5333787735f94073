use std::borrow::Cow;

use crate::foundation::error::{HypnoError, HypnoResult};

/// Width of a single line of text at a given font size.
///
/// This is the measurement seam shared by painting and hit testing; both must be driven by
/// the same implementation so boxes never diverge.
pub trait TextMeasure {
    /// Rendered advance width of `line` in pixels at `font_size_px`.
    fn line_width(&mut self, line: &str, font_size_px: f64) -> HypnoResult<f64>;
}

/// Font-free measurement using a constant advance per character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ApproxTextMeasure {
    /// Advance per character as a fraction of the font size.
    pub advance_em: f64,
}

impl Default for ApproxTextMeasure {
    fn default() -> Self {
        Self { advance_em: 0.6 }
    }
}

impl TextMeasure for ApproxTextMeasure {
    fn line_width(&mut self, line: &str, font_size_px: f64) -> HypnoResult<f64> {
        Ok(line.chars().count() as f64 * font_size_px * self.advance_em)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

/// Parley contexts plus the family registered from host font bytes.
struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
}

impl TextLayoutEngine {
    fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
        }
    }

    fn register(&mut self, font_bytes: &[u8]) -> HypnoResult<String> {
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            HypnoError::validation("no font families registered from font bytes")
        })?;

        Ok(self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| HypnoError::validation("registered font family has no name"))?
            .to_string())
    }

    fn layout_line(
        &mut self,
        text: &str,
        family: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> HypnoResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(HypnoError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family.to_owned())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

struct LoadedFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Text measurement and shaping for overlay labels.
///
/// With font bytes loaded, widths come from Parley shaping and glyphs can be painted. Without a
/// font the engine measures with [`ApproxTextMeasure`] and the compositor paints label boxes
/// only.
pub struct TextEngine {
    layout: TextLayoutEngine,
    font: Option<LoadedFont>,
    fallback: ApproxTextMeasure,
}

impl Default for TextEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEngine {
    /// Engine without a font; measurement is approximate.
    pub fn new() -> Self {
        Self {
            layout: TextLayoutEngine::new(),
            font: None,
            fallback: ApproxTextMeasure::default(),
        }
    }

    /// Engine shaping with the given TTF/OTF bytes.
    pub fn with_font_bytes(font_bytes: Vec<u8>) -> HypnoResult<Self> {
        let mut layout = TextLayoutEngine::new();
        let family = layout.register(&font_bytes)?;
        tracing::debug!(%family, "registered overlay font");
        let data = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self {
            layout,
            font: Some(LoadedFont { family, data }),
            fallback: ApproxTextMeasure::default(),
        })
    }

    /// Whether glyphs can be painted.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Shape one line for painting.
    ///
    /// `None` when no font is loaded, the line is empty or the size has nothing to paint.
    pub(crate) fn shape_line(
        &mut self,
        line: &str,
        font_size_px: f64,
        brush: TextBrushRgba8,
    ) -> HypnoResult<Option<(parley::Layout<TextBrushRgba8>, vello_cpu::peniko::FontData)>> {
        let Some(font) = &self.font else {
            return Ok(None);
        };
        let Some(size_px) = paintable_size(line, font_size_px) else {
            return Ok(None);
        };
        let layout = self
            .layout
            .layout_line(line, &font.family, size_px, brush)?;
        Ok(Some((layout, font.data.clone())))
    }
}

impl TextMeasure for TextEngine {
    fn line_width(&mut self, line: &str, font_size_px: f64) -> HypnoResult<f64> {
        let Some(font) = &self.font else {
            return self.fallback.line_width(line, font_size_px);
        };
        let Some(size_px) = paintable_size(line, font_size_px) else {
            return Ok(0.0);
        };
        let layout =
            self.layout
                .layout_line(line, &font.family, size_px, TextBrushRgba8::default())?;
        Ok(f64::from(layout.width()))
    }
}

/// Parley size for a non-empty line, or `None` when the size is zero, negative or non-finite.
fn paintable_size(line: &str, font_size_px: f64) -> Option<f32> {
    let size_px = font_size_px as f32;
    (!line.is_empty() && size_px.is_finite() && size_px > 0.0).then_some(size_px)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
