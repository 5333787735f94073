use crate::assets::text::TextMeasure;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::HypnoResult;
use crate::scene::overlay::{OverlayId, TextOverlay};

/// Canvas width at which overlay metrics are authored.
pub const REFERENCE_WIDTH: f64 = 1080.0;

/// Pixel layout of one text label. Shared by painting and hit testing.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBox {
    /// Box bounds in canvas pixels.
    pub rect: Rect,
    /// Scaled font size.
    pub font_size: f64,
    /// Scaled padding.
    pub padding: f64,
    /// Scaled corner radius, clamped to half the smaller side.
    pub corner_radius: f64,
    /// Distance between consecutive line centers.
    pub line_height_px: f64,
    /// Measured width of each line.
    pub line_widths: Vec<f64>,
}

impl TextBox {
    /// Inclusive point-in-box test.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.rect.x0 && p.x <= self.rect.x1 && p.y >= self.rect.y0 && p.y <= self.rect.y1
    }

    /// Vertical center of line `i`.
    pub fn line_center_y(&self, i: usize) -> f64 {
        self.rect.y0 + self.padding + self.line_height_px / 2.0 + i as f64 * self.line_height_px
    }

    /// Horizontal center shared by every line.
    pub fn center_x(&self) -> f64 {
        self.rect.x0 + self.rect.width() / 2.0
    }
}

/// Lay out `overlay` on `canvas`, measuring lines with `measure`.
///
/// Metrics scale by `canvas.width / 1080`. The block height drops the trailing inter-line gap:
/// `lineHeight·fontSize·n − fontSize·(lineHeight − 1)`.
pub fn layout_text_box(
    overlay: &TextOverlay,
    canvas: Canvas,
    measure: &mut dyn TextMeasure,
) -> HypnoResult<TextBox> {
    let style = &overlay.style;
    let scale = canvas.w() / REFERENCE_WIDTH;
    let font_size = style.font_size * scale;
    let padding = style.padding * scale;

    let line_widths = overlay
        .lines()
        .map(|line| measure.line_width(line, font_size).map(|w| w.max(0.0)))
        .collect::<HypnoResult<Vec<_>>>()?;
    let max_width = line_widths.iter().copied().fold(0.0, f64::max);
    let n = line_widths.len() as f64;

    let block_height = style.line_height * font_size * n - font_size * (style.line_height - 1.0);
    let width = max_width + 2.0 * padding;
    let height = block_height + 2.0 * padding;

    let anchor = canvas.to_pixels(overlay.anchor());
    let rect = Rect::from_origin_size(
        (anchor.x - width / 2.0, anchor.y - height / 2.0),
        (width, height),
    );

    let half_min = width.abs().min(height.abs()) / 2.0;
    let corner_radius = (style.border_radius * scale).clamp(0.0, half_min.max(0.0));

    Ok(TextBox {
        rect,
        font_size,
        padding,
        corner_radius,
        line_height_px: style.line_height * font_size,
        line_widths,
    })
}

/// Topmost overlay containing `p`: the last one in paint order.
pub fn hit_test_topmost(
    overlays: &[TextOverlay],
    canvas: Canvas,
    measure: &mut dyn TextMeasure,
    p: Point,
) -> HypnoResult<Option<OverlayId>> {
    for overlay in overlays.iter().rev() {
        if layout_text_box(overlay, canvas, measure)?.contains(p) {
            return Ok(Some(overlay.id));
        }
    }
    Ok(None)
}

/// First overlay in paint order containing `p`, for hover feedback.
pub fn hover_test(
    overlays: &[TextOverlay],
    canvas: Canvas,
    measure: &mut dyn TextMeasure,
    p: Point,
) -> HypnoResult<Option<OverlayId>> {
    for overlay in overlays {
        if layout_text_box(overlay, canvas, measure)?.contains(p) {
            return Ok(Some(overlay.id));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/text_box.rs"]
mod tests;
