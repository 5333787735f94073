use rand::Rng;

use crate::assets::color::ColorDef;
use crate::assets::decode::SourceImage;
use crate::assets::text::{TextBrushRgba8, TextEngine};
use crate::effects::blur::blur_sigma_in_place;
use crate::effects::composite::{composite_layer_rgba8_premul, premul_over_in_place};
use crate::effects::sparkle::generate_sparkles;
use crate::foundation::core::{Canvas, Point, Rgba8Premul};
use crate::foundation::error::{HypnoError, HypnoResult};
use crate::geometry::pattern::{DEFAULT_MAX_VERTICES, Polyline, generate_pattern};
use crate::layout::text_box::layout_text_box;
use crate::render::backend::FrameRGBA;
use crate::render::background::fit_background;
use crate::render::raster::{
    circle_path, paint, pattern_stroke, polyline_path, render_layer, rounded_rect_path,
    segment_path,
};
use crate::scene::overlay::TextOverlay;
use crate::scene::settings::{BlendMode, PatternSettings};

const GUIDE_COLOR: [u8; 4] = [255, 255, 255, 255];
const GUIDE_LINE_WIDTH: f64 = 2.0;
const GUIDE_RADIUS: f64 = 10.0;
const GUIDE_ARM: f64 = 15.0;

/// Compositor options.
#[derive(Clone, Copy, Debug)]
pub struct RenderOpts {
    /// Vertex cap handed to the pattern generator.
    pub max_pattern_vertices: usize,
    /// If set, the frame is cleared to this straight RGBA8 color before the background.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            max_pattern_vertices: DEFAULT_MAX_VERTICES,
            clear_rgba: None,
        }
    }
}

/// Immutable snapshot of everything one frame depends on.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    /// Pattern, background and sparkle parameters.
    pub settings: &'a PatternSettings,
    /// Labels in paint order.
    pub overlays: &'a [TextOverlay],
    /// Decoded source photo.
    pub image: &'a SourceImage,
    /// Output size.
    pub canvas: Canvas,
    /// Draw the center guide (only while the center is being dragged).
    pub show_guide: bool,
}

/// Render one frame from a cleared surface.
///
/// Draw order: background (cover fit, blurred), pattern strokes with the configured blend mode
/// and opacity, additive sparkles, text labels (always plain source-over), guide marker.
/// Sparkle positions are drawn from `rng` on every call.
#[tracing::instrument(skip_all, fields(width = inputs.canvas.width, height = inputs.canvas.height))]
pub fn render_frame<R: Rng + ?Sized>(
    inputs: &FrameInputs<'_>,
    text: &mut TextEngine,
    rng: &mut R,
    opts: &RenderOpts,
) -> HypnoResult<FrameRGBA> {
    let canvas = inputs.canvas;
    let settings = inputs.settings;
    if canvas.is_empty() {
        return Err(HypnoError::evaluation("cannot render an empty canvas"));
    }

    let len = (canvas.width as usize)
        .checked_mul(canvas.height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| HypnoError::evaluation("frame buffer size overflow"))?;
    let mut frame = match opts.clear_rgba {
        Some([r, g, b, a]) => Rgba8Premul::from_straight_rgba(r, g, b, a)
            .to_array()
            .repeat(len / 4),
        None => vec![0u8; len],
    };

    let background = fit_background(inputs.image, canvas, settings.anti_aliasing, settings.blur)?;
    premul_over_in_place(&mut frame, &background, 1.0);

    draw_pattern(&mut frame, settings, canvas, opts)?;
    draw_sparkles(&mut frame, settings, canvas, rng)?;
    draw_text(&mut frame, inputs.overlays, canvas, text)?;
    if inputs.show_guide {
        draw_guide(&mut frame, canvas.to_pixels(settings.center()), canvas)?;
    }

    Ok(FrameRGBA {
        width: canvas.width,
        height: canvas.height,
        data: frame,
        premultiplied: true,
    })
}

fn layer_color(css: &str, layer: &'static str) -> Option<ColorDef> {
    match ColorDef::parse(css) {
        Ok(c) => Some(c),
        Err(err) => {
            tracing::warn!(layer, %err, "skipping layer with invalid color");
            None
        }
    }
}

fn draw_pattern(
    frame: &mut [u8],
    settings: &PatternSettings,
    canvas: Canvas,
    opts: &RenderOpts,
) -> HypnoResult<()> {
    let thickness = settings.thickness;
    if !thickness.is_finite() || thickness <= 0.0 {
        return Ok(());
    }
    let geometry = generate_pattern(settings, canvas, opts.max_pattern_vertices);
    let opacity = settings.opacity as f32;

    let sets = std::iter::once((&geometry.primary, settings.color.as_str()))
        .chain(geometry.secondary.iter().map(|s| (s, settings.secondary_color.as_str())));
    for (lines, css) in sets {
        if lines.is_empty() {
            continue;
        }
        let Some(color) = layer_color(css, "pattern") else {
            continue;
        };
        let layer = stroke_layer(canvas, lines, color, thickness)?;
        composite_layer_rgba8_premul(frame, &layer, opacity, settings.blend_mode)?;
    }
    Ok(())
}

fn stroke_layer(
    canvas: Canvas,
    lines: &[Polyline],
    color: ColorDef,
    width: f64,
) -> HypnoResult<Vec<u8>> {
    render_layer(canvas, |ctx| {
        ctx.set_paint(paint(color));
        ctx.set_stroke(pattern_stroke(width));
        for line in lines {
            ctx.stroke_path(&polyline_path(line));
        }
        Ok(())
    })
}

fn draw_sparkles<R: Rng + ?Sized>(
    frame: &mut [u8],
    settings: &PatternSettings,
    canvas: Canvas,
    rng: &mut R,
) -> HypnoResult<()> {
    if settings.sparkle_amount == 0 {
        return Ok(());
    }
    let Some(color) = layer_color(&settings.sparkle_color, "sparkles") else {
        return Ok(());
    };
    let dots = generate_sparkles(settings.sparkle_amount, settings.sparkle_size, canvas, rng);
    let mut layer = render_layer(canvas, |ctx| {
        ctx.set_paint(paint(color));
        for dot in dots.iter().filter(|d| d.radius > 0.0) {
            ctx.fill_path(&circle_path(dot.center, dot.radius));
        }
        Ok(())
    })?;
    blur_sigma_in_place(&mut layer, canvas.width, canvas.height, settings.sparkle_blur)?;
    composite_layer_rgba8_premul(
        frame,
        &layer,
        settings.sparkle_opacity as f32,
        BlendMode::Lighter,
    )
}

fn draw_text(
    frame: &mut [u8],
    overlays: &[TextOverlay],
    canvas: Canvas,
    text: &mut TextEngine,
) -> HypnoResult<()> {
    if overlays.is_empty() {
        return Ok(());
    }
    if !text.has_font() {
        tracing::warn!("no overlay font loaded; painting label boxes without glyphs");
    }

    let mut boxes = Vec::with_capacity(overlays.len());
    for overlay in overlays {
        let layout = layout_text_box(overlay, canvas, text)?;
        let fill = layer_color(&overlay.style.background_color, "text box");
        let ink = layer_color(&overlay.style.color, "text");
        let mut lines = Vec::new();
        if let Some(ink) = ink {
            let [r, g, b, a] = ink.to_rgba8();
            let brush = TextBrushRgba8 { r, g, b, a };
            for (i, line) in overlay.lines().enumerate() {
                if let Some(shaped) = text.shape_line(line, layout.font_size, brush)? {
                    lines.push((i, shaped));
                }
            }
        }
        boxes.push((layout, fill, lines));
    }

    let layer = render_layer(canvas, |ctx| {
        for (layout, fill, lines) in &boxes {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            if let Some(fill) = fill {
                ctx.set_paint(paint(*fill));
                ctx.fill_path(&rounded_rect_path(layout.rect, layout.corner_radius));
            }
            for (i, (shaped, font)) in lines {
                let x = layout.center_x() - f64::from(shaped.width()) / 2.0;
                let y = layout.line_center_y(*i) - f64::from(shaped.height()) / 2.0;
                ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
                for line in shaped.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));
                        let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
            }
        }
        Ok(())
    })?;
    premul_over_in_place(frame, &layer, 1.0);
    Ok(())
}

fn draw_guide(frame: &mut [u8], center: Point, canvas: Canvas) -> HypnoResult<()> {
    let [r, g, b, a] = GUIDE_COLOR;
    let layer = render_layer(canvas, |ctx| {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(GUIDE_LINE_WIDTH));
        ctx.stroke_path(&circle_path(center, GUIDE_RADIUS));
        ctx.stroke_path(&segment_path(
            Point::new(center.x - GUIDE_ARM, center.y),
            Point::new(center.x + GUIDE_ARM, center.y),
        ));
        ctx.stroke_path(&segment_path(
            Point::new(center.x, center.y - GUIDE_ARM),
            Point::new(center.x, center.y + GUIDE_ARM),
        ));
        Ok(())
    })?;
    premul_over_in_place(frame, &layer, 1.0);
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
