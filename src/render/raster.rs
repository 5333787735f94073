use vello_cpu::kurbo::{BezPath, Shape};

use crate::assets::color::ColorDef;
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{HypnoError, HypnoResult};
use crate::geometry::pattern::Polyline;

const SHAPE_TOLERANCE: f64 = 0.1;
const PATTERN_MITER_LIMIT: f64 = 10.0;

/// Rasterize one vector layer into a fresh transparent premultiplied RGBA8 buffer.
///
/// `vello_cpu` renders into its own target, so every layer is drawn alone and blended onto the
/// frame afterwards.
pub(crate) fn render_layer(
    canvas: Canvas,
    draw: impl FnOnce(&mut vello_cpu::RenderContext) -> HypnoResult<()>,
) -> HypnoResult<Vec<u8>> {
    let (w, h) = dims_u16(canvas)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    draw(&mut ctx)?;
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

fn dims_u16(canvas: Canvas) -> HypnoResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| HypnoError::evaluation("layer width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| HypnoError::evaluation("layer height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(HypnoError::evaluation("layer has an empty side"));
    }
    Ok((w, h))
}

pub(crate) fn paint(color: ColorDef) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = color.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

/// Pattern stroke: round caps, miter joins limited at 10 widths like a 2D canvas context.
pub(crate) fn pattern_stroke(width: f64) -> vello_cpu::kurbo::Stroke {
    vello_cpu::kurbo::Stroke::new(width)
        .with_caps(vello_cpu::kurbo::Cap::Round)
        .with_join(vello_cpu::kurbo::Join::Miter)
        .with_miter_limit(PATTERN_MITER_LIMIT)
}

fn cpu_point(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn polyline_path(line: &Polyline) -> BezPath {
    let mut out = BezPath::new();
    let mut points = line.points.iter();
    let Some(first) = points.next() else {
        return out;
    };
    out.move_to(cpu_point(*first));
    for p in points {
        out.line_to(cpu_point(*p));
    }
    if line.closed {
        out.close_path();
    }
    out
}

pub(crate) fn circle_path(center: Point, radius: f64) -> BezPath {
    vello_cpu::kurbo::Circle::new(cpu_point(center), radius).to_path(SHAPE_TOLERANCE)
}

pub(crate) fn rounded_rect_path(rect: Rect, radius: f64) -> BezPath {
    vello_cpu::kurbo::RoundedRect::new(rect.x0, rect.y0, rect.x1, rect.y1, radius)
        .to_path(SHAPE_TOLERANCE)
}

pub(crate) fn segment_path(a: Point, b: Point) -> BezPath {
    let mut out = BezPath::new();
    out.move_to(cpu_point(a));
    out.line_to(cpu_point(b));
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
