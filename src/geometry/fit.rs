use crate::foundation::core::Canvas;

/// Integer source sub-rectangle sampled to fill the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SourceRect {
    /// Left edge in source pixels.
    pub x: u32,
    /// Top edge in source pixels.
    pub y: u32,
    /// Width in source pixels (at least 1).
    pub width: u32,
    /// Height in source pixels (at least 1).
    pub height: u32,
}

/// "Cover" fit: the centered crop of an `image_w × image_h` source that matches the canvas
/// aspect ratio without letterboxing.
///
/// A wider source keeps its full height and loses columns; otherwise the full width is kept and
/// rows are cropped. Returns `None` when either the source or the canvas is empty.
pub fn cover_crop(image_w: u32, image_h: u32, canvas: Canvas) -> Option<SourceRect> {
    if image_w == 0 || image_h == 0 || canvas.is_empty() {
        return None;
    }
    let (iw, ih) = (f64::from(image_w), f64::from(image_h));
    let image_ratio = iw / ih;
    let canvas_ratio = canvas.w() / canvas.h();

    let (sw, sh) = if image_ratio > canvas_ratio {
        (ih * canvas_ratio, ih)
    } else {
        (iw, iw / canvas_ratio)
    };
    let width = (sw.round() as u32).clamp(1, image_w);
    let height = (sh.round() as u32).clamp(1, image_h);

    Some(SourceRect {
        x: (image_w - width) / 2,
        y: (image_h - height) / 2,
        width,
        height,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/fit.rs"]
mod tests;
