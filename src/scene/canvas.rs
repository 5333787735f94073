use crate::foundation::core::Canvas;

/// Largest side a computed canvas may have.
pub const MAX_CANVAS_SIZE: u32 = 2048;

/// Aspect-ratio presets offered to hosts.
pub const ASPECT_RATIO_PRESETS: [&str; 8] = [
    "original", "1:1", "4:5", "9:16", "16:9", "4:3", "3:2", "1280:1063",
];

const FIXED_TOKEN: &str = "1280:1063";
const RATIO_TOLERANCE: f64 = 0.01;

/// Parsed aspect-ratio token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AspectRatio {
    /// Follow the source image.
    Original,
    /// Crop to `width / height`.
    Ratio(f64),
    /// Force an exact pixel size.
    Fixed(Canvas),
}

impl AspectRatio {
    /// Parse a wire token. Anything unrecognized means [`AspectRatio::Original`].
    pub fn parse(token: &str) -> Self {
        if token == FIXED_TOKEN {
            return AspectRatio::Fixed(Canvas::new(1280, 1063));
        }
        let mut parts = token.split(':');
        let (Some(w), Some(h)) = (
            parts.next().and_then(leading_integer),
            parts.next().and_then(leading_integer),
        ) else {
            return AspectRatio::Original;
        };
        let ratio = w / h;
        if w <= 0.0 || h <= 0.0 || !ratio.is_finite() {
            return AspectRatio::Original;
        }
        AspectRatio::Ratio(ratio)
    }
}

/// Integer prefix of `s` after leading whitespace and an optional sign (`"16.5"` reads as 16).
fn leading_integer(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (sign, rest) = match s.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits: f64 = rest[..end].parse().ok()?;
    Some(sign * digits)
}

/// Canvas size for a source image under an aspect-ratio token.
///
/// The image is first capped so neither side exceeds `max_size`, then cropped along one axis
/// to the target ratio. `None` for images with a zero side.
pub fn compute_canvas(
    image_width: u32,
    image_height: u32,
    aspect_token: &str,
    max_size: u32,
) -> Option<Canvas> {
    if image_width == 0 || image_height == 0 {
        return None;
    }

    let target = match AspectRatio::parse(aspect_token) {
        AspectRatio::Fixed(canvas) => return Some(canvas),
        AspectRatio::Ratio(r) => r,
        AspectRatio::Original => f64::from(image_width) / f64::from(image_height),
    };

    let mut w = f64::from(image_width);
    let mut h = f64::from(image_height);
    let max = f64::from(max_size.max(1));

    if w > max || h > max {
        let ratio = w / h;
        if w > h {
            w = max;
            h = max / ratio;
        } else {
            h = max;
            w = max * ratio;
        }
    }

    let current = w / h;
    if (current - target).abs() > RATIO_TOLERANCE {
        if current > target {
            w = h * target;
        } else {
            h = w / target;
        }
    }

    Some(Canvas::new(
        (w.round() as u32).max(1),
        (h.round() as u32).max(1),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/canvas.rs"]
mod tests;
