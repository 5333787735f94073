use rand::Rng;

use crate::foundation::core::{Canvas, Point};

/// One sparkle dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    /// Dot center in pixels.
    pub center: Point,
    /// Dot radius in pixels.
    pub radius: f64,
}

/// Scatter `count` dots uniformly over the canvas with radii in `[0, size)`.
///
/// Nothing is cached: each call draws fresh samples from `rng`. A non-finite or negative `size`
/// produces zero-radius dots.
pub fn generate_sparkles<R: Rng + ?Sized>(
    count: u32,
    size: f64,
    canvas: Canvas,
    rng: &mut R,
) -> Vec<Sparkle> {
    if canvas.is_empty() {
        return Vec::new();
    }
    let size = if size.is_finite() { size.max(0.0) } else { 0.0 };
    (0..count)
        .map(|_| {
            let x = rng.random::<f64>() * canvas.w();
            let y = rng.random::<f64>() * canvas.h();
            let radius = rng.random::<f64>() * size;
            Sparkle {
                center: Point::new(x, y),
                radius,
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/sparkle.rs"]
mod tests;
