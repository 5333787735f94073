use crate::foundation::error::{HypnoError, HypnoResult};

const Q16_ONE: u32 = 1 << 16;

/// Kernel radius covering three standard deviations.
pub(crate) fn radius_for_sigma(sigma: f64) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (3.0 * sigma).ceil().min(f64::from(u16::MAX)) as u32
}

/// Sampled 1D gaussian whose Q16 weights sum to exactly one.
pub(crate) struct GaussianKernel {
    weights: Vec<u32>,
}

impl GaussianKernel {
    /// `None` when `sigma` spreads nothing. The radius never exceeds `max_radius`.
    pub(crate) fn new(sigma: f64, max_radius: u32) -> Option<Self> {
        let radius = radius_for_sigma(sigma).min(max_radius);
        if radius == 0 {
            return None;
        }

        let two_var = 2.0 * sigma * sigma;
        let center = f64::from(radius);
        let raw: Vec<f64> = (0..=2 * radius)
            .map(|i| {
                let d = f64::from(i) - center;
                (-d * d / two_var).exp()
            })
            .collect();
        // The center sample is exp(0), so the total is at least 1.
        let total: f64 = raw.iter().sum();
        let mut weights: Vec<u32> = raw
            .iter()
            .map(|w| (w / total * f64::from(Q16_ONE)).round() as u32)
            .collect();

        // Rounding drift goes to the center tap.
        let drift = i64::from(Q16_ONE) - weights.iter().map(|&w| i64::from(w)).sum::<i64>();
        let mid = radius as usize;
        weights[mid] = (i64::from(weights[mid]) + drift).clamp(0, i64::from(Q16_ONE)) as u32;
        Some(Self { weights })
    }

    pub(crate) fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    pub(crate) fn weights(&self) -> &[u32] {
        &self.weights
    }
}

#[derive(Clone, Copy, Debug)]
enum Axis {
    Horizontal,
    Vertical,
}

/// Gaussian blur of a premultiplied RGBA8 buffer in place, `sigma` in pixels.
///
/// `sigma <= 0` (or non-finite) leaves the buffer untouched. The kernel radius is capped at the
/// larger image side since edge pixels are clamped anyway.
pub(crate) fn blur_sigma_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    sigma: f64,
) -> HypnoResult<()> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| HypnoError::evaluation("blur buffer size overflow"))?;
    if buf.len() != expected_len {
        return Err(HypnoError::evaluation(format!(
            "blur buffer is {} bytes, expected {expected_len} for {width}x{height}",
            buf.len()
        )));
    }
    if expected_len == 0 {
        return Ok(());
    }
    let Some(kernel) = GaussianKernel::new(sigma, width.max(height)) else {
        return Ok(());
    };

    let (w, h) = (width as usize, height as usize);
    let mut rows = vec![0u8; expected_len];
    convolve(buf, &mut rows, w, h, &kernel, Axis::Horizontal);
    convolve(&rows, buf, w, h, &kernel, Axis::Vertical);
    Ok(())
}

/// One separable pass. Taps past either end of a row or column repeat the edge pixel.
fn convolve(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
    height: usize,
    kernel: &GaussianKernel,
    axis: Axis,
) {
    let (line_len, step) = match axis {
        Axis::Horizontal => (width, 1),
        Axis::Vertical => (height, width),
    };
    let last = line_len - 1;
    let radius = kernel.radius();

    for (i, out) in dst.chunks_exact_mut(4).enumerate() {
        let pos = match axis {
            Axis::Horizontal => i % width,
            Axis::Vertical => i / width,
        };
        let line_start = i - pos * step;

        let mut acc = [0u64; 4];
        for (k, &weight) in kernel.weights().iter().enumerate() {
            let tap = (pos + k).saturating_sub(radius).min(last);
            let at = (line_start + tap * step) * 4;
            for (a, &c) in acc.iter_mut().zip(&src[at..at + 4]) {
                *a += u64::from(weight) * u64::from(c);
            }
        }
        for (o, a) in out.iter_mut().zip(acc) {
            *o = ((a + u64::from(Q16_ONE / 2)) >> 16).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
