use crate::foundation::error::{HypnoError, HypnoResult};
use crate::foundation::math::{mul_div255_u8, opacity_u8};
use crate::scene::settings::BlendMode;

/// Composite premultiplied `src` onto premultiplied `dst` with a layer opacity and blend mode.
pub(crate) fn composite_layer_rgba8_premul(
    dst: &mut [u8],
    src: &[u8],
    opacity: f32,
    blend: BlendMode,
) -> HypnoResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(HypnoError::evaluation(
            "composite_layer_rgba8_premul expects equal-length rgba8 buffers",
        ));
    }

    // Dispatch once per layer; each branch monomorphizes its own kernel.
    match blend {
        BlendMode::Normal => premul_over_in_place(dst, src, opacity),
        BlendMode::Lighter => additive_in_place(dst, src, opacity),
        BlendMode::Multiply => blend_in_place(dst, src, opacity, |s, d| s * d),
        BlendMode::Screen => blend_in_place(dst, src, opacity, |s, d| s + d - s * d),
        BlendMode::Overlay => blend_in_place(dst, src, opacity, |s, d| hard_light(d, s)),
        BlendMode::Darken => blend_in_place(dst, src, opacity, f32::min),
        BlendMode::Lighten => blend_in_place(dst, src, opacity, f32::max),
        BlendMode::HardLight => blend_in_place(dst, src, opacity, hard_light),
        BlendMode::SoftLight => blend_in_place(dst, src, opacity, soft_light),
        BlendMode::Difference => blend_in_place(dst, src, opacity, |s, d| (d - s).abs()),
    }
    Ok(())
}

fn hard_light(s: f32, d: f32) -> f32 {
    if s <= 0.5 {
        2.0 * s * d
    } else {
        1.0 - 2.0 * (1.0 - s) * (1.0 - d)
    }
}

fn soft_light(s: f32, d: f32) -> f32 {
    if s <= 0.5 {
        d - (1.0 - 2.0 * s) * d * (1.0 - d)
    } else {
        let g = if d <= 0.25 {
            ((16.0 * d - 12.0) * d + 4.0) * d
        } else {
            d.sqrt()
        };
        d + (2.0 * s - 1.0) * (g - d)
    }
}

pub(crate) fn premul_over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) {
    let op = opacity_u8(opacity);
    if op == 0 {
        return;
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let sa = mul_div255_u8(u16::from(s[3]), op);
        if sa == 0 {
            continue;
        }
        let inv = 255u16 - u16::from(sa);
        d[3] = sa.saturating_add(mul_div255_u8(u16::from(d[3]), inv));
        for c in 0..3 {
            let sc = mul_div255_u8(u16::from(s[c]), op);
            let dc = mul_div255_u8(u16::from(d[c]), inv);
            d[c] = sc.saturating_add(dc);
        }
    }
}

/// `plus` operator: premultiplied channels add and saturate.
fn additive_in_place(dst: &mut [u8], src: &[u8], opacity: f32) {
    let op = opacity_u8(opacity);
    if op == 0 {
        return;
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        for c in 0..4 {
            d[c] = d[c].saturating_add(mul_div255_u8(u16::from(s[c]), op));
        }
    }
}

#[inline(always)]
fn blend_in_place<F>(dst: &mut [u8], src: &[u8], opacity: f32, blend_fn: F)
where
    F: Fn(f32, f32) -> f32,
{
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        // Source-over with the blend applied to unpremultiplied channels:
        // out_a = sa + da * (1 - sa)
        // out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da
        let sa = (f32::from(s[3]) / 255.0) * opacity;
        let da = f32::from(d[3]) / 255.0;

        for c in 0..3 {
            let sp = (f32::from(s[c]) / 255.0) * opacity;
            let dp = f32::from(d[c]) / 255.0;
            let sc = if sa > 0.0 { (sp / sa).clamp(0.0, 1.0) } else { 0.0 };
            let dc = if da > 0.0 { (dp / da).clamp(0.0, 1.0) } else { 0.0 };
            let b = blend_fn(sc, dc).clamp(0.0, 1.0);
            let out = (sp * (1.0 - da) + dp * (1.0 - sa) + b * sa * da).clamp(0.0, 1.0);
            d[c] = (out * 255.0).round() as u8;
        }
        let out_a = (sa + da * (1.0 - sa)).clamp(0.0, 1.0);
        d[3] = (out_a * 255.0).round() as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
