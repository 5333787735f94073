use super::*;

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn premultiply_then_unpremultiply_opaque_is_identity() {
    let mut px = vec![10u8, 20, 30, 255, 0, 0, 0, 0];
    premultiply_rgba8_in_place(&mut px);
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![10, 20, 30, 255, 0, 0, 0, 0]);
}

#[test]
fn opacity_quantization_clamps() {
    assert_eq!(opacity_u8(-1.0), 0);
    assert_eq!(opacity_u8(0.5), 128);
    assert_eq!(opacity_u8(3.0), 255);
}

#[test]
fn spiral_growth_is_spacing_per_turn() {
    let b = spiral_growth(20.0);
    assert!((b * std::f64::consts::TAU - 20.0).abs() < 1e-12);
}
