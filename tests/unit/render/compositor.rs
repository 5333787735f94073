use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::scene::overlay::{OverlayId, TextStyle};

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    SourceImage::from_rgba8(w, h, rgba.repeat((w * h) as usize)).unwrap()
}

fn quiet() -> PatternSettings {
    PatternSettings {
        opacity: 0.0,
        sparkle_amount: 0,
        ..PatternSettings::default()
    }
}

const FONT_FIXTURE: &str = "tests/data/fonts/DejaVuSansMono-Bold.ttf";

fn font_engine() -> TextEngine {
    TextEngine::with_font_bytes(std::fs::read(FONT_FIXTURE).unwrap()).unwrap()
}

fn render(
    settings: &PatternSettings,
    overlays: &[TextOverlay],
    image: &SourceImage,
    canvas: Canvas,
    guide: bool,
    seed: u64,
) -> FrameRGBA {
    let inputs = FrameInputs {
        settings,
        overlays,
        image,
        canvas,
        show_guide: guide,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    render_frame(&inputs, &mut TextEngine::new(), &mut rng, &RenderOpts::default()).unwrap()
}

#[test]
fn background_only_when_layers_are_silent() {
    let img = solid(8, 8, [10, 20, 30, 255]);
    let f = render(&quiet(), &[], &img, Canvas::new(8, 8), false, 0);
    assert!(f.premultiplied);
    assert_eq!((f.width, f.height), (8, 8));
    assert!(f.data.chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
}

#[test]
fn thick_rings_cover_the_frame() {
    let img = solid(32, 32, [0, 0, 255, 255]);
    let settings = PatternSettings {
        is_concentric: true,
        spacing: 4.0,
        thickness: 12.0,
        opacity: 1.0,
        color: "#ff0000".to_owned(),
        ..quiet()
    };
    let f = render(&settings, &[], &img, Canvas::new(32, 32), false, 0);
    assert_eq!(f.pixel(5, 5), Some([255, 0, 0, 255]));
}

#[test]
fn pattern_opacity_scales_the_stroke() {
    let img = solid(32, 32, [0, 0, 0, 255]);
    let settings = PatternSettings {
        is_concentric: true,
        spacing: 4.0,
        thickness: 12.0,
        opacity: 0.5,
        color: "#ffffff".to_owned(),
        ..quiet()
    };
    let f = render(&settings, &[], &img, Canvas::new(32, 32), false, 0);
    let px = f.pixel(5, 5).unwrap();
    assert!((i32::from(px[0]) - 128).abs() <= 2, "{px:?}");
}

#[test]
fn invalid_pattern_color_skips_layer() {
    let img = solid(8, 8, [10, 20, 30, 255]);
    let settings = PatternSettings {
        opacity: 1.0,
        color: "not-a-color".to_owned(),
        ..quiet()
    };
    let f = render(&settings, &[], &img, Canvas::new(8, 8), false, 0);
    assert!(f.data.chunks_exact(4).all(|p| p == [10, 20, 30, 255]));
}

#[test]
fn sparkles_only_brighten() {
    let img = solid(24, 24, [40, 40, 40, 255]);
    let settings = PatternSettings {
        sparkle_amount: 200,
        sparkle_size: 4.0,
        sparkle_opacity: 1.0,
        ..quiet()
    };
    let f = render(&settings, &[], &img, Canvas::new(24, 24), false, 9);
    assert!(f.data.chunks_exact(4).all(|p| p[0] >= 40 && p[3] == 255));
    assert!(f.data.chunks_exact(4).any(|p| p[0] > 40));
}

#[test]
fn sparkles_follow_the_seed() {
    let img = solid(24, 24, [0, 0, 0, 255]);
    let settings = PatternSettings {
        sparkle_amount: 50,
        sparkle_size: 3.0,
        ..quiet()
    };
    let canvas = Canvas::new(24, 24);
    let a = render(&settings, &[], &img, canvas, false, 5);
    let b = render(&settings, &[], &img, canvas, false, 5);
    let c = render(&settings, &[], &img, canvas, false, 6);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn text_box_ignores_pattern_blend_and_opacity() {
    let img = solid(64, 64, [200, 200, 200, 255]);
    let settings = PatternSettings {
        is_concentric: true,
        spacing: 4.0,
        thickness: 12.0,
        opacity: 0.7,
        blend_mode: BlendMode::Difference,
        color: "#ff00ff".to_owned(),
        blur: 2.0,
        ..quiet()
    };
    let label = TextOverlay::centered(
        OverlayId(1),
        TextStyle {
            background_color: "#00ff00".to_owned(),
            color: "#000000".to_owned(),
            ..TextStyle::default()
        },
    );
    let f = render(&settings, &[label], &img, Canvas::new(64, 64), false, 0);
    // No font loaded: the box is painted without glyphs.
    assert_eq!(f.pixel(32, 32), Some([0, 255, 0, 255]));
}

#[test]
fn guide_only_while_dragging() {
    let img = solid(64, 64, [0, 0, 0, 255]);
    let canvas = Canvas::new(64, 64);
    let on = render(&quiet(), &[], &img, canvas, true, 0);
    let off = render(&quiet(), &[], &img, canvas, false, 0);
    // Horizontal arm of the cross, away from the circle.
    assert_eq!(off.pixel(45, 32), Some([0, 0, 0, 255]));
    assert!(on.pixel(45, 32).unwrap()[0] > 100);
    assert_eq!(on.pixel(2, 2), Some([0, 0, 0, 255]));
}

#[test]
fn clear_color_shows_through_transparent_photo() {
    let img = solid(4, 4, [0, 0, 0, 0]);
    let inputs = FrameInputs {
        settings: &quiet(),
        overlays: &[],
        image: &img,
        canvas: Canvas::new(4, 4),
        show_guide: false,
    };
    let opts = RenderOpts {
        clear_rgba: Some([255, 255, 255, 255]),
        ..RenderOpts::default()
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let f = render_frame(&inputs, &mut TextEngine::new(), &mut rng, &opts).unwrap();
    assert_eq!(f.pixel(0, 0), Some([255, 255, 255, 255]));
}

#[test]
fn empty_canvas_is_an_error() {
    let img = solid(4, 4, [0, 0, 0, 255]);
    let inputs = FrameInputs {
        settings: &quiet(),
        overlays: &[],
        image: &img,
        canvas: Canvas::new(0, 4),
        show_guide: false,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut engine = TextEngine::new();
    assert!(render_frame(&inputs, &mut engine, &mut rng, &RenderOpts::default()).is_err());
}

#[test]
fn zero_size_label_still_renders_with_font() {
    let img = solid(64, 64, [200, 200, 200, 255]);
    let canvas = Canvas::new(64, 64);
    let style = TextStyle {
        font_size: 0.0,
        padding: 200.0,
        background_color: "#00ff00".to_owned(),
        ..TextStyle::default()
    };
    let labels = [TextOverlay::centered(OverlayId(1), style)];
    let inputs = FrameInputs {
        settings: &quiet(),
        overlays: &labels,
        image: &img,
        canvas,
        show_guide: false,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut engine = font_engine();
    let f = render_frame(&inputs, &mut engine, &mut rng, &RenderOpts::default()).unwrap();
    assert_eq!((f.width, f.height), (64, 64));
    // Padding alone still gives the box some area.
    assert_eq!(f.pixel(32, 32), Some([0, 255, 0, 255]));
}

#[test]
fn glyph_ink_stays_inside_the_text_box() {
    let img = solid(540, 200, [255, 255, 255, 255]);
    let canvas = Canvas::new(540, 200);
    let style = TextStyle {
        text: "HHHH\nHH".to_owned(),
        font_size: 64.0,
        color: "#000000".to_owned(),
        background_color: "#00000000".to_owned(),
        ..TextStyle::default()
    };
    let labels = [TextOverlay::centered(OverlayId(1), style)];
    let inputs = FrameInputs {
        settings: &quiet(),
        overlays: &labels,
        image: &img,
        canvas,
        show_guide: false,
    };
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut engine = font_engine();
    let f = render_frame(&inputs, &mut engine, &mut rng, &RenderOpts::default()).unwrap();
    let rect = layout_text_box(&labels[0], canvas, &mut engine).unwrap().rect;

    let mut inked = 0usize;
    for y in 0..f.height {
        for x in 0..f.width {
            let Some(px) = f.pixel(x, y) else { continue };
            if px == [255, 255, 255, 255] {
                continue;
            }
            inked += 1;
            let (fx, fy) = (f64::from(x), f64::from(y));
            assert!(
                fx >= rect.x0 - 1.0 && fx <= rect.x1 + 1.0,
                "ink at x={x} outside {rect:?}"
            );
            assert!(
                fy >= rect.y0 - 1.0 && fy <= rect.y1 + 1.0,
                "ink at y={y} outside {rect:?}"
            );
        }
    }
    assert!(inked > 50, "expected glyph ink, got {inked} pixels");
}
