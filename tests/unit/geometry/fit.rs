use super::*;

#[test]
fn wider_source_crops_columns() {
    let r = cover_crop(2000, 1000, Canvas::new(500, 500)).unwrap();
    assert_eq!(
        r,
        SourceRect {
            x: 500,
            y: 0,
            width: 1000,
            height: 1000
        }
    );
}

#[test]
fn taller_source_crops_rows() {
    let r = cover_crop(1000, 3000, Canvas::new(1600, 900)).unwrap();
    assert_eq!(r.width, 1000);
    assert_eq!(r.height, 563);
    assert_eq!(r.x, 0);
    assert_eq!(r.y, (3000 - 563) / 2);
}

#[test]
fn matching_ratio_is_identity() {
    let r = cover_crop(800, 600, Canvas::new(400, 300)).unwrap();
    assert_eq!(
        r,
        SourceRect {
            x: 0,
            y: 0,
            width: 800,
            height: 600
        }
    );
}

#[test]
fn extreme_ratios_keep_one_pixel() {
    let r = cover_crop(1, 1000, Canvas::new(2000, 1)).unwrap();
    assert!(r.width >= 1 && r.height >= 1);
    assert!(r.x + r.width <= 1);
    assert!(r.y + r.height <= 1000);
}

#[test]
fn empty_inputs_have_no_crop() {
    assert!(cover_crop(0, 10, Canvas::new(10, 10)).is_none());
    assert!(cover_crop(10, 10, Canvas::new(0, 10)).is_none());
}
