use super::*;

#[test]
fn canvas_diagonal_and_pixel_mapping() {
    let c = Canvas::new(300, 400);
    assert!((c.diagonal() - 500.0).abs() < 1e-9);
    assert_eq!(c.to_pixels(Point::new(0.5, 0.25)), Point::new(150.0, 100.0));
}

#[test]
fn unit_mapping_clamps_each_axis() {
    let c = Canvas::new(200, 100);
    assert_eq!(c.to_unit_clamped(Point::new(-20.0, 50.0)), Point::new(0.0, 0.5));
    assert_eq!(c.to_unit_clamped(Point::new(250.0, 900.0)), Point::new(1.0, 1.0));
    assert_eq!(c.to_unit_clamped(Point::new(f64::NAN, 0.0)), Point::new(0.0, 0.0));
}

#[test]
fn empty_canvas_maps_to_origin() {
    let c = Canvas::new(0, 10);
    assert!(c.is_empty());
    assert_eq!(c.to_unit_clamped(Point::new(5.0, 5.0)), Point::ZERO);
}

#[test]
fn premul_from_straight() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
}
