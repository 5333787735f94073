use super::*;

#[test]
fn empty_layer_is_transparent() {
    let out = render_layer(Canvas::new(8, 4), |_| Ok(())).unwrap();
    assert_eq!(out.len(), 8 * 4 * 4);
    assert!(out.iter().all(|&b| b == 0));
}

#[test]
fn filled_rect_covers_pixels() {
    let out = render_layer(Canvas::new(8, 8), |ctx| {
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 0, 0, 255));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, 8.0, 8.0));
        Ok(())
    })
    .unwrap();
    assert_eq!(&out[0..4], &[255, 0, 0, 255]);
}

#[test]
fn oversized_or_empty_canvas_is_rejected() {
    assert!(render_layer(Canvas::new(70_000, 1), |_| Ok(())).is_err());
    assert!(render_layer(Canvas::new(0, 4), |_| Ok(())).is_err());
}

#[test]
fn polyline_path_closes_rings_only() {
    let pts = vec![
        Point::new(0.0, 0.0),
        Point::new(4.0, 0.0),
        Point::new(4.0, 4.0),
    ];
    let open = polyline_path(&Polyline {
        points: pts.clone(),
        closed: false,
    });
    let closed = polyline_path(&Polyline {
        points: pts,
        closed: true,
    });
    assert_eq!(open.elements().len(), 3);
    assert_eq!(closed.elements().len(), 4);
    assert!(polyline_path(&Polyline::default()).elements().is_empty());
}

#[test]
fn pattern_stroke_has_round_caps_and_miter_joins() {
    let stroke = pattern_stroke(6.0);
    assert_eq!(stroke.width, 6.0);
    assert_eq!(stroke.start_cap, vello_cpu::kurbo::Cap::Round);
    assert_eq!(stroke.end_cap, vello_cpu::kurbo::Cap::Round);
    assert_eq!(stroke.join, vello_cpu::kurbo::Join::Miter);
    assert_eq!(stroke.miter_limit, 10.0);
}

#[test]
fn stroked_polyline_paints_along_segment() {
    let line = Polyline {
        points: vec![Point::new(1.0, 8.0), Point::new(15.0, 8.0)],
        closed: false,
    };
    let out = render_layer(Canvas::new(16, 16), |ctx| {
        ctx.set_paint(paint(ColorDef::parse("#ffffff")?));
        ctx.set_stroke(pattern_stroke(4.0));
        ctx.stroke_path(&polyline_path(&line));
        Ok(())
    })
    .unwrap();
    let i = (8 * 16 + 8) * 4;
    assert_eq!(out[i + 3], 255);
    assert_eq!(out[3], 0);
}
