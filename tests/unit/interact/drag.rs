use super::*;
use crate::assets::text::ApproxTextMeasure;
use crate::scene::overlay::TextStyle;

const CANVAS: Canvas = Canvas {
    width: 1080,
    height: 1080,
};

fn label(id: u64, x: f64, y: f64) -> TextOverlay {
    TextOverlay {
        id: OverlayId(id),
        x,
        y,
        style: TextStyle::default(),
    }
}

fn feed(
    c: &mut DragController,
    overlays: &[TextOverlay],
    event: PointerEvent,
) -> PointerOutcome {
    c.handle(event, overlays, CANVAS, &mut ApproxTextMeasure::default())
        .unwrap()
}

#[test]
fn down_on_empty_area_drags_center() {
    let mut c = DragController::new();
    let out = feed(&mut c, &[], PointerEvent::Down(Point::new(270.0, 810.0)));
    assert_eq!(c.state(), DragState::DraggingCenter);
    assert!(c.is_dragging_center());
    assert_eq!(out.effect, DragEffect::SetCenter(Point::new(0.25, 0.75)));
    assert_eq!(out.cursor, CursorHint::Crosshair);

    let out = feed(&mut c, &[], PointerEvent::Move(Point::new(540.0, 540.0)));
    assert_eq!(out.effect, DragEffect::SetCenter(Point::new(0.5, 0.5)));
}

#[test]
fn center_drag_clamps_past_edges() {
    let mut c = DragController::new();
    feed(&mut c, &[], PointerEvent::Down(Point::new(10.0, 10.0)));
    let out = feed(&mut c, &[], PointerEvent::Move(Point::new(-500.0, 5000.0)));
    assert_eq!(out.effect, DragEffect::SetCenter(Point::new(0.0, 1.0)));
}

#[test]
fn text_drag_preserves_grab_offset() {
    let overlays = vec![label(1, 0.5, 0.5)];
    let mut c = DragController::new();
    let out = feed(&mut c, &overlays, PointerEvent::Down(Point::new(550.0, 530.0)));
    assert_eq!(out.effect, DragEffect::None);
    assert_eq!(out.cursor, CursorHint::Grabbing);
    assert_eq!(
        c.state(),
        DragState::DraggingText {
            id: OverlayId(1),
            offset: Vec2::new(10.0, -10.0)
        }
    );

    let out = feed(&mut c, &overlays, PointerEvent::Move(Point::new(280.0, 280.0)));
    let DragEffect::MoveOverlay { id, anchor } = out.effect else {
        panic!("expected a label move, got {:?}", out.effect);
    };
    assert_eq!(id, OverlayId(1));
    assert!((anchor.x - 0.25).abs() < 1e-12);
    assert!((anchor.y - 290.0 / 1080.0).abs() < 1e-12);
}

#[test]
fn text_drag_clamps_anchor() {
    let overlays = vec![label(1, 0.5, 0.5)];
    let mut c = DragController::new();
    feed(&mut c, &overlays, PointerEvent::Down(Point::new(540.0, 540.0)));
    let out = feed(&mut c, &overlays, PointerEvent::Move(Point::new(99_999.0, -1.0)));
    assert_eq!(
        out.effect,
        DragEffect::MoveOverlay {
            id: OverlayId(1),
            anchor: Point::new(1.0, 0.0)
        }
    );
}

#[test]
fn overlapping_labels_resolve_to_last_added() {
    let overlays = vec![label(1, 0.5, 0.5), label(2, 0.5, 0.5)];
    let mut c = DragController::new();
    feed(&mut c, &overlays, PointerEvent::Down(Point::new(540.0, 540.0)));
    assert!(matches!(
        c.state(),
        DragState::DraggingText { id: OverlayId(2), .. }
    ));
}

#[test]
fn up_and_leave_return_to_idle() {
    let mut c = DragController::new();
    feed(&mut c, &[], PointerEvent::Down(Point::new(1.0, 1.0)));
    feed(&mut c, &[], PointerEvent::Up);
    assert_eq!(c.state(), DragState::Idle);

    feed(&mut c, &[], PointerEvent::Down(Point::new(1.0, 1.0)));
    let out = feed(&mut c, &[], PointerEvent::Leave);
    assert_eq!(c.state(), DragState::Idle);
    assert_eq!(out.effect, DragEffect::None);
}

#[test]
fn idle_move_reports_hover_without_effects() {
    let overlays = vec![label(7, 0.5, 0.5)];
    let mut c = DragController::new();
    let out = feed(&mut c, &overlays, PointerEvent::Move(Point::new(540.0, 540.0)));
    assert_eq!(out.effect, DragEffect::None);
    assert_eq!(out.hovering, Some(OverlayId(7)));
    assert_eq!(out.cursor, CursorHint::Grab);

    let out = feed(&mut c, &overlays, PointerEvent::Move(Point::new(5.0, 5.0)));
    assert_eq!(out.hovering, None);
    assert_eq!(out.cursor, CursorHint::Crosshair);
    assert_eq!(c.state(), DragState::Idle);
}

#[test]
fn forgetting_the_dragged_label_stops_the_drag() {
    let overlays = vec![label(3, 0.5, 0.5)];
    let mut c = DragController::new();
    feed(&mut c, &overlays, PointerEvent::Down(Point::new(540.0, 540.0)));
    c.forget(OverlayId(3));
    assert_eq!(c.state(), DragState::Idle);
}
