use super::*;

#[test]
fn template_defaults() {
    let t = TextStyle::default();
    assert_eq!(t.text, "TG:\nRFV34D");
    assert_eq!(t.font_size, 32.0);
    assert_eq!(t.padding, 16.0);
    assert_eq!(t.border_radius, 12.0);
    assert_eq!(t.line_height, 1.2);
}

#[test]
fn new_labels_start_centered() {
    let o = TextOverlay::centered(OverlayId(4), TextStyle::default());
    assert_eq!(o.anchor(), Point::new(0.5, 0.5));
    assert_eq!(o.lines().collect::<Vec<_>>(), vec!["TG:", "RFV34D"]);
    assert_eq!(o.id.to_string(), "overlay-4");
}

#[test]
fn edit_style_field_by_wire_name() {
    let t = TextStyle::default()
        .with_field("fontSize", serde_json::json!(48))
        .unwrap()
        .with_field("backgroundColor", serde_json::json!("#ff0000"))
        .unwrap();
    assert_eq!(t.font_size, 48.0);
    assert_eq!(t.background_color, "#ff0000");
}

#[test]
fn style_edits_reject_unknown_and_mistyped() {
    let t = TextStyle::default();
    assert!(matches!(
        t.with_field("x", serde_json::json!(0.2)),
        Err(crate::foundation::error::HypnoError::Validation(_))
    ));
    assert!(matches!(
        t.with_field("fontSize", serde_json::json!("big")),
        Err(crate::foundation::error::HypnoError::Serde(_))
    ));
}
