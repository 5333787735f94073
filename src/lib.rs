//! Hypno-edit renders a spiral or concentric-ring pattern over a photo.
//!
//! The engine covers the whole frame pipeline on the CPU:
//!
//! - cover-fit and blur the photo onto a canvas derived from an aspect-ratio token
//! - generate deformable spiral/ring polylines and stroke them with a blend mode
//! - scatter an additive sparkle field from an injected RNG
//! - lay out and paint multi-line text labels
//! - hit-test pointer input to drag the pattern center or a label
//!
//! Hosts usually drive an [`EditorSession`]: install a photo, [`EditorSession::apply`] edit
//! messages or feed [`PointerEvent`]s, then [`EditorSession::render`] a fresh frame.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod effects;
mod foundation;
mod geometry;
mod interact;
mod layout;
mod render;
mod scene;
mod session;

pub use crate::assets::color::ColorDef;
pub use crate::assets::decode::{SourceImage, decode_image};
pub use crate::assets::text::{ApproxTextMeasure, TextEngine, TextMeasure};
pub use crate::effects::sparkle::{Sparkle, generate_sparkles};
pub use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{HypnoError, HypnoResult};
pub use crate::geometry::fit::{SourceRect, cover_crop};
pub use crate::geometry::pattern::{
    DEFAULT_MAX_VERTICES, PatternGeometry, Polyline, RING_SAMPLES, SPIRAL_STEP, generate_pattern,
};
pub use crate::interact::drag::{
    CursorHint, DragController, DragEffect, DragState, PointerEvent, PointerOutcome,
};
pub use crate::layout::text_box::{
    REFERENCE_WIDTH, TextBox, hit_test_topmost, hover_test, layout_text_box,
};
pub use crate::render::backend::FrameRGBA;
pub use crate::render::compositor::{FrameInputs, RenderOpts, render_frame};
pub use crate::scene::canvas::{ASPECT_RATIO_PRESETS, AspectRatio, MAX_CANVAS_SIZE, compute_canvas};
pub use crate::scene::exchange::{
    ExportedSettings, TextOverlayDef, export_settings_json, import_settings_json,
};
pub use crate::scene::overlay::{OverlayId, TextOverlay, TextStyle};
pub use crate::scene::settings::{BlendMode, PatternSettings};
pub use crate::session::editor::{EditorSession, EditorUpdate};
pub use crate::session::opts::SessionOpts;
