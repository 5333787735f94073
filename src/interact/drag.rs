use crate::assets::text::TextMeasure;
use crate::foundation::core::{Canvas, Point, Vec2};
use crate::foundation::error::HypnoResult;
use crate::layout::text_box::{hit_test_topmost, hover_test};
use crate::scene::overlay::{OverlayId, TextOverlay};

/// Active pointer gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No button held.
    #[default]
    Idle,
    /// Moving the pattern center.
    DraggingCenter,
    /// Moving one label; `offset` is pointer minus the label's pixel anchor at grab time.
    DraggingText {
        /// Grabbed label.
        id: OverlayId,
        /// Grab offset in pixels.
        offset: Vec2,
    },
}

/// Pointer input in canvas pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Button pressed at a position.
    Down(Point),
    /// Pointer moved to a position.
    Move(Point),
    /// Button released.
    Up,
    /// Pointer left the surface.
    Leave,
}

/// Presentational cursor suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorHint {
    /// Over a label.
    Grab,
    /// Dragging a label.
    Grabbing,
    /// Positioning the pattern center.
    Crosshair,
}

/// State change requested by a pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEffect {
    /// Nothing to write back.
    None,
    /// New normalized pattern center.
    SetCenter(Point),
    /// New normalized anchor for one label.
    MoveOverlay {
        /// Label to move.
        id: OverlayId,
        /// Clamped normalized anchor.
        anchor: Point,
    },
}

/// Result of feeding one pointer event to the controller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerOutcome {
    /// Requested state change.
    pub effect: DragEffect,
    /// Label under the pointer while idle.
    pub hovering: Option<OverlayId>,
    /// Cursor to show.
    pub cursor: CursorHint,
}

/// Hit-test and drag state machine.
///
/// Pointer-down picks the topmost label under the pointer, or grabs the pattern center. Moves
/// are converted into clamped normalized coordinates; the controller itself never mutates
/// settings or overlays.
#[derive(Clone, Debug, Default)]
pub struct DragController {
    state: DragState,
    hovering: Option<OverlayId>,
}

impl DragController {
    /// Idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture.
    pub fn state(&self) -> DragState {
        self.state
    }

    /// Whether the center guide should be drawn.
    pub fn is_dragging_center(&self) -> bool {
        self.state == DragState::DraggingCenter
    }

    /// Label last reported under the pointer.
    pub fn hovering(&self) -> Option<OverlayId> {
        self.hovering
    }

    /// Drop any gesture and hover, e.g. after the overlay list was replaced.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.hovering = None;
    }

    /// Forget a label that no longer exists.
    pub fn forget(&mut self, id: OverlayId) {
        if matches!(self.state, DragState::DraggingText { id: d, .. } if d == id) {
            self.state = DragState::Idle;
        }
        if self.hovering == Some(id) {
            self.hovering = None;
        }
    }

    /// Cursor for the current state.
    pub fn cursor(&self) -> CursorHint {
        match self.state {
            DragState::DraggingText { .. } => CursorHint::Grabbing,
            _ if self.hovering.is_some() => CursorHint::Grab,
            _ => CursorHint::Crosshair,
        }
    }

    /// Advance the state machine by one event.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        overlays: &[TextOverlay],
        canvas: Canvas,
        measure: &mut dyn TextMeasure,
    ) -> HypnoResult<PointerOutcome> {
        let effect = match event {
            PointerEvent::Down(p) => self.pointer_down(p, overlays, canvas, measure)?,
            PointerEvent::Move(p) => self.pointer_move(p, overlays, canvas, measure)?,
            PointerEvent::Up => {
                self.end_drag();
                DragEffect::None
            }
            PointerEvent::Leave => {
                self.end_drag();
                self.hovering = None;
                DragEffect::None
            }
        };
        Ok(PointerOutcome {
            effect,
            hovering: self.hovering,
            cursor: self.cursor(),
        })
    }

    fn pointer_down(
        &mut self,
        p: Point,
        overlays: &[TextOverlay],
        canvas: Canvas,
        measure: &mut dyn TextMeasure,
    ) -> HypnoResult<DragEffect> {
        if let Some(id) = hit_test_topmost(overlays, canvas, measure, p)? {
            let anchor = overlays
                .iter()
                .find(|o| o.id == id)
                .map(|o| canvas.to_pixels(o.anchor()))
                .unwrap_or(p);
            let offset = p - anchor;
            tracing::debug!(%id, ?offset, "drag text start");
            self.state = DragState::DraggingText { id, offset };
            return Ok(DragEffect::None);
        }
        tracing::debug!(x = p.x, y = p.y, "drag center start");
        self.state = DragState::DraggingCenter;
        Ok(DragEffect::SetCenter(canvas.to_unit_clamped(p)))
    }

    fn pointer_move(
        &mut self,
        p: Point,
        overlays: &[TextOverlay],
        canvas: Canvas,
        measure: &mut dyn TextMeasure,
    ) -> HypnoResult<DragEffect> {
        Ok(match self.state {
            DragState::DraggingText { id, offset } => DragEffect::MoveOverlay {
                id,
                anchor: canvas.to_unit_clamped(p - offset),
            },
            DragState::DraggingCenter => DragEffect::SetCenter(canvas.to_unit_clamped(p)),
            DragState::Idle => {
                self.hovering = hover_test(overlays, canvas, measure, p)?;
                DragEffect::None
            }
        })
    }

    fn end_drag(&mut self) {
        if self.state != DragState::Idle {
            tracing::debug!(state = ?self.state, "drag end");
        }
        self.state = DragState::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interact/drag.rs"]
mod tests;
