use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::assets::decode::{SourceImage, decode_image};
use crate::assets::text::TextEngine;
use crate::foundation::core::{Canvas, Point, clamp_unit};
use crate::foundation::error::{HypnoError, HypnoResult};
use crate::interact::drag::{
    CursorHint, DragController, DragEffect, DragState, PointerEvent, PointerOutcome,
};
use crate::render::backend::FrameRGBA;
use crate::render::compositor::{FrameInputs, render_frame};
use crate::scene::canvas::compute_canvas;
use crate::scene::exchange::{export_settings_json, import_settings_json};
use crate::scene::overlay::{OverlayId, TextOverlay, TextStyle};
use crate::scene::settings::PatternSettings;
use crate::session::opts::SessionOpts;

/// Explicit edit messages applied by [`EditorSession::apply`].
#[derive(Clone, Debug, PartialEq)]
pub enum EditorUpdate {
    /// Replace one pattern setting by wire name (`"spacing"`, `"aspectRatio"`, ...).
    SetField {
        /// Wire name.
        field: String,
        /// New value.
        value: serde_json::Value,
    },
    /// Move the pattern center (normalized, clamped).
    SetCenter(Point),
    /// Move a label anchor (normalized, clamped).
    MoveOverlay {
        /// Label.
        id: OverlayId,
        /// New anchor.
        anchor: Point,
    },
    /// Replace one style field of a label.
    EditOverlay {
        /// Label.
        id: OverlayId,
        /// Wire name (`"text"`, `"fontSize"`, ...).
        field: String,
        /// New value.
        value: serde_json::Value,
    },
    /// Replace one field of the new-label template.
    EditTemplate {
        /// Wire name.
        field: String,
        /// New value.
        value: serde_json::Value,
    },
    /// Append a label built from the template at the canvas center.
    AddOverlay,
    /// Remove a label.
    RemoveOverlay(OverlayId),
}

/// One editing session: settings, labels, the loaded photo and the pointer controller.
///
/// Every mutation goes through a method here; rendering reads a consistent snapshot and always
/// redraws from scratch.
pub struct EditorSession {
    opts: SessionOpts,
    settings: PatternSettings,
    overlays: Vec<TextOverlay>,
    template: TextStyle,
    image: Option<SourceImage>,
    canvas: Option<Canvas>,
    text: TextEngine,
    drag: DragController,
    next_id: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionOpts::default())
    }
}

impl EditorSession {
    /// Empty session with default settings and no photo.
    pub fn new(opts: SessionOpts) -> Self {
        Self {
            opts,
            settings: PatternSettings::default(),
            overlays: Vec::new(),
            template: TextStyle::default(),
            image: None,
            canvas: None,
            text: TextEngine::new(),
            drag: DragController::new(),
            next_id: 1,
        }
    }

    /// Replace the text engine (e.g. one loaded with font bytes).
    pub fn with_text_engine(mut self, text: TextEngine) -> Self {
        self.text = text;
        self
    }

    /// Session options.
    pub fn opts(&self) -> &SessionOpts {
        &self.opts
    }

    /// Current pattern settings.
    pub fn settings(&self) -> &PatternSettings {
        &self.settings
    }

    /// Labels in paint order.
    pub fn overlays(&self) -> &[TextOverlay] {
        &self.overlays
    }

    /// Template used for new labels.
    pub fn template(&self) -> &TextStyle {
        &self.template
    }

    /// Loaded photo, if any.
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Canvas size; `None` until a photo is loaded.
    pub fn canvas(&self) -> Option<Canvas> {
        self.canvas
    }

    /// Current pointer gesture.
    pub fn drag_state(&self) -> DragState {
        self.drag.state()
    }

    /// Sparkle RNG honoring [`SessionOpts::sparkle_seed`].
    pub fn sparkle_rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.opts.sparkle_seed.unwrap_or_else(rand::random))
    }

    /// Decode and install a photo.
    pub fn load_image(&mut self, bytes: &[u8]) -> HypnoResult<()> {
        let image = decode_image(bytes)?;
        self.set_image(image);
        Ok(())
    }

    /// Install a decoded photo; the canvas is recomputed and the center reset.
    pub fn set_image(&mut self, image: SourceImage) {
        self.image = Some(image);
        self.drag.reset();
        self.recompute_canvas();
    }

    /// Drop the photo, labels and settings.
    pub fn reset(&mut self) {
        self.settings = PatternSettings::default();
        self.overlays.clear();
        self.template = TextStyle::default();
        self.image = None;
        self.canvas = None;
        self.drag.reset();
    }

    fn recompute_canvas(&mut self) {
        self.canvas = self.image.as_ref().and_then(|img| {
            compute_canvas(
                img.width(),
                img.height(),
                &self.settings.aspect_ratio,
                self.opts.max_canvas_size,
            )
        });
        self.settings = self.settings.with_center(Point::new(0.5, 0.5));
        tracing::debug!(
            canvas = ?self.canvas,
            aspect = %self.settings.aspect_ratio,
            "canvas recomputed"
        );
    }

    /// Apply one edit message. On error nothing changes.
    pub fn apply(&mut self, update: EditorUpdate) -> HypnoResult<()> {
        match update {
            EditorUpdate::SetField { field, value } => {
                let next = self.settings.with_field(&field, value)?;
                let aspect_changed = next.aspect_ratio != self.settings.aspect_ratio;
                self.settings = next;
                if aspect_changed {
                    self.recompute_canvas();
                }
            }
            EditorUpdate::SetCenter(p) => {
                let p = Point::new(clamp_unit(p.x), clamp_unit(p.y));
                self.settings = self.settings.with_center(p);
            }
            EditorUpdate::MoveOverlay { id, anchor } => {
                let o = self.overlay_mut(id)?;
                o.x = clamp_unit(anchor.x);
                o.y = clamp_unit(anchor.y);
            }
            EditorUpdate::EditOverlay { id, field, value } => {
                let o = self.overlay_mut(id)?;
                o.style = o.style.with_field(&field, value)?;
            }
            EditorUpdate::EditTemplate { field, value } => {
                self.template = self.template.with_field(&field, value)?;
            }
            EditorUpdate::AddOverlay => {
                self.add_overlay();
            }
            EditorUpdate::RemoveOverlay(id) => {
                if !self.remove_overlay(id) {
                    return Err(unknown_overlay(id));
                }
            }
        }
        Ok(())
    }

    fn overlay_mut(&mut self, id: OverlayId) -> HypnoResult<&mut TextOverlay> {
        self.overlays
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| unknown_overlay(id))
    }

    fn fresh_id(&mut self) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Append a label copied from the template, centered; returns its id.
    pub fn add_overlay(&mut self) -> OverlayId {
        let id = self.fresh_id();
        self.overlays
            .push(TextOverlay::centered(id, self.template.clone()));
        id
    }

    /// Remove a label; `false` when it did not exist.
    pub fn remove_overlay(&mut self, id: OverlayId) -> bool {
        let before = self.overlays.len();
        self.overlays.retain(|o| o.id != id);
        self.drag.forget(id);
        self.overlays.len() != before
    }

    /// Feed one pointer event (canvas pixel coordinates) and apply its effect.
    pub fn pointer(&mut self, event: PointerEvent) -> HypnoResult<PointerOutcome> {
        let Some(canvas) = self.canvas else {
            return Ok(PointerOutcome {
                effect: DragEffect::None,
                hovering: None,
                cursor: CursorHint::Crosshair,
            });
        };
        let outcome = self
            .drag
            .handle(event, &self.overlays, canvas, &mut self.text)?;
        match outcome.effect {
            DragEffect::None => {}
            DragEffect::SetCenter(p) => self.settings = self.settings.with_center(p),
            DragEffect::MoveOverlay { id, anchor } => {
                if let Some(o) = self.overlays.iter_mut().find(|o| o.id == id) {
                    o.x = anchor.x;
                    o.y = anchor.y;
                }
            }
        }
        Ok(outcome)
    }

    /// Settings and labels as pretty exchange JSON (label ids omitted).
    pub fn export_settings(&self) -> HypnoResult<String> {
        export_settings_json(&self.settings, &self.overlays)
    }

    /// Merge an exchange document into the session.
    ///
    /// `spiral` is written over the current settings and the labels are replaced with fresh
    /// ids. Invalid payloads leave the session untouched.
    #[tracing::instrument(skip_all, fields(len = json.len()))]
    pub fn import_settings(&mut self, json: &str) -> HypnoResult<()> {
        let doc = import_settings_json(json, &self.settings).inspect_err(|err| {
            tracing::warn!(%err, "settings import rejected");
        })?;
        let aspect_changed = doc.spiral.aspect_ratio != self.settings.aspect_ratio;
        self.settings = doc.spiral;
        let overlays: Vec<TextOverlay> = doc
            .text
            .into_iter()
            .map(|def| TextOverlay {
                id: self.fresh_id(),
                x: def.x,
                y: def.y,
                style: def.style,
            })
            .collect();
        self.overlays = overlays;
        self.drag.reset();
        if aspect_changed {
            self.recompute_canvas();
        }
        Ok(())
    }

    fn frame<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        show_guide: bool,
    ) -> HypnoResult<Option<FrameRGBA>> {
        let (Some(image), Some(canvas)) = (&self.image, self.canvas) else {
            return Ok(None);
        };
        let inputs = FrameInputs {
            settings: &self.settings,
            overlays: &self.overlays,
            image,
            canvas,
            show_guide,
        };
        render_frame(&inputs, &mut self.text, rng, &self.opts.render_opts()).map(Some)
    }

    /// Preview frame; `None` without a photo. The guide shows while the center is dragged.
    pub fn render<R: Rng + ?Sized>(&mut self, rng: &mut R) -> HypnoResult<Option<FrameRGBA>> {
        let guide = self.drag.is_dragging_center();
        self.frame(rng, guide)
    }

    /// Export as PNG bytes. Sparkles are drawn fresh; the guide is never included.
    pub fn render_png<R: Rng + ?Sized>(&mut self, rng: &mut R) -> HypnoResult<Option<Vec<u8>>> {
        match self.frame(rng, false)? {
            Some(frame) => frame.encode_png().map(Some),
            None => Ok(None),
        }
    }
}

fn unknown_overlay(id: OverlayId) -> HypnoError {
    HypnoError::validation(format!("no text overlay with id {id}"))
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
