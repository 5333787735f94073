use std::f64::consts::PI;

use crate::foundation::core::{Canvas, Point};
use crate::foundation::math::spiral_growth;
use crate::scene::settings::PatternSettings;

/// Samples per ring (1° resolution).
pub const RING_SAMPLES: usize = 360;
/// Parametric step of the spiral, in radians.
pub const SPIRAL_STEP: f64 = 0.1;
/// Default cap on emitted vertices across both pattern copies.
pub const DEFAULT_MAX_VERTICES: usize = 4_000_000;

/// Ordered vertices joined by straight segments.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Polyline {
    /// Vertices in pixel space.
    pub points: Vec<Point>,
    /// Whether the last vertex connects back to the first.
    pub closed: bool,
}

/// Pattern geometry for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatternGeometry {
    /// Primary rings or spiral.
    pub primary: Vec<Polyline>,
    /// Interleaved copy, present only for double patterns.
    pub secondary: Option<Vec<Polyline>>,
}

impl PatternGeometry {
    /// Total vertex count over both copies.
    pub fn vertex_count(&self) -> usize {
        self.primary
            .iter()
            .chain(self.secondary.iter().flatten())
            .map(|p| p.points.len())
            .sum()
    }
}

/// Generate the spiral or ring polylines for `settings` on `canvas`.
///
/// Deterministic. Non-finite or non-positive spacing yields no geometry. Emission stops once
/// `max_vertices` vertices have been produced.
#[tracing::instrument(
    skip(settings),
    fields(concentric = settings.is_concentric, double = settings.is_double)
)]
pub fn generate_pattern(
    settings: &PatternSettings,
    canvas: Canvas,
    max_vertices: usize,
) -> PatternGeometry {
    let mut budget = VertexBudget::new(max_vertices);
    let primary = trace_copy(settings, canvas, false, &mut budget);
    let secondary = settings
        .is_double
        .then(|| trace_copy(settings, canvas, true, &mut budget));
    if budget.exhausted {
        tracing::warn!(max_vertices, "pattern truncated at vertex cap");
    }
    PatternGeometry { primary, secondary }
}

struct VertexBudget {
    remaining: usize,
    exhausted: bool,
}

impl VertexBudget {
    fn new(max: usize) -> Self {
        Self {
            remaining: max,
            exhausted: false,
        }
    }

    fn take(&mut self, n: usize) -> bool {
        if n > self.remaining {
            self.exhausted = true;
            return false;
        }
        self.remaining -= n;
        true
    }
}

#[derive(Clone, Copy)]
struct Deform {
    amount: f64,
    frequency: f64,
}

impl Deform {
    fn from_settings(s: &PatternSettings) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            amount: finite_or_zero(s.deformation_amount),
            frequency: finite_or_zero(s.deformation_frequency),
        }
    }
}

fn trace_copy(
    settings: &PatternSettings,
    canvas: Canvas,
    secondary: bool,
    budget: &mut VertexBudget,
) -> Vec<Polyline> {
    let spacing = settings.spacing;
    if !spacing.is_finite() || spacing <= 0.0 || canvas.is_empty() {
        return Vec::new();
    }
    let center = canvas.to_pixels(settings.center());
    let deform = Deform::from_settings(settings);
    if settings.is_concentric {
        rings(center, canvas.diagonal(), spacing, secondary, deform, budget)
    } else {
        let rotation = if settings.rotation.is_finite() {
            settings.rotation
        } else {
            0.0
        };
        spiral(center, canvas.diagonal(), spacing, rotation, secondary, deform, budget)
            .into_iter()
            .collect()
    }
}

fn rings(
    center: Point,
    max_radius: f64,
    spacing: f64,
    secondary: bool,
    deform: Deform,
    budget: &mut VertexBudget,
) -> Vec<Polyline> {
    let offset = if secondary { spacing / 2.0 } else { 0.0 };
    let step = (2.0 * PI) / RING_SAMPLES as f64;

    let mut out = Vec::new();
    for k in 0usize.. {
        let r = offset + k as f64 * spacing;
        if r >= max_radius {
            break;
        }
        if r <= 0.0 {
            continue;
        }
        if !budget.take(RING_SAMPLES) {
            break;
        }
        let points = (0..RING_SAMPLES)
            .map(|i| {
                let angle = i as f64 * step;
                let rr = r + deform.amount * (angle * deform.frequency + r * 0.1).sin();
                Point::new(center.x + rr * angle.cos(), center.y + rr * angle.sin())
            })
            .collect();
        out.push(Polyline {
            points,
            closed: true,
        });
    }
    out
}

fn spiral(
    center: Point,
    max_radius: f64,
    spacing: f64,
    rotation: f64,
    secondary: bool,
    deform: Deform,
    budget: &mut VertexBudget,
) -> Option<Polyline> {
    let b = spiral_growth(spacing);
    let max_theta = max_radius / b;
    let phase = rotation + if secondary { PI } else { 0.0 };

    let mut points = vec![center];
    for i in 0usize.. {
        let theta = i as f64 * SPIRAL_STEP;
        if theta >= max_theta {
            break;
        }
        if !budget.take(1) {
            break;
        }
        let r = b * theta + deform.amount * (theta * deform.frequency * 0.1).sin();
        let angle = theta + phase;
        points.push(Point::new(
            center.x + r * angle.cos(),
            center.y + r * angle.sin(),
        ));
    }

    (points.len() > 1).then_some(Polyline {
        points,
        closed: false,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/pattern.rs"]
mod tests;
