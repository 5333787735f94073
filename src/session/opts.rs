use crate::geometry::pattern::DEFAULT_MAX_VERTICES;
use crate::render::compositor::RenderOpts;
use crate::scene::canvas::MAX_CANVAS_SIZE;

const ENV_SPARKLE_SEED: &str = "HYPNO_SPARKLE_SEED";
const ENV_MAX_PATTERN_VERTICES: &str = "HYPNO_MAX_PATTERN_VERTICES";

/// Editing-session options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionOpts {
    /// Seed for the sparkle field; `None` draws a fresh seed per session RNG.
    pub sparkle_seed: Option<u64>,
    /// Longest canvas side.
    pub max_canvas_size: u32,
    /// Vertex cap for pattern geometry.
    pub max_pattern_vertices: usize,
    /// Straight RGBA8 clear color under the background.
    pub clear_rgba: Option<[u8; 4]>,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            sparkle_seed: None,
            max_canvas_size: MAX_CANVAS_SIZE,
            max_pattern_vertices: DEFAULT_MAX_VERTICES,
            clear_rgba: None,
        }
    }
}

impl SessionOpts {
    /// Defaults overlaid with `HYPNO_SPARKLE_SEED` and `HYPNO_MAX_PATTERN_VERTICES`.
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides(|key| std::env::var(key).ok())
    }

    fn with_env_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(seed) = var(ENV_SPARKLE_SEED).and_then(|v| v.trim().parse::<u64>().ok()) {
            self.sparkle_seed = Some(seed);
        }
        if let Some(cap) = var(ENV_MAX_PATTERN_VERTICES)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&n| n > 0)
        {
            self.max_pattern_vertices = cap;
        }
        self
    }

    /// Return options with a fixed sparkle seed.
    pub fn with_sparkle_seed(mut self, seed: Option<u64>) -> Self {
        self.sparkle_seed = seed;
        self
    }

    /// Return options with a configured clear color.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.clear_rgba = clear;
        self
    }

    pub(crate) fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            max_pattern_vertices: self.max_pattern_vertices,
            clear_rgba: self.clear_rgba,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/opts.rs"]
mod tests;
