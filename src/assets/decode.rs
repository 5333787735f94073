use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{HypnoError, HypnoResult};

/// A decoded source photo in straight-alpha RGBA8.
///
/// Cloning is cheap; pixel storage is shared.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pixels: Arc<image::RgbaImage>,
}

impl SourceImage {
    /// Wrap already-decoded straight-alpha pixels.
    pub fn from_rgba8(width: u32, height: u32, rgba8: Vec<u8>) -> HypnoResult<Self> {
        let pixels = image::RgbaImage::from_raw(width, height, rgba8).ok_or_else(|| {
            HypnoError::validation("rgba8 buffer length does not match width*height*4")
        })?;
        Ok(Self {
            pixels: Arc::new(pixels),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub(crate) fn pixels(&self) -> &image::RgbaImage {
        &self.pixels
    }
}

/// Decode encoded image bytes (PNG, JPEG, ...) into a [`SourceImage`].
pub fn decode_image(bytes: &[u8]) -> HypnoResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(SourceImage {
        pixels: Arc::new(dyn_img.to_rgba8()),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
