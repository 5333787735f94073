use anyhow::Context;
use image::ImageEncoder;

use crate::foundation::error::{HypnoError, HypnoResult};
use crate::foundation::math::unpremultiply_rgba8_in_place;

/// A rendered frame as RGBA8 pixels.
///
/// Frames leave the compositor **premultiplied**; the flag keeps that explicit at API
/// boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA8 of the pixel at `(x, y)`, as stored.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Copy with straight (non-premultiplied) alpha.
    pub fn to_straight(&self) -> FrameRGBA {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        FrameRGBA {
            data,
            premultiplied: false,
            ..*self
        }
    }

    /// Encode as PNG (straight alpha).
    pub fn encode_png(&self) -> HypnoResult<Vec<u8>> {
        let straight = self.to_straight();
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if straight.data.len() != expected {
            return Err(HypnoError::evaluation("frame byte len mismatch"));
        }
        let mut out = Vec::new();
        image::codecs::png::PngEncoder::new(&mut out)
            .write_image(
                &straight.data,
                self.width,
                self.height,
                image::ExtendedColorType::Rgba8,
            )
            .context("encode frame as png")?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
