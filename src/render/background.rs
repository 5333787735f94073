use image::imageops::{self, FilterType};

use crate::assets::decode::SourceImage;
use crate::effects::blur::blur_sigma_in_place;
use crate::foundation::core::Canvas;
use crate::foundation::error::{HypnoError, HypnoResult};
use crate::foundation::math::premultiply_rgba8_in_place;
use crate::geometry::fit::cover_crop;

/// Cover-fit `image` onto `canvas` and blur it, returning premultiplied RGBA8.
///
/// Smooth (triangle) resampling when `anti_aliasing`, nearest-neighbour otherwise.
pub(crate) fn fit_background(
    image: &SourceImage,
    canvas: Canvas,
    anti_aliasing: bool,
    blur: f64,
) -> HypnoResult<Vec<u8>> {
    let src = image.pixels();
    let crop = cover_crop(src.width(), src.height(), canvas)
        .ok_or_else(|| HypnoError::evaluation("background needs a non-empty image and canvas"))?;

    let cropped = imageops::crop_imm(src, crop.x, crop.y, crop.width, crop.height).to_image();
    let filter = if anti_aliasing {
        FilterType::Triangle
    } else {
        FilterType::Nearest
    };
    let scaled = if cropped.dimensions() == (canvas.width, canvas.height) {
        cropped
    } else {
        imageops::resize(&cropped, canvas.width, canvas.height, filter)
    };

    let mut data = scaled.into_raw();
    premultiply_rgba8_in_place(&mut data);
    blur_sigma_in_place(&mut data, canvas.width, canvas.height, blur)?;
    Ok(data)
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
