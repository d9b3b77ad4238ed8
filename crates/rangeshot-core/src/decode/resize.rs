//! Image resizing used by the encoder's downscale loop and the report composer.
//!
//! All functions return new RGB `RasterImage` instances without modifying the input.

use super::{FilterType, InvalidImage, RasterImage};

/// Resize an image to exact dimensions.
///
/// Non-RGB inputs are flattened to RGB first.
///
/// # Errors
///
/// Returns `InvalidImage::ZeroDimension` if a target dimension is zero, or the
/// source's validation error if it is structurally invalid.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, InvalidImage> {
    if width == 0 || height == 0 {
        return Err(InvalidImage::ZeroDimension { width, height });
    }
    image.validate()?;

    // Fast path: if dimensions match, just flatten
    if image.width == width && image.height == height {
        return Ok(image.to_rgb());
    }

    let rgb_image = image.to_rgb_image().ok_or(InvalidImage::BufferLength {
        expected: image.pixel_count() * image.layout.channels(),
        actual: image.pixels.len(),
    })?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgb_image(resized))
}

/// Resize an image to the given width, preserving aspect ratio.
///
/// Both upscaling and downscaling are allowed. The height is rounded to the
/// nearest pixel and never drops below 1.
pub fn resize_to_width(
    image: &RasterImage,
    width: u32,
    filter: FilterType,
) -> Result<RasterImage, InvalidImage> {
    image.validate()?;
    let height = scaled_height(image.width, image.height, width);
    resize(image, width, height, filter)
}

/// Height that keeps the `src_width:src_height` aspect ratio at `width`.
fn scaled_height(src_width: u32, src_height: u32, width: u32) -> u32 {
    if src_width == 0 {
        return 0;
    }
    let height = (src_height as f64 * width as f64 / src_width as f64).round() as u32;
    height.max(1)
}
