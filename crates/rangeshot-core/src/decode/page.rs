//! Decoding of rasterized page images (PNG or JPEG).

use std::io::Cursor;

use image::{DynamicImage, ImageReader};

use super::{DecodeError, PixelLayout, RasterImage};

/// Decode a rendered page from PNG or JPEG bytes.
///
/// The native channel layout is kept (gray, gray+alpha, RGB, RGBA) so that
/// callers can decide how to flatten it. 16-bit and floating point inputs are
/// reduced to 8-bit RGB or RGBA.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected.
/// Returns `DecodeError::CorruptedFile` if the data fails to decode.
/// Returns `DecodeError::EmptyImage` if the decoded image has a zero dimension.
pub fn decode_page(bytes: &[u8]) -> Result<RasterImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::EmptyImage {
            width: img.width(),
            height: img.height(),
        });
    }

    Ok(from_dynamic(img))
}

/// Convert an `image::DynamicImage` into a [`RasterImage`], keeping 8-bit
/// layouts as they are.
pub fn from_dynamic(img: DynamicImage) -> RasterImage {
    let (width, height) = (img.width(), img.height());
    match img {
        DynamicImage::ImageLuma8(buf) => {
            RasterImage::with_layout(width, height, PixelLayout::Gray, buf.into_raw())
        }
        DynamicImage::ImageLumaA8(buf) => {
            RasterImage::with_layout(width, height, PixelLayout::GrayAlpha, buf.into_raw())
        }
        DynamicImage::ImageRgb8(buf) => RasterImage::from_rgb_image(buf),
        DynamicImage::ImageRgba8(buf) => {
            RasterImage::with_layout(width, height, PixelLayout::Rgba, buf.into_raw())
        }
        other if other.color().has_alpha() => {
            RasterImage::with_layout(width, height, PixelLayout::Rgba, other.into_rgba8().into_raw())
        }
        other => RasterImage::from_rgb_image(other.into_rgb8()),
    }
}
