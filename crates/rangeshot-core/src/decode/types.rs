//! Core types for decoded page images.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for page decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The decoded image has a zero dimension.
    #[error("Decoded image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
}

/// Structural problems that make a [`RasterImage`] unusable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidImage {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    ZeroDimension { width: u32, height: u32 },

    /// Pixel buffer length doesn't match the dimensions and layout.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    BufferLength { expected: usize, actual: usize },
}

/// Filter type for image resizing operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    #[default]
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// Channel layout of a [`RasterImage`] pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelLayout {
    /// Single luminance channel.
    Gray,
    /// Luminance plus alpha.
    GrayAlpha,
    /// Red, green, blue.
    #[default]
    Rgb,
    /// Red, green, blue, alpha.
    Rgba,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray => 1,
            PixelLayout::GrayAlpha => 2,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }
}

/// A decoded 8-bit raster image.
///
/// Pixels are stored row-major with `layout.channels()` bytes per pixel.
/// Transform operations never mutate a `RasterImage`; they return a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub layout: PixelLayout,
    /// Pixel data in row-major order.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// Create a new RGB image with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self::with_layout(width, height, PixelLayout::Rgb, pixels)
    }

    /// Create an image with an explicit channel layout.
    pub fn with_layout(width: u32, height: u32, layout: PixelLayout, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * layout.channels(),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            layout,
            pixels,
        }
    }

    /// Create an RGB image where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 3);
        for _ in 0..count {
            pixels.extend_from_slice(&color);
        }
        Self::new(width, height, pixels)
    }

    /// Create a RasterImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            layout: PixelLayout::Rgb,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbImage, normalizing the layout first.
    ///
    /// Returns `None` if the buffer does not match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        let rgb = self.to_rgb();
        image::RgbImage::from_raw(rgb.width, rgb.height, rgb.pixels)
    }

    /// Check that the dimensions are non-zero and the buffer length matches.
    pub fn validate(&self) -> Result<(), InvalidImage> {
        if self.width == 0 || self.height == 0 {
            return Err(InvalidImage::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.pixel_count() * self.layout.channels();
        if self.pixels.len() != expected {
            return Err(InvalidImage::BufferLength {
                expected,
                actual: self.pixels.len(),
            });
        }
        Ok(())
    }

    /// Flatten to a 3-channel RGB image.
    ///
    /// Alpha is discarded and gray is replicated into all three channels.
    /// RGB input is returned as a clone.
    pub fn to_rgb(&self) -> RasterImage {
        let pixels = match self.layout {
            PixelLayout::Rgb => self.pixels.clone(),
            _ => self.rgb_pixels().flatten().collect(),
        };
        RasterImage {
            width: self.width,
            height: self.height,
            layout: PixelLayout::Rgb,
            pixels,
        }
    }

    /// Color of the pixel at `(x, y)` as RGB.
    ///
    /// Returns `None` when the coordinate is out of bounds.
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.layout.channels();
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        let px = self.pixels.get(idx..idx + channels)?;
        Some(match self.layout {
            PixelLayout::Rgb | PixelLayout::Rgba => [px[0], px[1], px[2]],
            PixelLayout::Gray | PixelLayout::GrayAlpha => [px[0], px[0], px[0]],
        })
    }

    /// Iterate over all pixels in row-major order as RGB triples.
    pub fn rgb_pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        let layout = self.layout;
        self.pixels
            .chunks_exact(layout.channels())
            .map(move |px| match layout {
                PixelLayout::Rgb | PixelLayout::Rgba => [px[0], px[1], px[2]],
                PixelLayout::Gray | PixelLayout::GrayAlpha => [px[0], px[0], px[0]],
            })
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
