//! Whitespace trimming for rendered pages.
//!
//! Rendered spreadsheet ranges sit on a large uniform canvas. The trimmer finds
//! the content by differencing every pixel against a background color,
//! amplifying that difference (see [`DifferenceAmplification`]) and taking the
//! bounding box of everything that stays non-zero.
//!
//! # Degenerate cases
//!
//! A blank page (no content) and a box that already covers the whole image are
//! not errors: the original image is returned unchanged.

mod amplify;

pub use amplify::DifferenceAmplification;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::decode::{InvalidImage, RasterImage};
use crate::luminance::mean_luminance;
use crate::transform::crop_to_box;
pub use crate::BoundingBox;

/// Errors that can occur while trimming.
#[derive(Debug, Error)]
pub enum TrimError {
    /// The source image is structurally invalid.
    #[error("Cannot trim: {0}")]
    InvalidImage(#[from] InvalidImage),
}

/// Options controlling background detection and the final crop.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimOptions {
    /// Background color. When `None`, the pixel at (0, 0) is used.
    pub background: Option<[u8; 3]>,
    /// Margin added around the detected content, clamped to the image.
    pub padding: u32,
    /// Difference amplification strategy.
    pub amplification: DifferenceAmplification,
}

impl TrimOptions {
    /// Trim against a pure white canvas with the given padding.
    pub fn white_page(padding: u32) -> Self {
        Self {
            background: Some([255, 255, 255]),
            padding,
            ..Self::default()
        }
    }

    /// Set the padding.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the amplification strategy.
    pub fn with_amplification(mut self, amplification: DifferenceAmplification) -> Self {
        self.amplification = amplification;
        self
    }
}

/// Locate the content of an image.
///
/// Returns `Ok(None)` for a page with no pixel that differs from the
/// background after amplification. Padding is not applied here.
///
/// # Errors
///
/// Returns `TrimError::InvalidImage` for zero-sized images or pixel buffers
/// that don't match the dimensions.
pub fn find_content_bounds(
    image: &RasterImage,
    options: &TrimOptions,
) -> Result<Option<BoundingBox>, TrimError> {
    image.validate()?;

    let background = match options.background {
        Some(color) => color,
        None => image.rgb_at(0, 0).unwrap_or([255, 255, 255]),
    };

    let diff = |[r, g, b]: [u8; 3]| {
        [
            r.abs_diff(background[0]),
            g.abs_diff(background[1]),
            b.abs_diff(background[2]),
        ]
    };

    let mean = if options.amplification.needs_mean() {
        mean_luminance(image.rgb_pixels().map(diff))
    } else {
        0
    };
    let lut = options.amplification.lut(mean);

    let width = image.width as usize;
    let (mut x0, mut y0) = (u32::MAX, u32::MAX);
    let (mut x1, mut y1) = (0u32, 0u32);

    for (i, px) in image.rgb_pixels().enumerate() {
        let [dr, dg, db] = diff(px);
        if lut[dr as usize] == 0 && lut[dg as usize] == 0 && lut[db as usize] == 0 {
            continue;
        }
        let x = (i % width) as u32;
        let y = (i / width) as u32;
        x0 = x0.min(x);
        y0 = y0.min(y);
        x1 = x1.max(x + 1);
        y1 = y1.max(y + 1);
    }

    Ok(BoundingBox::new(x0, y0, x1, y1))
}

/// Crop away the uniform background around the content of an image.
///
/// The detected box is grown by `options.padding` on every side (clamped to
/// the image) before cropping. Blank pages and content that already spans the
/// full image are returned unchanged.
///
/// # Errors
///
/// Returns `TrimError::InvalidImage` for structurally invalid images.
///
/// # Example
///
/// ```
/// use rangeshot_core::{trim, RasterImage, TrimOptions};
///
/// let blank = RasterImage::filled(64, 32, [255, 255, 255]);
/// let trimmed = trim(&blank, &TrimOptions::default()).unwrap();
/// assert_eq!((trimmed.width, trimmed.height), (64, 32));
/// ```
pub fn trim(image: &RasterImage, options: &TrimOptions) -> Result<RasterImage, TrimError> {
    let Some(content) = find_content_bounds(image, options)? else {
        debug!(
            width = image.width,
            height = image.height,
            "no content found, keeping page as is"
        );
        return Ok(image.clone());
    };

    let bbox = content.pad(options.padding, image.width, image.height);
    if bbox.is_full(image.width, image.height) {
        return Ok(image.clone());
    }

    debug!(
        x0 = bbox.x0,
        y0 = bbox.y0,
        width = bbox.width(),
        height = bbox.height(),
        "trimming page"
    );
    Ok(crop_to_box(image, &bbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    /// White canvas with a solid block of `color` covering `block`.
    fn page_with_block(width: u32, height: u32, block: BoundingBox, color: [u8; 3]) -> RasterImage {
        let mut img = RasterImage::filled(width, height, [255, 255, 255]);
        for y in block.y0..block.y1 {
            for x in block.x0..block.x1 {
                let idx = ((y * width + x) * 3) as usize;
                img.pixels[idx..idx + 3].copy_from_slice(&color);
            }
        }
        img
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let img = RasterImage::filled(40, 30, [200, 10, 10]);
        let result = trim(&img, &TrimOptions::default()).unwrap();
        assert_eq!(result, img);
        assert_eq!(find_content_bounds(&img, &TrimOptions::default()).unwrap(), None);
    }

    #[test]
    fn test_single_block_exact() {
        let block = BoundingBox::new(10, 5, 30, 25).unwrap();
        let img = page_with_block(60, 40, block, [0, 0, 0]);

        let bounds = find_content_bounds(&img, &TrimOptions::default()).unwrap();
        assert_eq!(bounds, Some(block));

        let result = trim(&img, &TrimOptions::default()).unwrap();
        assert_eq!(result.width, 20);
        assert_eq!(result.height, 20);
        assert!(result.rgb_pixels().all(|px| px == [0, 0, 0]));
    }

    #[test]
    fn test_block_with_padding() {
        let block = BoundingBox::new(10, 5, 30, 25).unwrap();
        let img = page_with_block(60, 40, block, [0, 0, 0]);

        let result = trim(&img, &TrimOptions::default().with_padding(3)).unwrap();
        assert_eq!(result.width, 26);
        assert_eq!(result.height, 26);
        // Padding band is background
        assert_eq!(result.rgb_at(0, 0), Some([255, 255, 255]));
        assert_eq!(result.rgb_at(3, 3), Some([0, 0, 0]));
    }

    #[test]
    fn test_padding_clamped_to_bounds() {
        let block = BoundingBox::new(2, 2, 58, 10).unwrap();
        let img = page_with_block(60, 40, block, [0, 0, 0]);

        let result = trim(&img, &TrimOptions::default().with_padding(5)).unwrap();
        assert_eq!(result.width, 60);
        assert_eq!(result.height, 15);
    }

    #[test]
    fn test_large_page_example() {
        let block = BoundingBox::new(1500, 1200, 2500, 1700).unwrap();
        let img = page_with_block(4000, 3000, block, [0, 0, 0]);
        let options = TrimOptions::default().with_padding(15);

        let content = find_content_bounds(&img, &options).unwrap().unwrap();
        let padded = content.pad(options.padding, img.width, img.height);
        assert_eq!((padded.x0, padded.y0), (1485, 1185));

        let result = trim(&img, &options).unwrap();
        assert_eq!((result.width, result.height), (1030, 530));
    }

    #[test]
    fn test_content_touching_all_edges_unchanged() {
        let mut img = RasterImage::filled(10, 10, [255, 255, 255]);
        // Corner sample is black, the rest white: white is "content" everywhere else
        img.pixels[0..3].copy_from_slice(&[0, 0, 0]);
        let result = trim(&img, &TrimOptions::default()).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_explicit_background_overrides_corner() {
        let block = BoundingBox::new(4, 4, 8, 8).unwrap();
        let mut img = page_with_block(16, 16, block, [0, 0, 0]);
        // A light gray mark at the corner, 60 levels away from white
        img.pixels[0..3].copy_from_slice(&[195, 195, 195]);

        let options = TrimOptions::white_page(0);
        let bounds = find_content_bounds(&img, &options).unwrap().unwrap();
        // mean is 16, so the mark maps to 16 + 3 * 44 and counts as content
        assert_eq!(bounds, BoundingBox::new(0, 0, 8, 8).unwrap());

        let options = options.with_amplification(DifferenceAmplification::AffineRemap {
            scale: 1.0,
            bias: -100.0,
        });
        let bounds = find_content_bounds(&img, &options).unwrap().unwrap();
        assert_eq!(bounds, block);
    }

    #[test]
    fn test_contrast_ignores_faint_noise() {
        // Dark content on white with a halo of faint anti-aliasing noise
        let block = BoundingBox::new(20, 20, 80, 80).unwrap();
        let mut img = page_with_block(100, 100, block, [0, 0, 0]);
        for x in 5..95 {
            let idx = ((10 * 100 + x) * 3) as usize;
            img.pixels[idx..idx + 3].copy_from_slice(&[250, 250, 250]);
        }

        // mean diff luminance is ~92, so a 5-level halo is far below the floor
        let bounds = find_content_bounds(&img, &TrimOptions::default()).unwrap();
        assert_eq!(bounds, Some(block));
    }

    #[test]
    fn test_gray_layout_trimmed() {
        let mut pixels = vec![255u8; 20 * 10];
        for y in 2..5 {
            for x in 3..9 {
                pixels[y * 20 + x] = 0;
            }
        }
        let img = RasterImage::with_layout(20, 10, PixelLayout::Gray, pixels);
        let result = trim(&img, &TrimOptions::default()).unwrap();

        assert_eq!(result.layout, PixelLayout::Gray);
        assert_eq!((result.width, result.height), (6, 3));
    }

    #[test]
    fn test_zero_sized_image_is_error() {
        let img = RasterImage {
            width: 0,
            height: 0,
            layout: PixelLayout::Rgb,
            pixels: vec![],
        };
        assert!(matches!(
            trim(&img, &TrimOptions::default()),
            Err(TrimError::InvalidImage(InvalidImage::ZeroDimension { .. }))
        ));
    }

    #[test]
    fn test_buffer_mismatch_is_error() {
        let img = RasterImage {
            width: 10,
            height: 10,
            layout: PixelLayout::Rgb,
            pixels: vec![0u8; 10],
        };
        assert!(matches!(
            trim(&img, &TrimOptions::default()),
            Err(TrimError::InvalidImage(InvalidImage::BufferLength { .. }))
        ));
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: TrimOptions = serde_json::from_str(r#"{"padding": 15}"#).unwrap();
        assert_eq!(options.padding, 15);
        assert_eq!(options.background, None);
        assert_eq!(options.amplification, DifferenceAmplification::default());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
