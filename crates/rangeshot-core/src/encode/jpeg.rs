//! Single-shot JPEG encoding.
//!
//! Encoding goes through `mozjpeg-oxide`. By default the output is progressive
//! with optimized Huffman tables, which is noticeably smaller than baseline
//! JPEG for rendered text at the same quality. The budgeted search in
//! [`super::budget`] calls it once per attempt.

use std::borrow::Cow;

use mozjpeg_oxide::{Encoder, TrellisConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{InvalidImage, PixelLayout, RasterImage};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The budget configuration cannot drive a search
    #[error("Invalid encode budget: {0}")]
    InvalidBudget(String),

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

impl From<InvalidImage> for EncodeError {
    fn from(err: InvalidImage) -> Self {
        match err {
            InvalidImage::ZeroDimension { width, height } => {
                EncodeError::InvalidDimensions { width, height }
            }
            InvalidImage::BufferLength { expected, actual } => {
                EncodeError::InvalidPixelData { expected, actual }
            }
        }
    }
}

/// Encoder switches that trade encode time for size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JpegOptions {
    /// Multi-scan progressive output.
    pub progressive: bool,
    /// Two-pass encoding with Huffman tables fitted to the image.
    pub optimize_huffman: bool,
    /// Rate-distortion optimized quantization. Slow on large pages.
    pub trellis: bool,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self {
            progressive: true,
            optimize_huffman: true,
            trellis: false,
        }
    }
}

/// Encode an image to JPEG bytes at a fixed quality with the default
/// [`JpegOptions`].
///
/// Non-RGB layouts are flattened to RGB first (alpha dropped, gray
/// replicated).
///
/// # Quality Guidelines
///
/// * 90-100: High quality, text edges stay crisp
/// * 75-90: Good quality, recommended for shared report images
/// * 55-75: Medium quality, visible ringing around thin grid lines
/// * Below 55: Low quality, visible artifacts
///
/// Quality is clamped to `1..=100`.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` or `EncodeError::InvalidPixelData`
/// for structurally invalid images and `EncodeError::EncodingFailed` if the
/// codec rejects the data.
pub fn encode_jpeg(image: &RasterImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg_with(image, quality, &JpegOptions::default())
}

/// Encode an image to JPEG bytes with explicit encoder options.
pub fn encode_jpeg_with(
    image: &RasterImage,
    quality: u8,
    options: &JpegOptions,
) -> Result<Vec<u8>, EncodeError> {
    image.validate()?;

    let rgb = match image.layout {
        PixelLayout::Rgb => Cow::Borrowed(image),
        _ => Cow::Owned(image.to_rgb()),
    };

    let mut encoder = Encoder::fastest()
        .quality(quality.clamp(1, 100))
        .progressive(options.progressive)
        .optimize_huffman(options.optimize_huffman);
    if options.trellis {
        encoder = encoder.trellis(TrellisConfig::default());
    }

    encoder
        .encode_rgb(&rgb.pixels, rgb.width, rgb.height)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x * 255 / width) as u8);
                pixels.push((y * 255 / height) as u8);
                pixels.push(128u8);
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&RasterImage::filled(100, 100, [128, 128, 128]), 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let img = RasterImage::filled(10, 10, [128, 128, 128]);

        assert!(encode_jpeg(&img, 0).is_ok());
        assert!(encode_jpeg(&img, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let img = RasterImage {
            width: 100,
            height: 100,
            layout: PixelLayout::Rgb,
            pixels: vec![128u8; 99 * 100 * 3],
        };

        assert!(matches!(
            encode_jpeg(&img, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_zero_width() {
        let img = RasterImage {
            width: 0,
            height: 100,
            layout: PixelLayout::Rgb,
            pixels: vec![],
        };

        assert!(matches!(
            encode_jpeg(&img, 90),
            Err(EncodeError::InvalidDimensions { width: 0, height: 100 })
        ));
    }

    #[test]
    fn test_encode_jpeg_gray_and_rgba_inputs() {
        let gray = RasterImage::with_layout(8, 8, PixelLayout::Gray, vec![90u8; 64]);
        let rgba = RasterImage::with_layout(8, 8, PixelLayout::Rgba, vec![90u8; 256]);

        for img in [gray, rgba] {
            let jpeg = encode_jpeg(&img, 80).unwrap();
            let decoded = image::load_from_memory(&jpeg).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (8, 8));
            assert_eq!(decoded.color(), image::ColorType::Rgb8);
        }
    }

    #[test]
    fn test_encode_jpeg_gradient_size() {
        let jpeg = encode_jpeg(&gradient(100, 100), 90).unwrap();
        assert!(jpeg.len() > 500);
        assert!(jpeg.len() < 50000);
    }

    /// Whether the stream has a frame header of the given SOF type.
    fn has_marker(jpeg: &[u8], marker: u8) -> bool {
        jpeg.windows(2).any(|w| w == [0xFF, marker])
    }

    #[test]
    fn test_default_output_is_progressive() {
        let jpeg = encode_jpeg(&gradient(64, 64), 90).unwrap();
        assert!(has_marker(&jpeg, 0xC2));
        assert!(!has_marker(&jpeg, 0xC0));

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 64));
    }

    #[test]
    fn test_baseline_when_progressive_disabled() {
        let options = JpegOptions {
            progressive: false,
            ..JpegOptions::default()
        };
        let jpeg = encode_jpeg_with(&gradient(64, 64), 90, &options).unwrap();
        assert!(!has_marker(&jpeg, 0xC2));
    }

    #[test]
    fn test_optimized_huffman_not_larger() {
        let img = gradient(100, 100);
        let plain = JpegOptions {
            progressive: false,
            optimize_huffman: false,
            trellis: false,
        };
        let optimized = JpegOptions {
            optimize_huffman: true,
            ..plain
        };

        let plain_len = encode_jpeg_with(&img, 85, &plain).unwrap().len();
        let optimized_len = encode_jpeg_with(&img, 85, &optimized).unwrap().len();
        assert!(optimized_len <= plain_len, "{optimized_len} > {plain_len}");
    }

    #[test]
    fn test_trellis_output_decodes() {
        let options = JpegOptions {
            trellis: true,
            ..JpegOptions::default()
        };
        let jpeg = encode_jpeg_with(&gradient(32, 16), 75, &options).unwrap();
        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }

    #[test]
    fn test_options_json_defaults() {
        let options: JpegOptions = serde_json::from_str(r#"{"trellis": true}"#).unwrap();
        assert!(options.progressive);
        assert!(options.optimize_huffman);
        assert!(options.trellis);
    }

    #[test]
    fn test_encode_jpeg_quality_affects_size() {
        let img = gradient(100, 100);

        let low_q = encode_jpeg(&img, 20).unwrap();
        let high_q = encode_jpeg(&img, 95).unwrap();

        assert!(high_q.len() > low_q.len());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
