//! Sharpness enhancement for rasterized pages.
//!
//! Rendered tables lose some edge definition when the PDF is rasterized. The
//! enhancer blends between a smoothed copy and the original:
//!
//! ```text
//! out = smooth + factor * (orig - smooth)
//! ```
//!
//! A factor of 1.0 returns the original, values above 1.0 sharpen and values
//! below 1.0 blur. The smoothing kernel is
//! `[[1, 1, 1], [1, 5, 1], [1, 1, 1]] / 13`; the one-pixel border is left as is.

use crate::decode::{InvalidImage, RasterImage};

const SMOOTH_KERNEL: [u32; 9] = [1, 1, 1, 1, 5, 1, 1, 1, 1];
const SMOOTH_SCALE: u32 = 13;

/// Sharpen an image by `factor`.
///
/// The result is always RGB.
///
/// # Errors
///
/// Returns the validation error for structurally invalid images.
pub fn sharpen(image: &RasterImage, factor: f32) -> Result<RasterImage, InvalidImage> {
    image.validate()?;
    let rgb = image.to_rgb();

    if factor == 1.0 || rgb.width < 3 || rgb.height < 3 {
        return Ok(rgb);
    }

    let smooth = smooth_3x3(&rgb);
    let pixels = rgb
        .pixels
        .iter()
        .zip(&smooth)
        .map(|(&orig, &soft)| {
            let soft = soft as f32;
            clip_u8(soft + factor * (orig as f32 - soft))
        })
        .collect();

    Ok(RasterImage::new(rgb.width, rgb.height, pixels))
}

/// Apply the smoothing kernel to the interior of an RGB image.
fn smooth_3x3(image: &RasterImage) -> Vec<u8> {
    let width = image.width as usize;
    let height = image.height as usize;
    let stride = width * 3;
    let src = &image.pixels;
    let mut out = src.clone();

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            for c in 0..3 {
                let mut sum = 0u32;
                for (k, weight) in SMOOTH_KERNEL.iter().enumerate() {
                    let sy = y + k / 3 - 1;
                    let sx = x + k % 3 - 1;
                    sum += weight * src[sy * stride + sx * 3 + c] as u32;
                }
                out[y * stride + x * 3 + c] = ((sum + SMOOTH_SCALE / 2) / SMOOTH_SCALE) as u8;
            }
        }
    }

    out
}

/// Truncating clamp to `0..=255`.
#[inline]
fn clip_u8(v: f32) -> u8 {
    if v.is_nan() || v <= 0.0 {
        0
    } else if v >= 255.0 {
        255
    } else {
        v as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    /// Black square on white so there is an edge to sharpen.
    fn edge_image() -> RasterImage {
        let mut img = RasterImage::filled(9, 9, [255, 255, 255]);
        for y in 3..6 {
            for x in 3..6 {
                let idx = (y * 9 + x) * 3;
                img.pixels[idx..idx + 3].copy_from_slice(&[100, 100, 100]);
            }
        }
        img
    }

    #[test]
    fn test_factor_one_is_identity() {
        let img = edge_image();
        assert_eq!(sharpen(&img, 1.0).unwrap(), img);
    }

    #[test]
    fn test_uniform_image_unchanged() {
        let img = RasterImage::filled(10, 10, [40, 80, 120]);
        assert_eq!(sharpen(&img, 2.0).unwrap(), img);
    }

    #[test]
    fn test_sharpen_increases_edge_contrast() {
        let img = edge_image();
        let sharp = sharpen(&img, 2.0).unwrap();

        // Inside the square next to the edge gets darker
        assert!(sharp.rgb_at(3, 3).unwrap()[0] < 100);
        // Outside next to the edge stays saturated white
        assert_eq!(sharp.rgb_at(2, 2), Some([255, 255, 255]));
        // Square center is surrounded by gray and unchanged
        assert_eq!(sharp.rgb_at(4, 4), Some([100, 100, 100]));
    }

    #[test]
    fn test_blur_factor_softens_edge() {
        let img = edge_image();
        let soft = sharpen(&img, 0.0).unwrap();

        // Pure smoothed value at the square's corner: (5*100 + 3*100 + 5*255) / 13
        assert_eq!(soft.rgb_at(3, 3).unwrap()[0], 160);
    }

    #[test]
    fn test_border_untouched() {
        let mut img = RasterImage::filled(5, 5, [255, 255, 255]);
        img.pixels[0..3].copy_from_slice(&[0, 0, 0]);
        let sharp = sharpen(&img, 3.0).unwrap();
        assert_eq!(sharp.rgb_at(0, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_small_image_returned_as_rgb() {
        let img = RasterImage::with_layout(2, 2, PixelLayout::Gray, vec![1, 2, 3, 4]);
        let sharp = sharpen(&img, 2.0).unwrap();
        assert_eq!(sharp.layout, PixelLayout::Rgb);
        assert_eq!(sharp.rgb_at(1, 1), Some([4, 4, 4]));
    }

    #[test]
    fn test_invalid_image_error() {
        let img = RasterImage {
            width: 3,
            height: 0,
            layout: PixelLayout::Rgb,
            pixels: vec![],
        };
        assert!(sharpen(&img, 2.0).is_err());
    }
}
