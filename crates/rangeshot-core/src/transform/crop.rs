//! Pixel-rectangle cropping.
//!
//! Crops are specified with a [`BoundingBox`] in pixel coordinates of the
//! source image. Any channel layout is supported; the output keeps the
//! layout of the input.

use crate::decode::RasterImage;
use crate::BoundingBox;

/// Crop an image to a pixel bounding box.
///
/// The box is clamped to the image bounds first. A box covering the whole
/// image returns a clone, and a box that misses the image entirely yields the
/// top-left 1x1 pixel.
///
/// # Example
///
/// ```
/// use rangeshot_core::{crop_to_box, BoundingBox, RasterImage};
///
/// let image = RasterImage::filled(100, 100, [255, 255, 255]);
/// let bbox = BoundingBox::new(25, 25, 75, 75).unwrap();
/// let cropped = crop_to_box(&image, &bbox);
/// assert_eq!((cropped.width, cropped.height), (50, 50));
/// ```
pub fn crop_to_box(image: &RasterImage, bbox: &BoundingBox) -> RasterImage {
    if bbox.is_full(image.width, image.height) {
        return image.clone();
    }

    let bbox = bbox
        .clamp_to(image.width, image.height)
        .unwrap_or(BoundingBox {
            x0: 0,
            y0: 0,
            x1: 1.min(image.width),
            y1: 1.min(image.height),
        });

    let channels = image.layout.channels();
    let src_stride = image.width as usize * channels;
    let row_start = bbox.x0 as usize * channels;
    let row_end = bbox.x1 as usize * channels;

    let mut output = Vec::with_capacity(bbox.width() as usize * bbox.height() as usize * channels);

    // Copy pixel data row by row
    for y in bbox.y0..bbox.y1 {
        let offset = y as usize * src_stride;
        output.extend_from_slice(&image.pixels[offset + row_start..offset + row_end]);
    }

    RasterImage {
        width: bbox.width(),
        height: bbox.height(),
        layout: image.layout,
        pixels: output,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        RasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(100, 100);
        let result = crop_to_box(&img, &BoundingBox::full(100, 100).unwrap());

        assert_eq!(result, img);
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = crop_to_box(&img, &BoundingBox::new(2, 2, 8, 8).unwrap());

        assert_eq!(result.width, 6);
        assert_eq!(result.height, 6);

        // Value at (2, 2) = (2 * 10 + 2) % 256 = 22
        assert_eq!(result.pixels[0], 22);
        // Last pixel comes from (7, 7) = 77
        assert_eq!(result.pixels[result.pixels.len() - 1], 77);
    }

    #[test]
    fn test_crop_clamps_to_bounds() {
        let img = test_image(10, 10);
        let result = crop_to_box(&img, &BoundingBox::new(8, 8, 15, 15).unwrap());

        assert_eq!(result.width, 2);
        assert_eq!(result.height, 2);
    }

    #[test]
    fn test_crop_outside_image() {
        let img = test_image(10, 10);
        let result = crop_to_box(&img, &BoundingBox::new(20, 20, 30, 30).unwrap());

        assert_eq!(result.width, 1);
        assert_eq!(result.height, 1);
        assert_eq!(result.pixels, vec![0, 0, 0]);
    }

    #[test]
    fn test_crop_rectangular() {
        let img = test_image(200, 100);
        let result = crop_to_box(&img, &BoundingBox::new(0, 0, 50, 100).unwrap());

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 100);
        assert_eq!(result.pixels.len(), 50 * 100 * 3);
    }

    #[test]
    fn test_crop_keeps_layout() {
        let pixels: Vec<u8> = (0..4 * 4 * 4).map(|i| i as u8).collect();
        let img = RasterImage::with_layout(4, 4, PixelLayout::Rgba, pixels);
        let result = crop_to_box(&img, &BoundingBox::new(1, 1, 3, 2).unwrap());

        assert_eq!(result.layout, PixelLayout::Rgba);
        assert_eq!(result.width, 2);
        assert_eq!(result.height, 1);
        // Pixel (1, 1) starts at byte (1 * 4 + 1) * 4 = 20
        assert_eq!(&result.pixels[..4], &[20, 21, 22, 23]);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
