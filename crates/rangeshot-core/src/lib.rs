//! Rangeshot Core - page image post-processing
//!
//! This crate turns rasterized spreadsheet ranges into compact, shareable
//! images: whitespace trimming, sharpening, report composition and JPEG
//! encoding under a hard byte budget.
//!
//! All operations are pure, synchronous functions over in-memory values.
//! Fetching the source document and uploading the result belong to the caller.

pub mod caption;
pub mod compose;
pub mod decode;
pub mod encode;
pub mod enhance;
pub mod luminance;
pub mod pipeline;
pub mod transform;
pub mod trim;

pub use caption::CaptionFont;
pub use compose::{compose_report, ReportLayout, ReportSection};
pub use decode::{decode_page, PixelLayout, RasterImage};
pub use encode::{encode_within_budget, BudgetFit, EncodeBudget, EncodedBuffer};
pub use enhance::sharpen;
pub use pipeline::{process_page, process_report, PipelineConfig, ProcessedPage};
pub use transform::crop_to_box;
pub use trim::{find_content_bounds, trim, DifferenceAmplification, TrimOptions};

use serde::{Deserialize, Serialize};

/// Axis-aligned pixel rectangle.
///
/// `x0`/`y0` are inclusive, `x1`/`y1` exclusive. A constructed box is never
/// empty (`x0 < x1` and `y0 < y1`); an absent box is `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl BoundingBox {
    /// Create a box, returning `None` if it would be empty.
    pub fn new(x0: u32, y0: u32, x1: u32, y1: u32) -> Option<Self> {
        if x0 < x1 && y0 < y1 {
            Some(Self { x0, y0, x1, y1 })
        } else {
            None
        }
    }

    /// Box covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Option<Self> {
        Self::new(0, 0, width, height)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }

    /// Grow the box by `margin` on every side, clamped to the image bounds.
    pub fn pad(&self, margin: u32, image_width: u32, image_height: u32) -> Self {
        Self {
            x0: self.x0.saturating_sub(margin),
            y0: self.y0.saturating_sub(margin),
            x1: self.x1.saturating_add(margin).min(image_width).max(self.x0 + 1),
            y1: self.y1.saturating_add(margin).min(image_height).max(self.y0 + 1),
        }
    }

    /// Intersect with a `width` x `height` image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Self> {
        Self::new(
            self.x0.min(width),
            self.y0.min(height),
            self.x1.min(width),
            self.y1.min(height),
        )
    }

    /// Whether the box covers the whole image.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.x0 == 0 && self.y0 == 0 && self.x1 >= width && self.y1 >= height
    }

    /// Whether `(x, y)` lies inside the box.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_rejects_empty() {
        assert!(BoundingBox::new(5, 5, 5, 10).is_none());
        assert!(BoundingBox::new(5, 5, 10, 4).is_none());
        assert!(BoundingBox::full(0, 10).is_none());
    }

    #[test]
    fn test_bounding_box_dimensions() {
        let bbox = BoundingBox::new(1500, 1200, 2500, 1700).unwrap();
        assert_eq!(bbox.width(), 1000);
        assert_eq!(bbox.height(), 500);
        assert!(bbox.contains(1500, 1200));
        assert!(!bbox.contains(2500, 1200));
    }

    #[test]
    fn test_pad_inside_bounds() {
        let bbox = BoundingBox::new(1500, 1200, 2500, 1700).unwrap();
        let padded = bbox.pad(15, 4000, 3000);
        assert_eq!(padded, BoundingBox::new(1485, 1185, 2515, 1715).unwrap());
        assert_eq!(padded.width(), 1030);
        assert_eq!(padded.height(), 530);
    }

    #[test]
    fn test_pad_clamps_to_image() {
        let bbox = BoundingBox::new(3, 2, 98, 49).unwrap();
        let padded = bbox.pad(10, 100, 50);
        assert_eq!(padded, BoundingBox::full(100, 50).unwrap());
        assert!(padded.is_full(100, 50));
    }

    #[test]
    fn test_pad_zero_is_identity() {
        let bbox = BoundingBox::new(1, 2, 3, 4).unwrap();
        assert_eq!(bbox.pad(0, 10, 10), bbox);
    }

    #[test]
    fn test_clamp_to() {
        let bbox = BoundingBox::new(5, 5, 50, 50).unwrap();
        assert_eq!(bbox.clamp_to(20, 30), BoundingBox::new(5, 5, 20, 30));
        assert_eq!(bbox.clamp_to(5, 30), None);
    }
}
