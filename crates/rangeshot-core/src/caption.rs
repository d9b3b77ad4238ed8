//! Caption text rendering for report pages.
//!
//! Glyphs are rasterized with `fontdue` from a font supplied by the caller
//! (TrueType or OpenType bytes) and alpha-blended onto an RGB page.

use std::fmt;

use fontdue::{Font, FontSettings};
use thiserror::Error;

use crate::decode::{PixelLayout, RasterImage};

/// The font bytes could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid caption font: {0}")]
pub struct InvalidFont(pub String);

/// A parsed font used to draw report captions.
///
/// Load the bold face directly if captions should be bold; no synthetic
/// emboldening is applied.
#[derive(Clone)]
pub struct CaptionFont {
    font: Font,
}

impl fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptionFont").finish_non_exhaustive()
    }
}

impl CaptionFont {
    /// Parse a TrueType/OpenType font.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InvalidFont> {
        Font::from_bytes(bytes, FontSettings::default())
            .map(|font| Self { font })
            .map_err(|e| InvalidFont(e.to_string()))
    }

    /// Advance width of `text` at `size` pixels.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars()
            .map(|ch| self.font.metrics(ch, size).advance_width)
            .sum()
    }

    /// Draw `text` horizontally centered on `center_x` with its baseline at
    /// `baseline`. Pixels outside the page are clipped.
    pub(crate) fn draw_centered(
        &self,
        page: &mut RasterImage,
        text: &str,
        center_x: f32,
        baseline: i64,
        size: f32,
        color: [u8; 3],
    ) {
        debug_assert_eq!(page.layout, PixelLayout::Rgb);
        let mut pen_x = center_x - self.text_width(text, size) / 2.0;

        for ch in text.chars() {
            let (metrics, coverage) = self.font.rasterize(ch, size);
            let left = pen_x.round() as i64 + metrics.xmin as i64;
            // ymin is the bitmap's bottom edge relative to the baseline, y up
            let top = baseline - metrics.ymin as i64 - metrics.height as i64;

            for (row, line) in coverage.chunks(metrics.width.max(1)).enumerate() {
                for (col, &alpha) in line.iter().enumerate() {
                    blend(page, left + col as i64, top + row as i64, color, alpha);
                }
            }
            pen_x += metrics.advance_width;
        }
    }
}

fn blend(page: &mut RasterImage, x: i64, y: i64, color: [u8; 3], alpha: u8) {
    if alpha == 0 || x < 0 || y < 0 || x >= page.width as i64 || y >= page.height as i64 {
        return;
    }
    let idx = (y as usize * page.width as usize + x as usize) * 3;
    let a = alpha as u32;
    for (dst, &src) in page.pixels[idx..idx + 3].iter_mut().zip(&color) {
        *dst = ((*dst as u32 * (255 - a) + src as u32 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
pub(crate) fn test_font() -> CaptionFont {
    let bytes = include_bytes!("../tests/fixtures/DejaVuSans-Bold.ttf");
    CaptionFont::from_bytes(bytes).unwrap()
}
