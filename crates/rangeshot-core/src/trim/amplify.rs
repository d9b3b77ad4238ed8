//! Difference amplification strategies.
//!
//! Before the bounding box is extracted, the per-channel difference against the
//! background is remapped so that faint anti-aliasing noise falls to zero while
//! real content stays non-zero. Both strategies are pure per-channel maps and
//! are evaluated through a 256-entry lookup table.

use serde::{Deserialize, Serialize};

/// How the raw background difference is amplified before box extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum DifferenceAmplification {
    /// Contrast enhancement around the mean luminance of the difference image:
    /// `out = mean + factor * (d - mean)`.
    ///
    /// Because the difference image is mostly zero, the mean is small and
    /// values below roughly `2/3 * mean` (for factor 3) collapse to zero.
    ContrastScale { factor: f32 },

    /// Affine remap applied directly to the difference: `out = d * scale + bias`.
    ///
    /// A negative bias acts as a hard noise floor. The right constants depend
    /// on the background color, so no default is provided.
    AffineRemap { scale: f32, bias: f32 },
}

impl Default for DifferenceAmplification {
    fn default() -> Self {
        DifferenceAmplification::ContrastScale { factor: 3.0 }
    }
}

impl DifferenceAmplification {
    /// Whether this strategy needs the mean luminance of the difference image.
    pub fn needs_mean(&self) -> bool {
        matches!(self, DifferenceAmplification::ContrastScale { .. })
    }

    /// Build the lookup table mapping a raw channel difference to its
    /// amplified value.
    ///
    /// `mean` is ignored by [`DifferenceAmplification::AffineRemap`].
    pub fn lut(&self, mean: u8) -> [u8; 256] {
        let mut table = [0u8; 256];
        for (d, out) in table.iter_mut().enumerate() {
            let d = d as f32;
            let v = match *self {
                DifferenceAmplification::ContrastScale { factor } => {
                    let mean = mean as f32;
                    mean + factor * (d - mean)
                }
                DifferenceAmplification::AffineRemap { scale, bias } => d * scale + bias,
            };
            *out = clip_u8(v);
        }
        table
    }
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
