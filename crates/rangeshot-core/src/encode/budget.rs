//! JPEG encoding under a hard byte budget.
//!
//! The search runs in two phases:
//!
//! 1. **Quality ladder**: encode at each quality in order and return the first
//!    output that fits the budget. The ladder is normally descending, so the
//!    highest acceptable quality wins.
//! 2. **Downscale**: shrink width and height by `downscale_factor` per round
//!    (compounding, truncated to whole pixels) and encode at
//!    `fallback_quality`, for at most `max_downscale_rounds` rounds.
//!
//! If nothing fits, the last attempt is returned flagged as
//! [`BudgetFit::Exceeded`]. Every returned buffer has been measured against
//! the budget, so callers that need a hard guarantee only have to inspect
//! [`EncodedBuffer::fit`].

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::jpeg::{encode_jpeg_with, EncodeError, JpegOptions};
use crate::decode::{resize, FilterType, PixelLayout, RasterImage};

/// Default budget: 4 MiB.
pub const DEFAULT_MAX_BYTES: usize = 4 * 1024 * 1024;

/// Default quality ladder, highest first.
pub const DEFAULT_QUALITY_LADDER: [u8; 5] = [95, 85, 75, 65, 55];

/// Encoding format of an [`EncodedBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFormatTag {
    Jpeg,
}

impl ImageFormatTag {
    /// MIME type for upload headers.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormatTag::Jpeg => "image/jpeg",
        }
    }

    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormatTag::Jpeg => "jpg",
        }
    }
}

/// Whether an [`EncodedBuffer`] satisfies the budget it was produced for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BudgetFit {
    /// The buffer is at most the budget.
    Within,
    /// Best-effort result: every attempt was over budget.
    Exceeded {
        actual_bytes: usize,
        budget_bytes: usize,
    },
}

/// Size budget and search parameters for [`encode_within_budget`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeBudget {
    /// Maximum accepted output size in bytes.
    pub max_bytes: usize,
    /// Qualities tried in order at full resolution.
    pub quality_ladder: Vec<u8>,
    /// Per-round scale factor for the downscale phase, in `(0, 1)`.
    pub downscale_factor: f64,
    /// Number of downscale rounds after the ladder is exhausted.
    pub max_downscale_rounds: u32,
    /// Quality used for every downscale round.
    pub fallback_quality: u8,
    /// Resampling filter for the downscale phase.
    pub filter: FilterType,
    /// Encoder switches applied to every attempt.
    pub jpeg: JpegOptions,
}

impl Default for EncodeBudget {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_BYTES,
            quality_ladder: DEFAULT_QUALITY_LADDER.to_vec(),
            downscale_factor: 0.96,
            max_downscale_rounds: 3,
            fallback_quality: 65,
            filter: FilterType::Lanczos3,
            jpeg: JpegOptions::default(),
        }
    }
}

impl EncodeBudget {
    /// Default search parameters with a custom byte ceiling.
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes,
            ..Self::default()
        }
    }

    /// Replace the quality ladder.
    pub fn with_quality_ladder(mut self, ladder: impl Into<Vec<u8>>) -> Self {
        self.quality_ladder = ladder.into();
        self
    }

    /// Replace the downscale parameters.
    pub fn with_downscale(mut self, factor: f64, rounds: u32, fallback_quality: u8) -> Self {
        self.downscale_factor = factor;
        self.max_downscale_rounds = rounds;
        self.fallback_quality = fallback_quality;
        self
    }

    /// Number of encode attempts made when nothing fits.
    pub fn max_attempts(&self) -> usize {
        (self.quality_ladder.len() + self.max_downscale_rounds as usize).max(1)
    }

    /// Check that the parameters can drive a search.
    pub fn validate(&self) -> Result<(), EncodeError> {
        if !(self.downscale_factor > 0.0 && self.downscale_factor < 1.0) {
            return Err(EncodeError::InvalidBudget(format!(
                "downscale factor {} must be between 0 and 1 (exclusive)",
                self.downscale_factor
            )));
        }
        let out_of_range = self
            .quality_ladder
            .iter()
            .chain(std::iter::once(&self.fallback_quality))
            .find(|q| !(1..=100).contains(*q));
        if let Some(q) = out_of_range {
            return Err(EncodeError::InvalidBudget(format!(
                "quality {q} must be between 1 and 100"
            )));
        }
        Ok(())
    }
}

/// An encoded image and the parameters that produced it.
///
/// Produced once by [`encode_within_budget`]; read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedBuffer {
    bytes: Vec<u8>,
    format: ImageFormatTag,
    quality: u8,
    scale: f64,
    width: u32,
    height: u32,
    attempts: usize,
    fit: BudgetFit,
}

impl EncodedBuffer {
    /// Encoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume the buffer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Size of the encoded bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer holds no bytes. Never true for a successful encode.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Encoding format.
    pub fn format(&self) -> ImageFormatTag {
        self.format
    }

    /// Quality used for the returned attempt.
    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Output width divided by the source width (1.0 when not downscaled).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Output width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of encodes performed, including the returned one.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Budget outcome.
    pub fn fit(&self) -> BudgetFit {
        self.fit
    }

    /// Whether the buffer satisfies the budget.
    pub fn is_within_budget(&self) -> bool {
        self.fit == BudgetFit::Within
    }
}

/// One measured encode.
struct Attempt {
    bytes: Vec<u8>,
    quality: u8,
    width: u32,
    height: u32,
}

/// Encode an image as JPEG so that it fits `budget.max_bytes`.
///
/// See the module documentation for the search order. The input is normalized
/// to RGB first.
///
/// # Errors
///
/// Fails only for structurally invalid images
/// (`EncodeError::InvalidDimensions`, `EncodeError::InvalidPixelData`), an
/// invalid budget (`EncodeError::InvalidBudget`) or a codec failure. An
/// unsatisfiable budget is not an error.
///
/// # Example
///
/// ```
/// use rangeshot_core::{encode_within_budget, EncodeBudget, RasterImage};
///
/// let page = RasterImage::filled(640, 480, [255, 255, 255]);
/// let encoded = encode_within_budget(&page, &EncodeBudget::new(64 * 1024)).unwrap();
/// assert!(encoded.is_within_budget());
/// assert_eq!(encoded.quality(), 95);
/// ```
pub fn encode_within_budget(
    image: &RasterImage,
    budget: &EncodeBudget,
) -> Result<EncodedBuffer, EncodeError> {
    budget.validate()?;
    image.validate()?;

    let source = match image.layout {
        PixelLayout::Rgb => Cow::Borrowed(image),
        _ => Cow::Owned(image.to_rgb()),
    };

    let mut attempts = 0usize;
    let mut last: Option<Attempt> = None;

    for &quality in &budget.quality_ladder {
        let bytes = encode_jpeg_with(&source, quality, &budget.jpeg)?;
        attempts += 1;
        debug!(quality, size = bytes.len(), budget = budget.max_bytes, "jpeg attempt");

        let attempt = Attempt {
            bytes,
            quality,
            width: source.width,
            height: source.height,
        };
        if attempt.bytes.len() <= budget.max_bytes {
            return Ok(finish(attempt, &source, attempts, budget));
        }
        last = Some(attempt);
    }

    let (mut width, mut height) = (source.width, source.height);
    for round in 1..=budget.max_downscale_rounds {
        width = shrink(width, budget.downscale_factor);
        height = shrink(height, budget.downscale_factor);

        let scaled = resize(&source, width, height, budget.filter)?;
        let bytes = encode_jpeg_with(&scaled, budget.fallback_quality, &budget.jpeg)?;
        attempts += 1;
        debug!(
            round,
            width,
            height,
            quality = budget.fallback_quality,
            size = bytes.len(),
            "downscaled jpeg attempt"
        );

        let attempt = Attempt {
            bytes,
            quality: budget.fallback_quality,
            width,
            height,
        };
        if attempt.bytes.len() <= budget.max_bytes {
            return Ok(finish(attempt, &source, attempts, budget));
        }
        last = Some(attempt);
    }

    let last = match last {
        Some(attempt) => attempt,
        None => {
            // Empty ladder and no downscale rounds: one full-size attempt
            attempts += 1;
            Attempt {
                bytes: encode_jpeg_with(&source, budget.fallback_quality, &budget.jpeg)?,
                quality: budget.fallback_quality,
                width: source.width,
                height: source.height,
            }
        }
    };

    Ok(finish(last, &source, attempts, budget))
}

/// Shrink a dimension by `factor`, truncating and keeping at least one pixel.
fn shrink(dimension: u32, factor: f64) -> u32 {
    ((dimension as f64 * factor) as u32).max(1)
}

fn finish(
    attempt: Attempt,
    source: &RasterImage,
    attempts: usize,
    budget: &EncodeBudget,
) -> EncodedBuffer {
    let size = attempt.bytes.len();
    let fit = if size <= budget.max_bytes {
        info!(
            quality = attempt.quality,
            width = attempt.width,
            height = attempt.height,
            size,
            attempts,
            "encoded within budget"
        );
        BudgetFit::Within
    } else {
        warn!(
            quality = attempt.quality,
            width = attempt.width,
            height = attempt.height,
            size,
            budget = budget.max_bytes,
            attempts,
            "budget not reachable, returning best effort"
        );
        BudgetFit::Exceeded {
            actual_bytes: size,
            budget_bytes: budget.max_bytes,
        }
    };

    EncodedBuffer {
        scale: attempt.width as f64 / source.width as f64,
        bytes: attempt.bytes,
        format: ImageFormatTag::Jpeg,
        quality: attempt.quality,
        width: attempt.width,
        height: attempt.height,
        attempts,
        fit,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
