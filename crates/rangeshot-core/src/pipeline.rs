//! Per-region processing pipeline.
//!
//! A rendered page goes through the stages in this order:
//! 1. Sharpen (optional)
//! 2. Trim whitespace
//! 3. Encode under the size budget
//!
//! [`PipelineConfig`] bundles the parameters of all stages so a run can be
//! described by one JSON document.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::caption::CaptionFont;
use crate::compose::{compose_report, ComposeError, ReportLayout, ReportSection};
use crate::decode::{InvalidImage, RasterImage};
use crate::encode::{encode_within_budget, EncodeBudget, EncodeError, EncodedBuffer};
use crate::enhance::sharpen;
use crate::trim::{trim, TrimError, TrimOptions};

/// Errors from any pipeline stage.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    InvalidImage(#[from] InvalidImage),

    #[error(transparent)]
    Trim(#[from] TrimError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}

/// Parameters for every pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sharpness factor applied before trimming; `None` skips the stage.
    pub sharpen: Option<f32>,
    /// Whitespace trimming options.
    pub trim: TrimOptions,
    /// Encoder budget.
    pub budget: EncodeBudget,
    /// Layout used when several regions are composed into one page.
    pub layout: ReportLayout,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sharpen: Some(2.0),
            trim: TrimOptions::default(),
            budget: EncodeBudget::default(),
            layout: ReportLayout::default(),
        }
    }
}

/// Result of [`process_page`].
#[derive(Debug, Clone)]
pub struct ProcessedPage {
    /// Dimensions of the input page.
    pub source_size: (u32, u32),
    /// Dimensions after trimming, before any downscale.
    pub trimmed_size: (u32, u32),
    /// Encoded output.
    pub encoded: EncodedBuffer,
}

/// Sharpen and trim a page without encoding it.
pub fn prepare_region(
    image: &RasterImage,
    config: &PipelineConfig,
) -> Result<RasterImage, PipelineError> {
    let sharpened;
    let source = match config.sharpen {
        Some(factor) => {
            sharpened = sharpen(image, factor)?;
            &sharpened
        }
        None => image,
    };
    Ok(trim(source, &config.trim)?)
}

/// Run the full pipeline on one rendered page.
///
/// # Errors
///
/// Fails only for structurally invalid input or an invalid configuration.
/// A budget that cannot be met is reported through
/// [`EncodedBuffer::fit`](crate::encode::EncodedBuffer::fit).
pub fn process_page(
    image: &RasterImage,
    config: &PipelineConfig,
) -> Result<ProcessedPage, PipelineError> {
    let trimmed = prepare_region(image, config)?;
    let encoded = encode_within_budget(&trimmed, &config.budget)?;

    info!(
        source_width = image.width,
        source_height = image.height,
        trimmed_width = trimmed.width,
        trimmed_height = trimmed.height,
        size = encoded.len(),
        quality = encoded.quality(),
        "page processed"
    );

    Ok(ProcessedPage {
        source_size: (image.width, image.height),
        trimmed_size: (trimmed.width, trimmed.height),
        encoded,
    })
}

/// Sharpen and trim every section's page, stack them into one report page
/// and encode it.
///
/// Captions are kept and drawn with `font`, which is required when any
/// section has one.
pub fn process_report(
    sections: &[ReportSection],
    config: &PipelineConfig,
    font: Option<&CaptionFont>,
) -> Result<EncodedBuffer, PipelineError> {
    let regions = sections
        .iter()
        .map(|section| {
            Ok(ReportSection {
                image: prepare_region(&section.image, config)?,
                caption: section.caption.clone(),
            })
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;
    let report = compose_report(&regions, &config.layout, font)?;
    Ok(encode_within_budget(&report, &config.budget)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::PixelLayout;
    use crate::BoundingBox;

    fn page_with_table(width: u32, height: u32, table: BoundingBox) -> RasterImage {
        let mut img = RasterImage::filled(width, height, [255, 255, 255]);
        for y in table.y0..table.y1 {
            for x in table.x0..table.x1 {
                let idx = ((y * width + x) * 3) as usize;
                // Alternating rows like a striped table
                let shade = if (y / 4) % 2 == 0 { 30 } else { 180 };
                img.pixels[idx..idx + 3].copy_from_slice(&[shade, shade, shade]);
            }
        }
        img
    }

    #[test]
    fn test_process_page_trims_and_encodes() {
        let table = BoundingBox::new(40, 30, 160, 90).unwrap();
        let page = page_with_table(200, 150, table);
        let config = PipelineConfig {
            sharpen: None,
            ..PipelineConfig::default()
        };

        let processed = process_page(&page, &config).unwrap();
        assert_eq!(processed.source_size, (200, 150));
        assert_eq!(processed.trimmed_size, (120, 60));
        assert_eq!((processed.encoded.width(), processed.encoded.height()), (120, 60));
        assert!(processed.encoded.is_within_budget());
    }

    #[test]
    fn test_sharpen_stage_keeps_trim_box() {
        let table = BoundingBox::new(40, 30, 160, 90).unwrap();
        let page = page_with_table(200, 150, table);
        let config = PipelineConfig::default();

        let region = prepare_region(&page, &config).unwrap();
        assert_eq!((region.width, region.height), (120, 60));
    }

    #[test]
    fn test_blank_page_kept_whole() {
        let page = RasterImage::filled(80, 60, [255, 255, 255]);
        let processed = process_page(&page, &PipelineConfig::default()).unwrap();
        assert_eq!(processed.trimmed_size, (80, 60));
    }

    #[test]
    fn test_invalid_page_is_error() {
        let page = RasterImage {
            width: 0,
            height: 0,
            layout: PixelLayout::Rgb,
            pixels: vec![],
        };
        assert!(matches!(
            process_page(&page, &PipelineConfig::default()),
            Err(PipelineError::InvalidImage(_))
        ));

        let config = PipelineConfig {
            sharpen: None,
            ..PipelineConfig::default()
        };
        assert!(matches!(
            process_page(&page, &config),
            Err(PipelineError::Trim(_))
        ));
    }

    #[test]
    fn test_invalid_budget_is_error() {
        let page = RasterImage::filled(10, 10, [0, 0, 0]);
        let mut config = PipelineConfig::default();
        config.budget.downscale_factor = 2.0;
        assert!(matches!(
            process_page(&page, &config),
            Err(PipelineError::Encode(EncodeError::InvalidBudget(_)))
        ));
    }

    #[test]
    fn test_process_report_stacks_regions() {
        let first = page_with_table(200, 150, BoundingBox::new(40, 30, 160, 90).unwrap());
        let second = page_with_table(300, 300, BoundingBox::new(10, 10, 250, 130).unwrap());
        let mut config = PipelineConfig::default();
        config.sharpen = None;
        config.layout = ReportLayout {
            page_width: 260,
            margin: 10,
            section_gap: 20,
            ..ReportLayout::default()
        };

        let sections = [ReportSection::new(first), ReportSection::new(second)];
        let encoded = process_report(&sections, &config, None).unwrap();
        // Regions 120x60 and 240x120 both scale to 240 wide: 120 and 120 tall
        assert_eq!(encoded.width(), 260);
        assert_eq!(encoded.height(), 10 + 120 + 20 + 120 + 10);
    }

    #[test]
    fn test_config_json_round_trip() {
        let json = r#"{
            "sharpen": null,
            "trim": {"padding": 15, "background": [255, 255, 255],
                     "amplification": {"strategy": "affine_remap", "scale": 1.0, "bias": -100.0}},
            "budget": {"max_bytes": 2097152}
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.sharpen, None);
        assert_eq!(config.trim.padding, 15);
        assert_eq!(config.budget.max_bytes, 2 * 1024 * 1024);
        assert_eq!(config.budget.fallback_quality, 65);
        assert_eq!(config.layout, ReportLayout::default());
    }

    #[test]
    fn test_process_report_keeps_captions() {
        let page = page_with_table(200, 150, BoundingBox::new(40, 30, 160, 90).unwrap());
        let mut config = PipelineConfig::default();
        config.sharpen = None;
        config.layout = ReportLayout {
            page_width: 260,
            margin: 10,
            section_gap: 20,
            ..ReportLayout::default()
        };
        let sections = [ReportSection::new(page).with_caption("Q3 revenue")];

        assert!(matches!(
            process_report(&sections, &config, None),
            Err(PipelineError::Compose(ComposeError::MissingCaptionFont { index: 0 }))
        ));

        let font = crate::caption::test_font();
        let encoded = process_report(&sections, &config, Some(&font)).unwrap();
        // 10 + (50 + 40) + 120 + 10
        assert_eq!(encoded.height(), 230);
    }
}
