//! Report page composition.
//!
//! Several trimmed regions are stacked top to bottom on one tall page so they
//! can be shared as a single artifact. Every region is scaled to the usable
//! width of the page (`page_width - 2 * margin`), keeping its aspect ratio.
//! A region may carry a caption, drawn centered in a band above it.
//!
//! ```text
//! +----------------------------+
//! |          margin            |
//! |         Caption 1          |  caption_height (baseline at its bottom)
//! |        caption_gap         |
//! |   +--------------------+   |
//! |   |      region 1      |   |
//! |   +--------------------+   |
//! |        section_gap         |
//! |   +--------------------+   |
//! |   |      region 2      |   |  no caption: no caption band
//! |   +--------------------+   |
//! |          margin            |
//! +----------------------------+
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::caption::CaptionFont;
use crate::decode::{resize_to_width, FilterType, InvalidImage, RasterImage};

/// Largest page edge that can still be encoded as JPEG.
pub const MAX_PAGE_DIMENSION: u32 = 65_535;

/// Errors that can occur while composing a report page.
#[derive(Debug, Error)]
pub enum ComposeError {
    /// Nothing to compose.
    #[error("No regions to compose")]
    NoRegions,

    /// Margins leave no room for content.
    #[error("Page width {page_width} leaves no usable width with margin {margin}")]
    NoUsableWidth { page_width: u32, margin: u32 },

    /// A region is structurally invalid.
    #[error("Invalid region {index}: {source}")]
    InvalidRegion {
        index: usize,
        #[source]
        source: InvalidImage,
    },

    /// The layout would produce a page no encoder accepts.
    #[error("Report page exceeds {limit} pixels in width or height")]
    PageTooLarge { limit: u32 },

    /// A region has a caption but no font was supplied.
    #[error("Region {index} has a caption but no caption font was given")]
    MissingCaptionFont { index: usize },
}

/// Page geometry for [`compose_report`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportLayout {
    /// Page width in pixels.
    pub page_width: u32,
    /// Margin on all four sides.
    pub margin: u32,
    /// Vertical space between consecutive sections.
    pub section_gap: u32,
    /// Canvas color.
    pub background: [u8; 3],
    /// Filter used to scale regions to the usable width.
    pub filter: FilterType,
    /// Caption font size in pixels.
    pub caption_size: f32,
    /// Height of the caption band; the baseline sits on its bottom edge.
    pub caption_height: u32,
    /// Space between the caption baseline and the region.
    pub caption_gap: u32,
    /// Caption text color.
    pub caption_color: [u8; 3],
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            page_width: 1800,
            margin: 70,
            section_gap: 150,
            background: [255, 255, 255],
            filter: FilterType::Lanczos3,
            caption_size: 32.0,
            caption_height: 50,
            caption_gap: 40,
            caption_color: [0, 0, 0],
        }
    }
}

impl ReportLayout {
    /// Width available to regions.
    pub fn usable_width(&self) -> u32 {
        self.page_width.saturating_sub(self.margin.saturating_mul(2))
    }

    /// Vertical space taken by a caption band and its gap.
    fn caption_block(&self) -> Option<u32> {
        self.caption_height.checked_add(self.caption_gap)
    }
}

/// One region of a report page, with an optional caption above it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSection {
    pub image: RasterImage,
    pub caption: Option<String>,
}

impl ReportSection {
    pub fn new(image: RasterImage) -> Self {
        Self {
            image,
            caption: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }
}

impl From<RasterImage> for ReportSection {
    fn from(image: RasterImage) -> Self {
        Self::new(image)
    }
}

/// Stack sections onto a single report page.
///
/// `font` is only needed when at least one section has a caption.
///
/// # Errors
///
/// Returns `ComposeError::NoRegions` for an empty slice,
/// `ComposeError::NoUsableWidth` when the margins consume the page,
/// `ComposeError::InvalidRegion` for a structurally invalid region,
/// `ComposeError::PageTooLarge` when the page would exceed
/// [`MAX_PAGE_DIMENSION`] on either edge, and
/// `ComposeError::MissingCaptionFont` for a caption without a font.
pub fn compose_report(
    sections: &[ReportSection],
    layout: &ReportLayout,
    font: Option<&CaptionFont>,
) -> Result<RasterImage, ComposeError> {
    if sections.is_empty() {
        return Err(ComposeError::NoRegions);
    }
    if layout.page_width > MAX_PAGE_DIMENSION {
        return Err(ComposeError::PageTooLarge {
            limit: MAX_PAGE_DIMENSION,
        });
    }
    let usable = layout.usable_width();
    if usable == 0 {
        return Err(ComposeError::NoUsableWidth {
            page_width: layout.page_width,
            margin: layout.margin,
        });
    }
    if font.is_none() {
        if let Some(index) = sections.iter().position(|s| s.caption.is_some()) {
            return Err(ComposeError::MissingCaptionFont { index });
        }
    }

    let scaled = sections
        .iter()
        .enumerate()
        .map(|(index, section)| {
            resize_to_width(&section.image, usable, layout.filter)
                .map_err(|source| ComposeError::InvalidRegion { index, source })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let page_height =
        checked_page_height(sections, &scaled, layout).ok_or(ComposeError::PageTooLarge {
            limit: MAX_PAGE_DIMENSION,
        })?;

    debug!(
        regions = scaled.len(),
        width = layout.page_width,
        height = page_height,
        "composing report page"
    );

    let mut page = RasterImage::filled(layout.page_width, page_height, layout.background);
    let stride = layout.page_width as usize * 3;
    let left = layout.margin as usize * 3;
    let center_x = layout.page_width as f32 / 2.0;
    let mut top = layout.margin as usize;

    for (section, region) in sections.iter().zip(&scaled) {
        if let (Some(caption), Some(font)) = (&section.caption, font) {
            let baseline = (top + layout.caption_height as usize) as i64;
            font.draw_centered(
                &mut page,
                caption,
                center_x,
                baseline,
                layout.caption_size,
                layout.caption_color,
            );
            top += (layout.caption_height + layout.caption_gap) as usize;
        }

        let row_len = region.width as usize * 3;
        for (y, row) in region.pixels.chunks_exact(row_len).enumerate() {
            let offset = (top + y) * stride + left;
            page.pixels[offset..offset + row_len].copy_from_slice(row);
        }
        top += region.height as usize + layout.section_gap as usize;
    }

    Ok(page)
}

/// Total page height, or `None` past [`MAX_PAGE_DIMENSION`].
fn checked_page_height(
    sections: &[ReportSection],
    scaled: &[RasterImage],
    layout: &ReportLayout,
) -> Option<u32> {
    let gaps = u32::try_from(scaled.len() - 1)
        .ok()?
        .checked_mul(layout.section_gap)?;
    let mut height = layout.margin.checked_mul(2)?.checked_add(gaps)?;
    for (section, region) in sections.iter().zip(scaled) {
        height = height.checked_add(region.height)?;
        if section.caption.is_some() {
            height = height.checked_add(layout.caption_block()?)?;
        }
    }
    (height <= MAX_PAGE_DIMENSION).then_some(height)
}
