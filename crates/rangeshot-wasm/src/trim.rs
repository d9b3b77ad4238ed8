//! Whitespace trimming and sharpening WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { decode_page, sharpen, trim_whitespace } from '@rangeshot/wasm';
//!
//! const page = decode_page(bytes);
//! const crisp = sharpen(page, 2.0);
//! const trimmed = trim_whitespace(crisp, {
//!   padding: 15,
//!   amplification: { strategy: 'contrast_scale', factor: 3.0 },
//! });
//! ```

use crate::types::{options_from_js, JsRasterImage};
use rangeshot_core::trim::{trim, TrimOptions};
use rangeshot_core::enhance;
use wasm_bindgen::prelude::*;

/// Crop uniform background away from a page.
///
/// # Arguments
///
/// * `image` - The page to trim
/// * `options` - Optional `TrimOptions` object:
///   `{ padding?, background?: [r, g, b], amplification?: { strategy, ... } }`.
///   Pass `undefined` for defaults (corner-sampled background, 3x contrast,
///   no padding).
///
/// # Returns
///
/// The cropped page, or an unchanged copy when no content differs from the
/// background.
///
/// # Errors
///
/// Returns an error if the options object is malformed or the image buffer
/// does not match its dimensions.
#[wasm_bindgen]
pub fn trim_whitespace(image: &JsRasterImage, options: JsValue) -> Result<JsRasterImage, JsValue> {
    let options: TrimOptions = options_from_js(options)?;
    trim(image.raster(), &options)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Sharpen an image.
///
/// `factor` 1.0 returns a copy, 2.0 is the usual setting for rendered text,
/// values below 1.0 blur.
///
/// # Errors
///
/// Returns an error if the image buffer does not match its dimensions.
#[wasm_bindgen]
pub fn sharpen(image: &JsRasterImage, factor: f32) -> Result<JsRasterImage, JsValue> {
    enhance::sharpen(image.raster(), factor)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
