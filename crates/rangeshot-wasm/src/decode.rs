//! Page decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_page`] - Decode a rendered page (PNG, JPEG, ...) from bytes
//! - [`resize`] - Resize an image to exact dimensions

use crate::types::{filter_from_u8, JsRasterImage};
use rangeshot_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a rendered page from bytes.
///
/// The format is detected from the content. Gray, gray+alpha, RGB and RGBA
/// sources keep their channel layout; other formats are converted to RGB(A).
///
/// # Errors
///
/// Returns an error if:
/// - The format is not recognized
/// - The data is corrupted or truncated
/// - The decoded image has a zero dimension
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await response.arrayBuffer());
/// const page = decode_page(bytes);
/// ```
#[wasm_bindgen]
pub fn decode_page(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_page(bytes)
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Resize algorithm: 0=Nearest (fastest), 1=Bilinear, 2=Lanczos3 (best quality)
///
/// # Errors
///
/// Returns an error if the image is malformed or a target dimension is zero.
#[wasm_bindgen]
pub fn resize(
    image: &JsRasterImage,
    width: u32,
    height: u32,
    filter: u8,
) -> Result<JsRasterImage, JsValue> {
    decode::resize(image.raster(), width, height, filter_from_u8(filter))
        .map(JsRasterImage::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
