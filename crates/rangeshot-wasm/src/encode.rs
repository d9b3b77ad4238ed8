//! Budgeted JPEG encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { encode_within_budget } from '@rangeshot/wasm';
//!
//! const out = encode_within_budget(image, { max_bytes: 4 * 1024 * 1024 });
//! if (!out.within_budget) {
//!   console.warn(`best effort: ${out.byte_length} bytes`);
//! }
//! upload(out.bytes(), out.mime_type);
//! ```

use crate::types::{options_from_js, JsEncodedBuffer, JsRasterImage};
use rangeshot_core::encode::{self, EncodeBudget, EncodedBuffer};
use wasm_bindgen::prelude::*;

/// Encode an image as JPEG, stepping down quality and then size until it fits.
///
/// # Arguments
///
/// * `image` - The image to encode (alpha is dropped)
/// * `budget` - Optional `EncodeBudget` object:
///   `{ max_bytes?, quality_ladder?, downscale_factor?, max_downscale_rounds?,
///   fallback_quality?, filter?, jpeg? }`. Pass `undefined` for a 4 MiB budget
///   with the 95/85/75/65/55 ladder.
///
/// # Returns
///
/// A `JsEncodedBuffer`. When no attempt fits, the last attempt (the most
/// downscaled one, at `fallback_quality`) is returned with
/// `within_budget === false`. It is not necessarily the smallest.
///
/// # Errors
///
/// Returns an error if the budget object is malformed or invalid, or the image
/// buffer does not match its dimensions.
#[wasm_bindgen]
pub fn encode_within_budget(
    image: &JsRasterImage,
    budget: JsValue,
) -> Result<JsEncodedBuffer, JsValue> {
    let budget: EncodeBudget = options_from_js(budget)?;
    encode::encode_within_budget(image.raster(), &budget)
        .map(report_fit)
        .map(JsEncodedBuffer::from_encoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Log a console warning for best-effort results.
pub(crate) fn report_fit(encoded: EncodedBuffer) -> EncodedBuffer {
    if !encoded.is_within_budget() {
        console_warn(&format!(
            "rangeshot: {} bytes exceeds budget after {} attempts",
            encoded.len(),
            encoded.attempts()
        ));
    }
    encoded
}

#[cfg(target_arch = "wasm32")]
fn console_warn(message: &str) {
    web_sys::console::warn_1(&JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
fn console_warn(_message: &str) {}
