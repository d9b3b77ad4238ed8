//! Full page pipeline binding: sharpen, trim, encode.

use crate::encode::report_fit;
use crate::types::{options_from_js, JsEncodedBuffer, JsRasterImage};
use rangeshot_core::pipeline::{self, PipelineConfig};
use wasm_bindgen::prelude::*;

/// Sharpen, trim and encode a rendered page in one call.
///
/// # Arguments
///
/// * `image` - The rendered page
/// * `config` - Optional `PipelineConfig` object:
///   `{ sharpen?: number | null, trim?: {...}, budget?: {...} }`.
///   Pass `undefined` for defaults (2x sharpen, corner-sampled trim, 4 MiB).
///
/// # Errors
///
/// Returns an error if the config object is malformed or invalid, or the
/// image buffer does not match its dimensions.
///
/// # Example
///
/// ```typescript
/// const out = process_page(decode_page(bytes), { sharpen: null });
/// await upload(out.bytes(), out.mime_type);
/// ```
#[wasm_bindgen]
pub fn process_page(image: &JsRasterImage, config: JsValue) -> Result<JsEncodedBuffer, JsValue> {
    let config: PipelineConfig = options_from_js(config)?;
    pipeline::process_page(image.raster(), &config)
        .map(|processed| report_fit(processed.encoded))
        .map(JsEncodedBuffer::from_encoded)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
