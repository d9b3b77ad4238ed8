//! Rangeshot WASM - WebAssembly bindings for Rangeshot
//!
//! This crate provides WASM bindings to expose the rangeshot-core functionality
//! to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for images and encoded buffers
//! - `decode` - Page decoding bindings (PNG, JPEG and other raster formats)
//! - `trim` - Whitespace trimming and sharpening bindings
//! - `encode` - Budgeted JPEG encoding bindings
//! - `pipeline` - Sharpen, trim and encode in one call
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_page, process_page } from '@rangeshot/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await response.arrayBuffer());
//! const page = decode_page(bytes);
//! const out = process_page(page, { budget: { max_bytes: 2 * 1024 * 1024 } });
//! console.log(`${out.width}x${out.height} at q${out.quality}, ${out.byte_length} bytes`);
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod pipeline;
mod trim;
mod types;

pub use decode::{decode_page, resize};
pub use encode::encode_within_budget;
pub use pipeline::process_page;
pub use trim::{sharpen, trim_whitespace};
pub use types::{JsEncodedBuffer, JsRasterImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
