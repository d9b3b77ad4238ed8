//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Rangeshot
//! types, handling the conversion between Rust and JavaScript representations.

use rangeshot_core::decode::{FilterType, PixelLayout, RasterImage};
use rangeshot_core::encode::{BudgetFit, EncodedBuffer};
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// Convert a u8 filter code from JavaScript to a `FilterType`.
///
/// 0 = Nearest, 1 = Bilinear, anything else = Lanczos3.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        1 => FilterType::Bilinear,
        _ => FilterType::Lanczos3,
    }
}

/// Read an options object passed from JavaScript.
///
/// `undefined` and `null` mean "all defaults"; missing fields fall back to
/// their defaults as well.
pub(crate) fn options_from_js<T>(value: JsValue) -> Result<T, JsValue>
where
    T: DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// A raster image wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsRasterImage {
    inner: RasterImage,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create a new RGB image from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            inner: RasterImage {
                width,
                height,
                layout: PixelLayout::Rgb,
                pixels,
            },
        }
    }

    /// Create an RGBA image, e.g. from canvas `ImageData`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            inner: RasterImage {
                width,
                height,
                layout: PixelLayout::Rgba,
                pixels,
            },
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Bytes per pixel of the stored buffer (1, 2, 3 or 4)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> usize {
        self.inner.layout.channels()
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns the pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterImage {
    pub(crate) fn from_raster(inner: RasterImage) -> Self {
        Self { inner }
    }

    pub(crate) fn raster(&self) -> &RasterImage {
        &self.inner
    }
}

/// An encoded image returned to JavaScript.
#[wasm_bindgen]
pub struct JsEncodedBuffer {
    inner: EncodedBuffer,
}

#[wasm_bindgen]
impl JsEncodedBuffer {
    /// Encoded bytes as Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    /// Encoded size in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.len()
    }

    /// MIME type, e.g. for an upload `Content-Type`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.inner.format().mime_type().to_string()
    }

    /// Quality used for the returned attempt
    #[wasm_bindgen(getter)]
    pub fn quality(&self) -> u8 {
        self.inner.quality()
    }

    /// Output width divided by input width
    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.scale()
    }

    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of encodes performed
    #[wasm_bindgen(getter)]
    pub fn attempts(&self) -> usize {
        self.inner.attempts()
    }

    /// False when the buffer is a best-effort result over the budget
    #[wasm_bindgen(getter)]
    pub fn within_budget(&self) -> bool {
        matches!(self.inner.fit(), BudgetFit::Within)
    }
}

impl JsEncodedBuffer {
    pub(crate) fn from_encoded(inner: EncodedBuffer) -> Self {
        Self { inner }
    }
}
