//! Page image decoding and basic raster types.
//!
//! This module provides functionality for:
//! - Decoding rasterized pages (PNG or JPEG) into a [`RasterImage`]
//! - Layout normalization to RGB
//! - Image resizing for the encoder's downscale loop and report composition
//!
//! # Examples
//!
//! ```ignore
//! use rangeshot_core::decode::decode_page;
//!
//! let png_bytes = std::fs::read("page-1.png").unwrap();
//! let image = decode_page(&png_bytes).unwrap();
//! println!("Decoded {}x{} page", image.width, image.height);
//! ```

mod page;
mod resize;
mod types;

pub use page::{decode_page, from_dynamic};
pub use resize::{resize, resize_to_width};
pub use types::{DecodeError, FilterType, InvalidImage, PixelLayout, RasterImage};
