//! Image encoding for Rangeshot.
//!
//! This module provides functionality for:
//! - Encoding images to progressive, Huffman-optimized JPEG at a fixed quality
//! - Encoding under a byte budget with a quality ladder and downscale fallback
//!
//! # Architecture
//!
//! All operations are synchronous, allocation-only and free of I/O. Uploading
//! the resulting buffer (and retrying failed uploads) is the caller's job.
//!
//! # Examples
//!
//! ```ignore
//! use rangeshot_core::encode::{encode_within_budget, EncodeBudget};
//!
//! let encoded = encode_within_budget(&page, &EncodeBudget::default())?;
//! if !encoded.is_within_budget() {
//!     eprintln!("shipping {} bytes over budget", encoded.len());
//! }
//! ```

mod budget;
mod jpeg;

pub use budget::{
    encode_within_budget, BudgetFit, EncodeBudget, EncodedBuffer, ImageFormatTag,
    DEFAULT_MAX_BYTES, DEFAULT_QUALITY_LADDER,
};
pub use jpeg::{encode_jpeg, encode_jpeg_with, EncodeError, JpegOptions};
