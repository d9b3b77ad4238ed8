//! Geometric transforms on raster images.
//!
//! # Coordinate System
//!
//! - Coordinates are in pixels of the source image
//! - Origin is the top-left corner
//! - Right and bottom edges are exclusive

mod crop;

pub use crop::crop_to_box;
