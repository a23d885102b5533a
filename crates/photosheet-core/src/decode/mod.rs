//! Image decoding for the crop and layout pipeline.
//!
//! This module provides functionality for:
//! - Decoding camera JPEGs and cut-out PNGs to RGBA
//! - Applying EXIF orientation so photos arrive upright
//! - Loading a batch of photos concurrently while preserving request order
//!
//! # Examples
//!
//! ```ignore
//! use photosheet_core::decode::{decode_image, DecodedImage};
//!
//! let bytes = std::fs::read("portrait.jpg").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod loader;
mod photo;
mod types;

pub use loader::load_all;
pub use photo::{decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, DecodedImage, Orientation};
