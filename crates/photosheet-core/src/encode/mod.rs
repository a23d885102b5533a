//! Image encoding.
//!
//! This module provides functionality for:
//! - Encoding RGB buffers, RGBA images and raster surfaces to JPEG
//! - Wrapping encoded bytes as `data:` URLs
//!
//! # Examples
//!
//! ```ignore
//! use photosheet_core::encode::{encode_surface_jpeg, jpeg_data_url, DEFAULT_JPEG_QUALITY};
//!
//! let jpeg = encode_surface_jpeg(&surface, DEFAULT_JPEG_QUALITY)?;
//! let url = jpeg_data_url(&jpeg);
//! ```

mod data_url;
mod jpeg;

pub use data_url::jpeg_data_url;
pub use jpeg::{
    encode_image_jpeg, encode_jpeg, encode_surface_jpeg, flatten_to_rgb, EncodeError,
    DEFAULT_JPEG_QUALITY,
};
