//! Photosheet Core - photo cropping and print sheet engine
//!
//! This crate turns uploaded photos into print-ready JPEGs. It provides
//! EXIF-aware decoding, rotation-aware cropping on a raster surface, and
//! grid composition of many copies onto a fixed-size print sheet.
//!
//! The pipeline for one photo is:
//!
//! 1. [`decode_image`] the uploaded bytes
//! 2. [`crop_image`] with the user's rotation and crop rectangle
//! 3. queue the result with a copy count and [`compose_sheet`] onto a
//!    [`SheetPreset`]

pub mod color;
pub mod decode;
pub mod encode;
pub mod error;
pub mod sheet;
pub mod surface;
pub mod transform;

pub use color::Color;
pub use decode::{decode_image, load_all, DecodeError, DecodedImage};
pub use encode::{encode_image_jpeg, jpeg_data_url, DEFAULT_JPEG_QUALITY};
pub use error::{Error, Result};
pub use sheet::{
    compose_sheet, compose_sheet_from_sources, compose_sheet_jpeg, flatten, PrintQueueItem,
    Sheet, SheetOptions, SheetPreset,
};
pub use surface::{CpuSurface, RasterSurface};
pub use transform::{compute_rotated_bounds, crop_image, crop_to_image, CropOptions, PixelCrop};
