//! Photosheet WASM - WebAssembly bindings for the photosheet engine
//!
//! Exposes cropping and print-sheet composition to the browser UI.
//!
//! # Module Structure
//!
//! - `types` - JS wrapper for decoded images, error and options conversion
//! - `decode` - Image decoding with EXIF orientation
//! - `crop` - Rotation-aware crop and JPEG export
//! - `sheet` - Print sheet composition (sync and promise-based)
//! - `encode` - JPEG encoding and data URLs
//!
//! # Usage
//!
//! ```typescript
//! import init, { crop_photo, compose_sheet, jpeg_data_url } from '@photosheet/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const cropped = crop_photo(bytes, 0, 0, 413, 531, 0, "white");
//! const sheet = compose_sheet([cropped], [8], "6x4");
//! preview.src = jpeg_data_url(sheet);
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod encode;
mod sheet;
mod types;

pub use crop::{crop_photo, rotated_bounds};
pub use decode::{decode_image, image_orientation};
pub use encode::{encode_image_jpeg, jpeg_data_url};
pub use sheet::{compose_sheet, compose_sheet_async, preset_ids, preset_info};
pub use types::JsDecodedImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
