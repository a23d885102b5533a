//! Image decoding WASM bindings.

use crate::types::{js_error, JsDecodedImage};
use photosheet_core::decode;
use wasm_bindgen::prelude::*;

/// Decode a JPEG or PNG to RGBA, applying EXIF orientation.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsDecodedImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsDecodedImage::from_decoded)
        .map_err(js_error)
}

/// Read the EXIF orientation tag (1-8). Returns 1 when absent.
#[wasm_bindgen]
pub fn image_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}
