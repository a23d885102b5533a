//! Image encoding WASM bindings.

use crate::types::{js_error, JsDecodedImage};
use photosheet_core::encode;
use wasm_bindgen::prelude::*;

/// Encode an RGBA image as JPEG. Transparent pixels are flattened onto black.
///
/// `quality` ranges 1-100; 92 matches what the crop and sheet exports use.
#[wasm_bindgen]
pub fn encode_image_jpeg(image: &JsDecodedImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_image_jpeg(&image.to_decoded(), quality).map_err(js_error)
}

/// Wrap JPEG bytes in a `data:image/jpeg;base64,...` URL for `<img src>`.
#[wasm_bindgen]
pub fn jpeg_data_url(bytes: &[u8]) -> String {
    encode::jpeg_data_url(bytes)
}
