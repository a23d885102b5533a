//! WASM-compatible wrapper types and conversion helpers.

use photosheet_core::decode::DecodedImage;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// A decoded RGBA image handed to JavaScript.
///
/// The pixel layout matches `ImageData.data`, so `pixels()` can be wrapped in
/// `new ImageData(new Uint8ClampedArray(image.pixels()), image.width)` for a
/// preview canvas.
#[wasm_bindgen]
pub struct JsDecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsDecodedImage {
    /// Create an image from RGBA pixel data (4 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsDecodedImage {
        JsDecodedImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 4).
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns a copy of the RGBA pixel data as a Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }
}

impl JsDecodedImage {
    pub(crate) fn from_decoded(img: DecodedImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core DecodedImage. Clones the pixel data.
    pub(crate) fn to_decoded(&self) -> DecodedImage {
        DecodedImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Turn an engine error into a JavaScript error value, echoing it to the
/// browser console.
pub(crate) fn js_error(err: impl std::fmt::Display) -> JsValue {
    let message = err.to_string();
    web_sys::console::error_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

/// Deserialize an options object. `undefined` and `null` give the defaults;
/// missing fields take their default values.
pub(crate) fn options_from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| js_error(format!("Invalid options: {}", e)))
}
