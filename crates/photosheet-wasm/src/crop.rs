//! WASM bindings for rotation-aware cropping.
//!
//! The crop selector in the UI works in the rotated image's bounding box.
//! Call [`rotated_bounds`] to size that box, then hand the chosen rectangle
//! to [`crop_photo`].

use crate::types::{js_error, options_from_js};
use photosheet_core::decode::decode_image;
use photosheet_core::transform::{compute_rotated_bounds, crop_image, CropOptions, PixelCrop};
use wasm_bindgen::prelude::*;

/// Size of the box a `width x height` image occupies after rotation.
///
/// Returns `[width, height]`.
#[wasm_bindgen]
pub fn rotated_bounds(width: u32, height: u32, rotation_degrees: f64) -> Vec<u32> {
    let (w, h) = compute_rotated_bounds(width, height, rotation_degrees);
    vec![w, h]
}

/// Decode, rotate, crop and re-encode a photo as JPEG.
///
/// # Arguments
///
/// * `bytes` - Source JPEG/PNG bytes
/// * `x`, `y`, `width`, `height` - Crop rectangle in rotated-box pixels
/// * `rotation_degrees` - Clockwise rotation
/// * `background` - Fill for uncovered pixels (`"white"`, `"#fff"`...);
///   omit to leave them transparent, which encodes as black
/// * `options` - Optional `{ quality }`
///
/// # Example (TypeScript)
///
/// ```typescript
/// const [bw, bh] = rotated_bounds(image.width, image.height, 5);
/// const jpeg = crop_photo(bytes, 120, 80, 413, 531, 5, "white", { quality: 95 });
/// ```
#[allow(clippy::too_many_arguments)]
#[wasm_bindgen]
pub fn crop_photo(
    bytes: &[u8],
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    rotation_degrees: f64,
    background: Option<String>,
    options: JsValue,
) -> Result<Vec<u8>, JsValue> {
    let options: CropOptions = options_from_js(options)?;
    crop_photo_bytes(
        bytes,
        PixelCrop::new(x, y, width, height),
        rotation_degrees,
        background.as_deref(),
        &options,
    )
    .map_err(js_error)
}

pub(crate) fn crop_photo_bytes(
    bytes: &[u8],
    crop: PixelCrop,
    rotation_degrees: f64,
    background: Option<&str>,
    options: &CropOptions,
) -> photosheet_core::Result<Vec<u8>> {
    let image = decode_image(bytes)?;
    crop_image(&image, crop, rotation_degrees, background, options)
}
