//! WASM bindings for print sheet composition.
//!
//! # Example
//!
//! ```typescript
//! import { compose_sheet_async, jpeg_data_url } from '@photosheet/wasm';
//!
//! const pending = queue.map((item) =>
//!   fetch(item.url).then((r) => r.arrayBuffer()).then((b) => new Uint8Array(b)),
//! );
//! const jpeg = await compose_sheet_async(pending, queue.map((i) => i.copies), "A4");
//! preview.src = jpeg_data_url(jpeg);
//! ```

use crate::types::{js_error, options_from_js};
use js_sys::{Array, Promise, Uint8Array};
use photosheet_core::decode::{decode_image, DecodeError, DecodedImage};
use photosheet_core::sheet::{
    compose_sheet_from_sources, compose_sheet_jpeg, PrintQueueItem, SheetOptions, SheetPreset,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Compose already-loaded photos onto a sheet and encode it as JPEG.
///
/// `photos[i]` (JPEG/PNG bytes) is printed `copies[i]` times. Copies that do
/// not fit on the sheet are left off.
///
/// # Errors
///
/// Fails on an unknown preset, mismatched `photos`/`copies` lengths, an
/// undecodable photo or invalid options.
#[wasm_bindgen]
pub fn compose_sheet(
    photos: Array,
    copies: Vec<u32>,
    preset: &str,
    options: JsValue,
) -> Result<Vec<u8>, JsValue> {
    check_lengths(photos.length(), copies.len())?;
    let options: SheetOptions = options_from_js(options)?;
    let photos: Vec<Vec<u8>> = photos
        .iter()
        .map(|value| Uint8Array::new(&value).to_vec())
        .collect();

    compose_sheet_bytes(&photos, &copies, preset, &options).map_err(js_error)
}

/// Like [`compose_sheet`], but each photo is a promise of its bytes.
///
/// All promises are awaited concurrently. Photos keep their queue position
/// no matter which promise settles first, and a single rejection rejects the
/// whole composition.
#[wasm_bindgen]
pub async fn compose_sheet_async(
    photos: Array,
    copies: Vec<u32>,
    preset: String,
    options: JsValue,
) -> Result<Uint8Array, JsValue> {
    check_lengths(photos.length(), copies.len())?;
    let options: SheetOptions = options_from_js(options)?;
    let preset = SheetPreset::from_id(&preset).map_err(js_error)?;

    let queue: Vec<PrintQueueItem<JsValue>> = photos
        .iter()
        .zip(copies)
        .map(|(photo, copies)| PrintQueueItem::new(photo, copies))
        .collect();

    let sheet = compose_sheet_from_sources(&queue, &preset, &options, |photo: &JsValue| {
        load_photo(photo.clone())
    })
    .await
    .map_err(js_error)?;
    let jpeg = sheet.to_jpeg(options.quality).map_err(js_error)?;
    Ok(Uint8Array::from(jpeg.as_slice()))
}

/// Describe a preset (`{ id, pageWidth, pageHeight, columns, ... }`).
#[wasm_bindgen]
pub fn preset_info(preset: &str) -> Result<JsValue, JsValue> {
    let preset = SheetPreset::from_id(preset).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&preset).map_err(js_error)
}

/// Identifiers of every available preset.
#[wasm_bindgen]
pub fn preset_ids() -> Vec<String> {
    SheetPreset::ALL.iter().map(|p| p.id.to_string()).collect()
}

/// Await a promise (or plain value) of image bytes and decode it.
async fn load_photo(value: JsValue) -> Result<DecodedImage, DecodeError> {
    let bytes = JsFuture::from(Promise::resolve(&value))
        .await
        .map_err(|e| DecodeError::LoadFailed(e.as_string().unwrap_or_else(|| format!("{:?}", e))))?;
    decode_image(&Uint8Array::new(&bytes).to_vec())
}

fn check_lengths(photos: u32, copies: usize) -> Result<(), JsValue> {
    if photos as usize != copies {
        return Err(js_error(format!(
            "Expected one copy count per photo, got {} photos and {} counts",
            photos, copies
        )));
    }
    Ok(())
}

pub(crate) fn compose_sheet_bytes(
    photos: &[Vec<u8>],
    copies: &[u32],
    preset: &str,
    options: &SheetOptions,
) -> photosheet_core::Result<Vec<u8>> {
    let preset = SheetPreset::from_id(preset)?;
    let queue = photos
        .iter()
        .zip(copies)
        .map(|(bytes, &copies)| Ok(PrintQueueItem::new(decode_image(bytes)?, copies)))
        .collect::<photosheet_core::Result<Vec<_>>>()?;
    compose_sheet_jpeg(&queue, &preset, options)
}
