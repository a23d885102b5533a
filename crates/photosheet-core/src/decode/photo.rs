//! Photo decoding with EXIF orientation handling.
//!
//! Camera JPEGs usually carry their rotation in EXIF rather than in the pixel
//! data, while cut-out PNGs coming back from background removal carry alpha.
//! Both end up as upright RGBA [`DecodedImage`]s.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::{DecodeError, DecodedImage, Orientation};

/// Decode a photo (JPEG or PNG) from bytes, applying EXIF orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be recognized.
/// Returns `DecodeError::CorruptedFile` if the data is corrupted or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = decode_dynamic(bytes)?;
    Ok(DecodedImage::from_rgba_image(
        apply_orientation(img, orientation).into_rgba8(),
    ))
}

/// Decode a photo from bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let img = decode_dynamic(bytes)?;
    Ok(DecodedImage::from_rgba_image(img.into_rgba8()))
}

/// Extract EXIF orientation value from photo bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
