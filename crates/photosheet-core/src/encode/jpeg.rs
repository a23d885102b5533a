//! JPEG encoding for cropped photos and print sheets.
//!
//! This module provides JPEG encoding using the `image` crate's JPEG encoder.
//! JPEG has no alpha channel, so surfaces are flattened onto black first,
//! which is what a 2-D canvas does when exported as `image/jpeg`.

use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::DecodedImage;
use crate::surface::RasterSurface;

/// Quality used when the caller does not choose one (the canvas default, 0.92).
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Errors that can occur during JPEG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// JPEG encoding failed
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, clamped)
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Drop the alpha channel of an RGBA image by compositing it onto black.
pub fn flatten_to_rgb(image: &DecodedImage) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(image.pixels.len() / 4 * 3);
    for px in image.pixels.chunks_exact(4) {
        let a = px[3] as u32;
        for &c in &px[..3] {
            rgb.push(((c as u32 * a + 127) / 255) as u8);
        }
    }
    rgb
}

/// Encode an RGBA image as JPEG.
pub fn encode_image_jpeg(image: &DecodedImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    encode_jpeg(&flatten_to_rgb(image), image.width, image.height, quality)
}

/// Encode the current contents of a surface as JPEG.
pub fn encode_surface_jpeg<S: RasterSurface>(
    surface: &S,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    encode_image_jpeg(&surface.snapshot(), quality)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::surface::CpuSurface;

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 3];
        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        // SOI and EOI markers
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 3];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        let short = vec![128u8; 99 * 100 * 3];
        assert!(matches!(
            encode_jpeg(&short, 100, 100, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_jpeg_zero_dimensions() {
        assert!(matches!(
            encode_jpeg(&[], 0, 100, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_jpeg(&[], 100, 0, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_flatten_onto_black() {
        let img = DecodedImage::new(2, 1, vec![200, 100, 50, 255, 200, 100, 50, 0]);
        assert_eq!(flatten_to_rgb(&img), vec![200, 100, 50, 0, 0, 0]);
    }

    #[test]
    fn test_flatten_half_alpha() {
        let img = DecodedImage::new(1, 1, vec![255, 255, 255, 128]);
        assert_eq!(flatten_to_rgb(&img), vec![128, 128, 128]);
    }

    #[test]
    fn test_encode_surface_round_trips_dimensions() {
        let mut surface = CpuSurface::allocate(31, 17).unwrap();
        surface.fill(Color::WHITE);
        let jpeg = encode_surface_jpeg(&surface, DEFAULT_JPEG_QUALITY).unwrap();

        let decoded = image::load_from_memory(&jpeg).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (31, 17));
        let px = decoded.to_rgb8().get_pixel(15, 8).0;
        assert!(px.iter().all(|&c| c >= 250), "expected white, got {px:?}");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Encoding always produces a well-formed JPEG for valid input.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            (width, height) in (1u32..=40, 1u32..=40),
            quality in 1u8..=100,
        ) {
            let pixels = vec![128u8; (width as usize) * (height as usize) * 3];
            let jpeg_bytes = encode_jpeg(&pixels, width, height, quality).unwrap();

            prop_assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
            let len = jpeg_bytes.len();
            prop_assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
        }

        /// Property: Wrong buffer lengths are always rejected.
        #[test]
        fn prop_wrong_length_rejected(
            (width, height) in (1u32..=40, 1u32..=40),
            delta in 1usize..=10,
        ) {
            let pixels = vec![0u8; (width as usize) * (height as usize) * 3 + delta];
            let is_invalid_length = matches!(
                encode_jpeg(&pixels, width, height, 90),
                Err(EncodeError::InvalidPixelData { .. })
            );
            prop_assert!(is_invalid_length);
        }
    }
}
