//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// The bytes could not be obtained at all (network failure, denied
    /// cross-origin read, rejected promise on the JavaScript side).
    #[error("Failed to load image: {0}")]
    LoadFailed(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl Orientation {
    /// Returns true if this orientation swaps width and height dimensions.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// A decoded image with RGBA pixel data.
///
/// Images are read-only once decoded. Every operation in this crate that
/// "changes" an image draws it into a fresh surface instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create an image filled with a single RGBA color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// RGBA value at (x, y), or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.pixels.get(idx..idx + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Check if this is an empty/invalid image: a zero dimension, or a pixel
    /// buffer whose length is not `width * height * 4`.
    ///
    /// Drawing code treats such images as having nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.width == 0
            || self.height == 0
            || self.pixels.len() as u64 != self.pixel_count() * 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(99), Orientation::Normal); // Invalid defaults to Normal
    }

    #[test]
    fn test_orientation_swaps_dimensions() {
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(Orientation::Rotate90CW.swaps_dimensions());
        assert!(Orientation::Rotate270CW.swaps_dimensions());
    }

    #[test]
    fn test_decoded_image_creation() {
        let img = DecodedImage::new(100, 50, vec![0u8; 100 * 50 * 4]);

        assert_eq!(img.width, 100);
        assert_eq!(img.height, 50);
        assert_eq!(img.pixel_count(), 5000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_filled_image() {
        let img = DecodedImage::filled(3, 2, [10, 20, 30, 255]);
        assert_eq!(img.pixels.len(), 3 * 2 * 4);
        assert_eq!(img.pixel(2, 1), Some([10, 20, 30, 255]));
        assert_eq!(img.pixel(3, 0), None);
    }

    #[test]
    fn test_decoded_image_empty() {
        let img = DecodedImage::new(0, 0, vec![]);
        assert!(img.is_empty());
    }

    #[test]
    fn test_mismatched_buffer_counts_as_empty() {
        let short = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![255u8; 4 * 4 * 4 - 1],
        };
        assert!(short.is_empty());

        let long = DecodedImage {
            width: 1,
            height: 1,
            pixels: vec![0u8; 8],
        };
        assert!(long.is_empty());
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::LoadFailed("404".to_string());
        assert_eq!(err.to_string(), "Failed to load image: 404");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Invalid or unsupported image format");
    }
}
