//! Rotation-aware cropping.
//!
//! # Coordinate System
//!
//! A crop rectangle is given in integer pixels in the space of the *rotated*
//! image: the source is rotated about its center and placed in the tight
//! axis-aligned box that contains it (see
//! [`compute_rotated_bounds`](super::compute_rotated_bounds)), origin at the
//! box's top-left. No padded safe area is used. Crop selectors upstream must
//! produce rectangles in this space.
//!
//! The rectangle may reach outside the rotated content or outside the box
//! itself. Those pixels come out as the background color, or transparent when
//! no background is given. That is accepted behavior, not an error.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rotation::{compute_rotated_bounds, rotation_about_center};
use crate::color::Color;
use crate::decode::DecodedImage;
use crate::encode::{encode_surface_jpeg, DEFAULT_JPEG_QUALITY};
use crate::error::Result;
use crate::surface::{validate_dimensions, CpuSurface, PixelRect, RasterSurface, SurfaceError};

/// Crop rectangle in rotated-image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelCrop {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl PixelCrop {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn to_rect(self) -> PixelRect {
        PixelRect::new(self.x as i64, self.y as i64, self.width, self.height)
    }
}

/// Output settings for [`crop_image`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropOptions {
    /// JPEG quality (1-100).
    pub quality: u8,
}

impl Default for CropOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Rotate `image` by `rotation_degrees` (clockwise) and cut out `crop`,
/// returning the output surface.
///
/// 1. size a surface to the rotated bounding box
/// 2. fill it with `background`, if any
/// 3. draw the image rotated about the box center
/// 4. read back the crop rectangle
/// 5. place those pixels on a fresh `crop.width x crop.height` surface,
///    over `background` if given
///
/// The source image is only read.
pub fn render_crop<S: RasterSurface>(
    image: &DecodedImage,
    crop: PixelCrop,
    rotation_degrees: f64,
    background: Option<Color>,
) -> std::result::Result<S, SurfaceError> {
    let (box_w, box_h) = compute_rotated_bounds(image.width, image.height, rotation_degrees);
    debug!(
        src_width = image.width,
        src_height = image.height,
        rotation = rotation_degrees,
        box_width = box_w,
        box_height = box_h,
        ?crop,
        "cropping photo"
    );

    // Validate the output size first so a bad rectangle fails before the
    // (possibly large) rotation surface is allocated.
    validate_dimensions(crop.width, crop.height)?;

    let mut rotated = S::allocate(box_w, box_h)?;
    if let Some(color) = background {
        rotated.fill(color);
    }
    let transform =
        rotation_about_center(image.width, image.height, box_w, box_h, rotation_degrees);
    rotated.draw_image(image, &transform);

    let block = rotated.read_pixels(crop.to_rect());
    drop(rotated);

    let mut output = S::allocate(crop.width, crop.height)?;
    match background {
        // Parts of the crop outside the rotated surface read back as
        // transparent, so composite over a fresh fill.
        Some(color) => {
            output.fill(color);
            output.blend_pixels(0, 0, &block);
        }
        None => output.put_pixels(0, 0, &block),
    }
    Ok(output)
}

/// Crop to an unencoded RGBA image using the CPU surface.
pub fn crop_to_image(
    image: &DecodedImage,
    crop: PixelCrop,
    rotation_degrees: f64,
    background: Option<Color>,
) -> Result<DecodedImage> {
    let surface: CpuSurface = render_crop(image, crop, rotation_degrees, background)?;
    Ok(surface.into_image())
}

/// Crop and encode as JPEG.
///
/// `background` is a color string (`"white"`, `"#ffffff"`, `"rgb(...)"`);
/// `None` leaves uncovered pixels transparent, which JPEG flattens to black.
///
/// # Errors
///
/// Fails on an unparseable background color, a zero-sized crop, or an
/// encoder failure. A crop outside the image content is not an error.
pub fn crop_image(
    image: &DecodedImage,
    crop: PixelCrop,
    rotation_degrees: f64,
    background: Option<&str>,
    options: &CropOptions,
) -> Result<Vec<u8>> {
    let background = background.map(Color::parse).transpose()?;
    let surface: CpuSurface = render_crop(image, crop, rotation_degrees, background)?;
    Ok(encode_surface_jpeg(&surface, options.quality)?)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
