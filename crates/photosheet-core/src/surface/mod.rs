//! Raster surfaces: the only place pixels are touched.
//!
//! The cropper and the sheet compositor are written against the
//! [`RasterSurface`] capability (allocate, fill, draw under a transform,
//! read back, write back, stroke, snapshot) rather than a concrete canvas.
//! [`CpuSurface`] is the in-memory implementation used natively and inside
//! WebAssembly; another backend only has to implement the trait.
//!
//! Every call site allocates its own surfaces. Nothing is shared between
//! invocations.

mod affine;
mod cpu;

pub(crate) use affine::quarter_turns;
pub use affine::Affine;
pub use cpu::CpuSurface;

use thiserror::Error;

use crate::color::Color;
use crate::decode::DecodedImage;

/// Largest edge a surface may have, in pixels.
///
/// Matches the common per-side limit of browser canvases.
pub const MAX_SURFACE_DIMENSION: u32 = 32_767;

/// Errors raised when a surface cannot be allocated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// Width or height is zero.
    #[error("Invalid surface dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Width or height exceeds [`MAX_SURFACE_DIMENSION`].
    #[error("Surface too large: {width}x{height} exceeds {max}px per side")]
    TooLarge { width: u32, height: u32, max: u32 },
}

/// Check requested surface dimensions before allocating.
pub fn validate_dimensions(width: u32, height: u32) -> Result<(), SurfaceError> {
    if width == 0 || height == 0 {
        return Err(SurfaceError::InvalidDimensions { width, height });
    }
    if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
        return Err(SurfaceError::TooLarge {
            width,
            height,
            max: MAX_SURFACE_DIMENSION,
        });
    }
    Ok(())
}

/// An integer rectangle in surface coordinates. May extend past the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x as f64 + self.width as f64 / 2.0,
            self.y as f64 + self.height as f64 / 2.0,
        )
    }
}

/// A block of RGBA pixels read back from a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBlock {
    pub width: u32,
    pub height: u32,
    /// RGBA, row-major, 4 bytes per pixel.
    pub data: Vec<u8>,
}

impl PixelBlock {
    pub fn get(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// A 2-D RGBA drawing surface.
pub trait RasterSurface: Sized {
    /// Allocate a fully transparent surface.
    fn allocate(width: u32, height: u32) -> Result<Self, SurfaceError>;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Paint the whole surface with `color` (source-over).
    fn fill(&mut self, color: Color);

    /// Draw `image` with `transform` mapping image pixel space onto the
    /// surface. Sampling is bilinear, compositing source-over, and anything
    /// landing outside the surface is clipped.
    fn draw_image(&mut self, image: &DecodedImage, transform: &Affine);

    /// Copy out the pixels under `rect`. Parts outside the surface read as
    /// transparent black.
    fn read_pixels(&self, rect: PixelRect) -> PixelBlock;

    /// Overwrite pixels with `block` at `(x, y)`, alpha included.
    fn put_pixels(&mut self, x: i64, y: i64, block: &PixelBlock);

    /// Composite `block` over the existing pixels at `(x, y)`.
    fn blend_pixels(&mut self, x: i64, y: i64, block: &PixelBlock);

    /// Stroke the outline of `rect`, `line_width` pixels wide, inside the rect.
    fn stroke_rect(&mut self, rect: PixelRect, line_width: u32, color: Color);

    /// Copy the current contents into an image.
    fn snapshot(&self) -> DecodedImage;

    /// Draw `image` stretched into `dest`.
    fn draw_image_in_rect(&mut self, image: &DecodedImage, dest: PixelRect) {
        if image.is_empty() {
            return;
        }
        let transform = Affine::scale(
            dest.width as f64 / image.width as f64,
            dest.height as f64 / image.height as f64,
        )
        .then(&Affine::translate(dest.x as f64, dest.y as f64));
        self.draw_image(image, &transform);
    }
}
