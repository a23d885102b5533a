//! In-memory RGBA surface backed by `image::RgbaImage`.
//!
//! # Drawing
//!
//! `draw_image` uses inverse mapping: for each surface pixel covered by the
//! transformed image, the pixel center is mapped back into image space and
//! sampled bilinearly:
//!
//! ```text
//! (src_x, src_y) = inverse(transform) * (dst_x + 0.5, dst_y + 0.5)
//! ```
//!
//! A surface pixel is covered when its mapped center falls inside
//! `0..width x 0..height` of the image. Interpolation is done on
//! premultiplied values so transparent neighbours do not darken edges.

use image::{Rgba, RgbaImage};

use super::{validate_dimensions, Affine, PixelBlock, PixelRect, RasterSurface, SurfaceError};
use crate::color::Color;
use crate::decode::DecodedImage;

/// CPU raster surface.
#[derive(Debug, Clone)]
pub struct CpuSurface {
    buffer: RgbaImage,
}

impl CpuSurface {
    /// Consume the surface and return its pixels as an image.
    pub fn into_image(self) -> DecodedImage {
        DecodedImage::from_rgba_image(self.buffer)
    }

    /// Pixel at (x, y). Panics outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.buffer.get_pixel(x, y).0
    }

    /// Composite a straight-alpha color over the pixel at (x, y).
    fn blend_at(&mut self, x: u32, y: u32, src: [u8; 4]) {
        let dst = self.buffer.get_pixel_mut(x, y);
        dst.0 = source_over(src, dst.0);
    }

    /// Clip `rect` to the surface, returning `(x0, y0, x1, y1)` in surface pixels.
    fn clip(&self, x: i64, y: i64, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + width as i64).min(self.buffer.width() as i64);
        let y1 = (y + height as i64).min(self.buffer.height() as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    fn fill_rect(&mut self, rect: PixelRect, color: [u8; 4]) {
        if let Some((x0, y0, x1, y1)) = self.clip(rect.x, rect.y, rect.width, rect.height) {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.blend_at(x, y, color);
                }
            }
        }
    }
}

impl RasterSurface for CpuSurface {
    fn allocate(width: u32, height: u32) -> Result<Self, SurfaceError> {
        validate_dimensions(width, height)?;
        Ok(Self {
            buffer: RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0])),
        })
    }

    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn fill(&mut self, color: Color) {
        let src = color.to_array();
        if src[3] == 255 {
            for pixel in self.buffer.pixels_mut() {
                pixel.0 = src;
            }
            return;
        }
        for pixel in self.buffer.pixels_mut() {
            pixel.0 = source_over(src, pixel.0);
        }
    }

    fn draw_image(&mut self, image: &DecodedImage, transform: &Affine) {
        if image.is_empty() {
            return;
        }
        let Some(inverse) = transform.invert() else {
            return;
        };

        let (min_x, min_y, max_x, max_y) =
            transform.map_bounds(image.width as f64, image.height as f64);
        let x = min_x.floor() as i64;
        let y = min_y.floor() as i64;
        let width = (max_x.ceil() as i64 - x).max(0) as u32;
        let height = (max_y.ceil() as i64 - y).max(0) as u32;
        let Some((x0, y0, x1, y1)) = self.clip(x, y, width, height) else {
            return;
        };

        let (src_w, src_h) = (image.width as f64, image.height as f64);
        for dst_y in y0..y1 {
            for dst_x in x0..x1 {
                let (sx, sy) = inverse.apply(dst_x as f64 + 0.5, dst_y as f64 + 0.5);
                if sx < 0.0 || sy < 0.0 || sx >= src_w || sy >= src_h {
                    continue;
                }
                let sample = sample_bilinear(image, sx - 0.5, sy - 0.5);
                if sample[3] > 0 {
                    self.blend_at(dst_x, dst_y, sample);
                }
            }
        }
    }

    fn read_pixels(&self, rect: PixelRect) -> PixelBlock {
        let mut data = vec![0u8; rect.width as usize * rect.height as usize * 4];
        if let Some((x0, y0, x1, y1)) = self.clip(rect.x, rect.y, rect.width, rect.height) {
            for y in y0..y1 {
                let row = (y as i64 - rect.y) as usize;
                for x in x0..x1 {
                    let col = (x as i64 - rect.x) as usize;
                    let idx = (row * rect.width as usize + col) * 4;
                    data[idx..idx + 4].copy_from_slice(&self.buffer.get_pixel(x, y).0);
                }
            }
        }
        PixelBlock {
            width: rect.width,
            height: rect.height,
            data,
        }
    }

    fn put_pixels(&mut self, x: i64, y: i64, block: &PixelBlock) {
        if let Some((x0, y0, x1, y1)) = self.clip(x, y, block.width, block.height) {
            for dst_y in y0..y1 {
                for dst_x in x0..x1 {
                    let pixel = block.get((dst_x as i64 - x) as u32, (dst_y as i64 - y) as u32);
                    self.buffer.put_pixel(dst_x, dst_y, Rgba(pixel));
                }
            }
        }
    }

    fn blend_pixels(&mut self, x: i64, y: i64, block: &PixelBlock) {
        if let Some((x0, y0, x1, y1)) = self.clip(x, y, block.width, block.height) {
            for dst_y in y0..y1 {
                for dst_x in x0..x1 {
                    let pixel = block.get((dst_x as i64 - x) as u32, (dst_y as i64 - y) as u32);
                    self.blend_at(dst_x, dst_y, pixel);
                }
            }
        }
    }

    fn stroke_rect(&mut self, rect: PixelRect, line_width: u32, color: Color) {
        if line_width == 0 || rect.width == 0 || rect.height == 0 {
            return;
        }
        let c = color.to_array();
        let lw_x = line_width.min(rect.width);
        let lw_y = line_width.min(rect.height);

        // Top and bottom bands span the full width; side bands fill the rest
        // so corners are painted once.
        self.fill_rect(PixelRect::new(rect.x, rect.y, rect.width, lw_y), c);
        if rect.height > lw_y {
            self.fill_rect(
                PixelRect::new(rect.x, rect.bottom() - lw_y as i64, rect.width, lw_y),
                c,
            );
        }
        let inner_height = rect.height.saturating_sub(lw_y.saturating_mul(2));
        if inner_height > 0 {
            let inner_y = rect.y + lw_y as i64;
            self.fill_rect(PixelRect::new(rect.x, inner_y, lw_x, inner_height), c);
            if rect.width > lw_x {
                self.fill_rect(
                    PixelRect::new(rect.right() - lw_x as i64, inner_y, lw_x, inner_height),
                    c,
                );
            }
        }
    }

    fn snapshot(&self) -> DecodedImage {
        DecodedImage::from_rgba_image(self.buffer.clone())
    }
}

/// Straight-alpha source-over compositing.
fn source_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    match src[3] {
        255 => return src,
        0 => return dst,
        _ => {}
    }
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        out[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    out[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
    out
}

/// Premultiplied RGBA pixel as [f64; 4], clamped to the image edges.
#[inline]
fn get_premultiplied(image: &DecodedImage, px: i64, py: i64) -> [f64; 4] {
    let x = px.clamp(0, image.width as i64 - 1) as usize;
    let y = py.clamp(0, image.height as i64 - 1) as usize;
    let idx = (y * image.width as usize + x) * 4;
    let a = image.pixels[idx + 3] as f64 / 255.0;
    [
        image.pixels[idx] as f64 * a,
        image.pixels[idx + 1] as f64 * a,
        image.pixels[idx + 2] as f64 * a,
        image.pixels[idx + 3] as f64,
    ]
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance. Coordinates address pixel centers.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_premultiplied(image, x0, y0);
    let p10 = get_premultiplied(image, x0 + 1, y0);
    let p01 = get_premultiplied(image, x0, y0 + 1);
    let p11 = get_premultiplied(image, x0 + 1, y0 + 1);

    let mut mixed = [0.0f64; 4];
    for (i, m) in mixed.iter_mut().enumerate() {
        *m = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = mixed[3];
    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }
    let scale = 255.0 / alpha;
    [
        (mixed[0] * scale).clamp(0.0, 255.0).round() as u8,
        (mixed[1] * scale).clamp(0.0, 255.0).round() as u8,
        (mixed[2] * scale).clamp(0.0, 255.0).round() as u8,
        alpha.clamp(0.0, 255.0).round() as u8,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Image where each pixel encodes its own position: R = x, G = y.
    fn coord_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_allocate_is_transparent() {
        let s = CpuSurface::allocate(4, 3).unwrap();
        assert_eq!((s.width(), s.height()), (4, 3));
        assert_eq!(s.pixel(3, 2), [0, 0, 0, 0]);
    }

    #[test]
    fn test_allocate_rejects_zero() {
        assert!(matches!(
            CpuSurface::allocate(0, 3),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_fill_opaque_and_translucent() {
        let mut s = CpuSurface::allocate(2, 2).unwrap();
        s.fill(Color::WHITE);
        assert_eq!(s.pixel(1, 1), [255, 255, 255, 255]);

        s.fill(Color::rgba(0, 0, 0, 128));
        let p = s.pixel(0, 0);
        assert_eq!(p[3], 255);
        assert!((126..=128).contains(&p[0]), "got {p:?}");
    }

    #[test]
    fn test_identity_draw_is_exact() {
        let img = coord_image(8, 6);
        let mut s = CpuSurface::allocate(8, 6).unwrap();
        s.draw_image(&img, &Affine::IDENTITY);
        assert_eq!(s.snapshot(), img);
    }

    #[test]
    fn test_translated_draw_clips() {
        let img = coord_image(4, 4);
        let mut s = CpuSurface::allocate(4, 4).unwrap();
        s.draw_image(&img, &Affine::translate(2.0, -1.0));

        assert_eq!(s.pixel(2, 0), [0, 1, 0, 255]);
        assert_eq!(s.pixel(3, 2), [1, 3, 0, 255]);
        // Left half untouched
        assert_eq!(s.pixel(1, 1), [0, 0, 0, 0]);
        // Row 3 would need source row 4, which does not exist
        assert_eq!(s.pixel(2, 3), [0, 0, 0, 0]);
    }

    #[test]
    fn test_quarter_turn_draw_is_exact() {
        // 3x2 image rotated 90° clockwise into a 2x3 surface
        let img = coord_image(3, 2);
        let transform = Affine::translate(-1.5, -1.0)
            .then(&Affine::rotate_degrees(90.0))
            .then(&Affine::translate(1.0, 1.5));
        let mut s = CpuSurface::allocate(2, 3).unwrap();
        s.draw_image(&img, &transform);

        // Clockwise: the source's bottom-left lands top-left
        assert_eq!(s.pixel(0, 0), [0, 1, 0, 255]);
        assert_eq!(s.pixel(1, 0), [0, 0, 0, 255]);
        assert_eq!(s.pixel(0, 2), [2, 1, 0, 255]);
        assert_eq!(s.pixel(1, 2), [2, 0, 0, 255]);
    }

    #[test]
    fn test_draw_image_in_rect_scales() {
        let img = DecodedImage::filled(2, 2, [9, 9, 9, 255]);
        let mut s = CpuSurface::allocate(10, 10).unwrap();
        s.draw_image_in_rect(&img, PixelRect::new(2, 3, 6, 4));

        assert_eq!(s.pixel(2, 3), [9, 9, 9, 255]);
        assert_eq!(s.pixel(7, 6), [9, 9, 9, 255]);
        assert_eq!(s.pixel(8, 6), [0, 0, 0, 0]);
        assert_eq!(s.pixel(7, 7), [0, 0, 0, 0]);
    }

    #[test]
    fn test_transparent_source_keeps_background() {
        let img = DecodedImage::filled(2, 2, [255, 0, 0, 0]);
        let mut s = CpuSurface::allocate(2, 2).unwrap();
        s.fill(Color::WHITE);
        s.draw_image(&img, &Affine::IDENTITY);
        assert_eq!(s.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_short_pixel_buffer_draws_nothing() {
        let img = DecodedImage {
            width: 3,
            height: 3,
            pixels: vec![255u8; 3 * 3 * 4 - 4],
        };
        let mut s = CpuSurface::allocate(3, 3).unwrap();
        s.draw_image(&img, &Affine::IDENTITY);
        s.draw_image_in_rect(&img, PixelRect::new(0, 0, 3, 3));
        assert!(s.snapshot().pixels.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_read_pixels_outside_is_transparent() {
        let mut s = CpuSurface::allocate(2, 2).unwrap();
        s.fill(Color::WHITE);
        let block = s.read_pixels(PixelRect::new(-1, -1, 3, 3));

        assert_eq!(block.get(0, 0), [0, 0, 0, 0]);
        assert_eq!(block.get(1, 1), [255, 255, 255, 255]);
        assert_eq!(block.get(2, 2), [255, 255, 255, 255]);
    }

    #[test]
    fn test_put_vs_blend_pixels() {
        let block = PixelBlock {
            width: 1,
            height: 1,
            data: vec![0, 0, 0, 0],
        };

        let mut put = CpuSurface::allocate(1, 1).unwrap();
        put.fill(Color::WHITE);
        put.put_pixels(0, 0, &block);
        assert_eq!(put.pixel(0, 0), [0, 0, 0, 0]);

        let mut blend = CpuSurface::allocate(1, 1).unwrap();
        blend.fill(Color::WHITE);
        blend.blend_pixels(0, 0, &block);
        assert_eq!(blend.pixel(0, 0), [255, 255, 255, 255]);
    }

    #[test]
    fn test_stroke_rect_outline_only() {
        let mut s = CpuSurface::allocate(10, 10).unwrap();
        s.stroke_rect(PixelRect::new(1, 1, 8, 8), 2, Color::BLACK);

        assert_eq!(s.pixel(1, 1), [0, 0, 0, 255]);
        assert_eq!(s.pixel(2, 5), [0, 0, 0, 255]);
        assert_eq!(s.pixel(8, 8), [0, 0, 0, 255]);
        assert_eq!(s.pixel(7, 4), [0, 0, 0, 255]);
        // Interior and exterior untouched
        assert_eq!(s.pixel(4, 4), [0, 0, 0, 0]);
        assert_eq!(s.pixel(0, 0), [0, 0, 0, 0]);
        assert_eq!(s.pixel(9, 9), [0, 0, 0, 0]);
    }

    #[test]
    fn test_stroke_rect_huge_line_width() {
        let mut s = CpuSurface::allocate(4, 4).unwrap();
        s.stroke_rect(PixelRect::new(0, 0, u32::MAX, u32::MAX), u32::MAX, Color::BLACK);
        assert_eq!(s.pixel(3, 3), [0, 0, 0, 255]);
    }

    #[test]
    fn test_source_over_half_alpha_on_transparent() {
        assert_eq!(source_over([200, 100, 0, 128], [0, 0, 0, 0]), [200, 100, 0, 128]);
    }
}
