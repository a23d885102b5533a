//! Rotation geometry.
//!
//! Pure math: the axis-aligned bounding box of a rotated rectangle, and the
//! transform that rotates an image about its center inside that box.
//!
//! For a `w x h` rectangle rotated by θ:
//! ```text
//! w' = |cos θ| * w + |sin θ| * h
//! h' = |sin θ| * w + |cos θ| * h
//! ```

use crate::surface::{quarter_turns, Affine};

/// Size of an axis-aligned bounding box, in (possibly fractional) pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
}

/// Exact bounding box of a `width x height` rectangle rotated by `angle_degrees`.
///
/// The angle may be any real number; the result is periodic in 360°
/// and symmetric in sign.
pub fn rotated_bounds(width: f64, height: f64, angle_degrees: f64) -> BoundingBox {
    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    BoundingBox {
        width: width * cos + height * sin,
        height: width * sin + height * cos,
    }
}

/// Compute the pixel dimensions of the bounding box for a rotated image.
///
/// When an image is rotated, the corners extend beyond the original bounds.
/// This function calculates the minimum surface that contains the
/// entire rotated image.
///
/// # Returns
///
/// Tuple of (new_width, new_height). Multiples of 90° are exact; other
/// angles are rounded and never collapse to zero.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    // Must snap exactly like `Affine::rotate_degrees`.
    match quarter_turns(angle_degrees) {
        Some(0 | 2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }

    let bounds = rotated_bounds(width as f64, height as f64, angle_degrees);
    let new_w = bounds.width.round() as u32;
    let new_h = bounds.height.round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Transform that rotates a `src_width x src_height` image about its center
/// and centers it in a `box_width x box_height` surface.
///
/// Positive angles turn clockwise on screen.
pub fn rotation_about_center(
    src_width: u32,
    src_height: u32,
    box_width: u32,
    box_height: u32,
    angle_degrees: f64,
) -> Affine {
    Affine::translate(-(src_width as f64) / 2.0, -(src_height as f64) / 2.0)
        .then(&Affine::rotate_degrees(angle_degrees))
        .then(&Affine::translate(
            box_width as f64 / 2.0,
            box_height as f64 / 2.0,
        ))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
