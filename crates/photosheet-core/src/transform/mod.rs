//! Geometric transforms: rotation bounds and rotation-aware cropping.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise on screen
//! - Crop rectangles are integer pixels in the rotated image's bounding box
//! - Origin is top-left corner, y grows downwards

mod crop;
mod rotation;

pub use crop::{crop_image, crop_to_image, render_crop, CropOptions, PixelCrop};
pub use rotation::{compute_rotated_bounds, rotated_bounds, rotation_about_center, BoundingBox};
