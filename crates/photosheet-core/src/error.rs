//! Crate-level error type.
//!
//! Each stage keeps its own error enum; operations that span stages (crop,
//! compose) surface them through [`Error`] so callers can match on the stage
//! that failed.

use thiserror::Error;

use crate::color::ColorError;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::surface::SurfaceError;

#[derive(Debug, Error)]
pub enum Error {
    /// A source image could not be loaded or decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A drawing surface could not be allocated.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// The final image could not be serialized.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Color(#[from] ColorError),

    #[error("Unknown sheet preset: {0:?}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, Error>;
