//! Solid fill colors.
//!
//! Background colors reach the engine as strings from the UI layer, in the
//! same notations a 2-D canvas `fillStyle` accepts for solid colors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error parsing a color string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color: {0:?}")]
    Invalid(String),
}

/// An RGBA color with 8-bit channels (straight, not premultiplied alpha).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Create an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Parse a color string.
    ///
    /// Accepted forms: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`,
    /// `rgb(r, g, b)`, `rgba(r, g, b, a)` with `a` in 0.0..=1.0, and the
    /// names `white`, `black`, `transparent`, `red`, `green`, `blue`,
    /// `gray`/`grey`. Surrounding whitespace and case are ignored.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::Invalid(input.to_string());
        let s = input.trim().to_ascii_lowercase();

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }
        if let Some(args) = s
            .strip_prefix("rgba(")
            .or_else(|| s.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_functional(args).ok_or_else(invalid);
        }

        match s.as_str() {
            "white" => Ok(Color::WHITE),
            "black" => Ok(Color::BLACK),
            "transparent" => Ok(Color::TRANSPARENT),
            "red" => Ok(Color::rgb(255, 0, 0)),
            // CSS "green" is half intensity
            "green" => Ok(Color::rgb(0, 128, 0)),
            "blue" => Ok(Color::rgb(0, 0, 255)),
            "gray" | "grey" => Ok(Color::rgb(128, 128, 128)),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

    match hex.len() {
        3 => Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(Color::rgba(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_functional(args: &str) -> Option<Color> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<u8>().ok();

    match parts.as_slice() {
        [r, g, b] => Some(Color::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f64>().ok().filter(|a| (0.0..=1.0).contains(a))?;
            Some(Color::rgba(
                channel(r)?,
                channel(g)?,
                channel(b)?,
                (alpha * 255.0).round() as u8,
            ))
        }
        _ => None,
    }
}
