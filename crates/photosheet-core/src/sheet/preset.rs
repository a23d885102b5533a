//! Sheet presets.
//!
//! All dimensions are pixels at 300 DPI. Slots are 413x531, a 35x45 mm
//! photo at that resolution.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::Error;

/// Print resolution every preset is expressed in.
pub const PRINT_DPI: u32 = 300;

/// How free space between slots is distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "px", rename_all = "lowercase")]
pub enum Spacing {
    /// Fixed gap between neighbouring slots; the whole grid is centered.
    Gap(u32),
    /// Equal space before, between and after slots on each axis:
    /// `space = (page - n * slot) / (n + 1)`.
    Even,
}

/// A named, fixed page / grid / slot combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetPreset {
    pub id: &'static str,
    pub page_width: u32,
    pub page_height: u32,
    pub columns: u32,
    pub rows: u32,
    pub slot_width: u32,
    pub slot_height: u32,
    pub spacing: Spacing,
    /// Draw each copy turned 90° clockwise inside its slot.
    pub rotate_slot: bool,
}

impl SheetPreset {
    /// 6x4 inch landscape photo paper, upright 4x2 grid.
    pub const SIX_BY_FOUR: SheetPreset = SheetPreset {
        id: "6x4",
        page_width: 1800,
        page_height: 1200,
        columns: 4,
        rows: 2,
        slot_width: 413,
        slot_height: 531,
        spacing: Spacing::Gap(20),
        rotate_slot: false,
    };

    /// A4 portrait, 5x6 grid with symmetric margins.
    pub const A4: SheetPreset = SheetPreset {
        id: "A4",
        page_width: 2480,
        page_height: 3508,
        columns: 5,
        rows: 6,
        slot_width: 413,
        slot_height: 531,
        spacing: Spacing::Even,
        rotate_slot: false,
    };

    pub const ALL: [SheetPreset; 2] = [SheetPreset::SIX_BY_FOUR, SheetPreset::A4];

    /// Look up a preset by identifier. Case-insensitive; `4x6` is accepted
    /// as another spelling of `6x4`.
    pub fn from_id(id: &str) -> Result<SheetPreset, Error> {
        match id.trim().to_ascii_lowercase().as_str() {
            "6x4" | "4x6" => Ok(SheetPreset::SIX_BY_FOUR),
            "a4" => Ok(SheetPreset::A4),
            _ => Err(Error::UnknownPreset(id.to_string())),
        }
    }

    /// Number of slots on one sheet.
    pub fn capacity(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// Page size in millimetres, for print dialogs.
    pub fn page_size_mm(&self) -> (f64, f64) {
        let to_mm = |px: u32| px as f64 / PRINT_DPI as f64 * 25.4;
        (to_mm(self.page_width), to_mm(self.page_height))
    }
}

impl FromStr for SheetPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SheetPreset::from_id(s)
    }
}

impl fmt::Display for SheetPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(SheetPreset::from_id("6x4").unwrap(), SheetPreset::SIX_BY_FOUR);
        assert_eq!(SheetPreset::from_id("4X6").unwrap(), SheetPreset::SIX_BY_FOUR);
        assert_eq!("a4".parse::<SheetPreset>().unwrap(), SheetPreset::A4);
    }

    #[test]
    fn test_unknown_id() {
        assert!(matches!(
            SheetPreset::from_id("letter"),
            Err(Error::UnknownPreset(id)) if id == "letter"
        ));
    }

    #[test]
    fn test_capacities() {
        assert_eq!(SheetPreset::SIX_BY_FOUR.capacity(), 8);
        assert_eq!(SheetPreset::A4.capacity(), 30);
    }

    #[test]
    fn test_presets_fit_their_pages() {
        for preset in SheetPreset::ALL {
            assert!(preset.columns * preset.slot_width <= preset.page_width, "{preset}");
            assert!(preset.rows * preset.slot_height <= preset.page_height, "{preset}");
        }
    }

    #[test]
    fn test_page_size_mm() {
        let (w, h) = SheetPreset::A4.page_size_mm();
        assert!((w - 210.0).abs() < 0.1, "{w}");
        assert!((h - 297.0).abs() < 0.1, "{h}");

        let (w, h) = SheetPreset::SIX_BY_FOUR.page_size_mm();
        assert!((w - 152.4).abs() < 0.01 && (h - 101.6).abs() < 0.01);
    }
}
