//! Grid placement for print sheets.
//!
//! Pure geometry, no pixels: [`flatten`] expands the print queue into one
//! entry per copy and [`plan_sheet`] assigns each entry a slot rectangle.
//!
//! Slot `i` sits at column `i % columns`, row `i / columns` (row-major).
//! Entries past the grid capacity, and slots that would cross the bottom or
//! right page edge, are skipped rather than clipped.

use serde::{Deserialize, Serialize};

use super::preset::{SheetPreset, Spacing};
use crate::surface::PixelRect;

/// One photo in the print queue with the number of copies wanted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintQueueItem<T> {
    pub image: T,
    pub copies: u32,
}

impl<T> PrintQueueItem<T> {
    pub fn new(image: T, copies: u32) -> Self {
        Self { image, copies }
    }
}

/// Expand a queue into one reference per copy.
///
/// Queue order is kept and the copies of one item are contiguous. An item
/// with zero copies contributes nothing.
pub fn flatten<T>(queue: &[PrintQueueItem<T>]) -> Vec<&T> {
    queue
        .iter()
        .flat_map(|item| std::iter::repeat(&item.image).take(item.copies as usize))
        .collect()
}

/// Where one flattened entry is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotPlacement {
    /// Index into the flattened sequence.
    pub index: usize,
    pub column: u32,
    pub row: u32,
    /// Slot rectangle on the page.
    pub rect: PixelRect,
    /// Whether the photo is turned 90° inside the slot.
    pub rotated: bool,
}

/// Placement plan for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    pub placements: Vec<SlotPlacement>,
    /// Flattened entries that got no slot.
    pub skipped: usize,
}

/// Empty space around the grid, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Margins {
    pub left: i64,
    pub right: i64,
    pub top: i64,
    pub bottom: i64,
}

/// Offsets of each slot along one axis.
fn axis_offsets(page: u32, count: u32, slot: u32, spacing: Spacing) -> Vec<i64> {
    match spacing {
        Spacing::Gap(gap) => {
            let total = count as i64 * slot as i64 + (count as i64 - 1).max(0) * gap as i64;
            let start = (page as i64 - total).div_euclid(2);
            (0..count as i64)
                .map(|i| start + i * (slot as i64 + gap as i64))
                .collect()
        }
        Spacing::Even => {
            let space = (page as f64 - count as f64 * slot as f64) / (count as f64 + 1.0);
            (0..count)
                .map(|i| (space + i as f64 * (slot as f64 + space)).round() as i64)
                .collect()
        }
    }
}

/// Assign slots to the first `count` flattened entries.
pub fn plan_sheet(preset: &SheetPreset, count: usize) -> SheetLayout {
    let xs = axis_offsets(
        preset.page_width,
        preset.columns,
        preset.slot_width,
        preset.spacing,
    );
    let ys = axis_offsets(
        preset.page_height,
        preset.rows,
        preset.slot_height,
        preset.spacing,
    );

    let mut placements = Vec::with_capacity(count.min(preset.capacity()));
    for index in 0..count.min(preset.capacity()) {
        let column = (index % preset.columns as usize) as u32;
        let row = (index / preset.columns as usize) as u32;
        let rect = PixelRect::new(
            xs[column as usize],
            ys[row as usize],
            preset.slot_width,
            preset.slot_height,
        );

        if rect.bottom() > preset.page_height as i64 || rect.right() > preset.page_width as i64 {
            continue;
        }

        placements.push(SlotPlacement {
            index,
            column,
            row,
            rect,
            rotated: preset.rotate_slot,
        });
    }

    SheetLayout {
        skipped: count - placements.len(),
        placements,
    }
}

/// Slot placements for the first `count` flattened entries.
pub fn layout_slots(preset: &SheetPreset, count: usize) -> Vec<SlotPlacement> {
    plan_sheet(preset, count).placements
}

/// Widest cut guide that stays out of every neighbouring slot: half the
/// narrowest space between adjacent slots. An axis with a single slot only
/// limits the guide to the page size.
pub fn max_guide_width(preset: &SheetPreset) -> u32 {
    let axis_limit = |page: u32, count: u32, slot: u32| -> u32 {
        let offsets = axis_offsets(page, count, slot, preset.spacing);
        offsets
            .windows(2)
            .map(|pair| (pair[1] - pair[0] - slot as i64).max(0) / 2)
            .min()
            .map_or(page, |half_gap| half_gap.min(page as i64) as u32)
    };

    axis_limit(preset.page_width, preset.columns, preset.slot_width).min(axis_limit(
        preset.page_height,
        preset.rows,
        preset.slot_height,
    ))
}

/// Margins of a fully populated grid.
pub fn grid_margins(preset: &SheetPreset) -> Margins {
    let xs = axis_offsets(
        preset.page_width,
        preset.columns,
        preset.slot_width,
        preset.spacing,
    );
    let ys = axis_offsets(
        preset.page_height,
        preset.rows,
        preset.slot_height,
        preset.spacing,
    );
    let first_x = xs.first().copied().unwrap_or(0);
    let last_x = xs.last().copied().unwrap_or(0) + preset.slot_width as i64;
    let first_y = ys.first().copied().unwrap_or(0);
    let last_y = ys.last().copied().unwrap_or(0) + preset.slot_height as i64;

    Margins {
        left: first_x,
        right: preset.page_width as i64 - last_x,
        top: first_y,
        bottom: preset.page_height as i64 - last_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TALL: SheetPreset = SheetPreset {
        id: "tall",
        page_width: 100,
        page_height: 100,
        columns: 1,
        rows: 3,
        slot_width: 40,
        slot_height: 40,
        spacing: Spacing::Gap(10),
        rotate_slot: false,
    };

    #[test]
    fn test_flatten_preserves_order_and_counts() {
        let queue = vec![PrintQueueItem::new('A', 2), PrintQueueItem::new('B', 1)];
        assert_eq!(flatten(&queue), vec![&'A', &'A', &'B']);
    }

    #[test]
    fn test_flatten_keeps_copies_contiguous() {
        let queue = vec![
            PrintQueueItem::new(1, 3),
            PrintQueueItem::new(2, 0),
            PrintQueueItem::new(3, 2),
        ];
        assert_eq!(flatten(&queue), vec![&1, &1, &1, &3, &3]);
    }

    #[test]
    fn test_flatten_empty() {
        let queue: Vec<PrintQueueItem<u8>> = Vec::new();
        assert!(flatten(&queue).is_empty());
    }

    #[test]
    fn test_six_by_four_positions() {
        let layout = plan_sheet(&SheetPreset::SIX_BY_FOUR, 8);
        assert_eq!(layout.skipped, 0);

        let xs: Vec<i64> = layout.placements[..4].iter().map(|p| p.rect.x).collect();
        assert_eq!(xs, vec![44, 477, 910, 1343]);
        assert_eq!(layout.placements[0].rect.y, 59);
        assert_eq!(layout.placements[4].rect.y, 610);
        assert_eq!((layout.placements[5].column, layout.placements[5].row), (1, 1));
    }

    #[test]
    fn test_a4_has_thirty_slots() {
        let layout = plan_sheet(&SheetPreset::A4, 30);
        assert_eq!(layout.placements.len(), 30);
        assert_eq!(layout.skipped, 0);

        let last = layout.placements.last().unwrap();
        assert_eq!((last.column, last.row), (4, 5));
        assert_eq!(last.rect.bottom(), 3462);
    }

    #[test]
    fn test_overflow_is_skipped_not_an_error() {
        let layout = plan_sheet(&SheetPreset::SIX_BY_FOUR, 11);
        assert_eq!(layout.placements.len(), 8);
        assert_eq!(layout.skipped, 3);

        let layout = plan_sheet(&SheetPreset::A4, 45);
        assert_eq!(layout.placements.len(), 30);
        assert_eq!(layout.skipped, 15);
    }

    #[test]
    fn test_partial_sheet_fills_row_major() {
        let cells: Vec<(u32, u32)> = layout_slots(&SheetPreset::SIX_BY_FOUR, 5)
            .iter()
            .map(|p| (p.column, p.row))
            .collect();
        assert_eq!(cells, vec![(0, 0), (1, 0), (2, 0), (3, 0), (0, 1)]);
    }

    #[test]
    fn test_slot_past_bottom_edge_is_skipped() {
        // Grid is 140px tall on a 100px page: rows start at -20, 30, 80
        let layout = plan_sheet(&TALL, 3);
        let indices: Vec<usize> = layout.placements.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(layout.skipped, 1);
    }

    #[test]
    fn test_margins_symmetric_for_presets() {
        for preset in SheetPreset::ALL {
            let m = grid_margins(&preset);
            assert!((m.left - m.right).abs() <= 1, "{preset}: {m:?}");
            assert!((m.top - m.bottom).abs() <= 1, "{preset}: {m:?}");
            assert!(m.left >= 0 && m.top >= 0, "{preset}: {m:?}");
        }
    }

    #[test]
    fn test_max_guide_width() {
        // 20px gap on both axes
        assert_eq!(max_guide_width(&SheetPreset::SIX_BY_FOUR), 10);
        // Rows are 46px apart, columns 69-70px
        assert_eq!(max_guide_width(&SheetPreset::A4), 23);

        let single = SheetPreset {
            columns: 1,
            rows: 1,
            ..TALL
        };
        assert_eq!(max_guide_width(&single), 100);
        // Overlapping rows leave no room at all
        assert_eq!(
            max_guide_width(&SheetPreset {
                spacing: Spacing::Gap(0),
                ..TALL
            }),
            0
        );
    }

    #[test]
    fn test_even_spacing_offsets() {
        // (100 - 2 * 20) / 3 = 20
        assert_eq!(axis_offsets(100, 2, 20, Spacing::Even), vec![20, 60]);
    }

    #[test]
    fn test_gap_spacing_offsets() {
        // total = 2 * 20 + 10 = 50, start = 25
        assert_eq!(axis_offsets(100, 2, 20, Spacing::Gap(10)), vec![25, 55]);
    }

    #[test]
    fn test_rotated_flag_propagates() {
        let preset = SheetPreset {
            rotate_slot: true,
            ..SheetPreset::SIX_BY_FOUR
        };
        assert!(plan_sheet(&preset, 2).placements.iter().all(|p| p.rotated));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
