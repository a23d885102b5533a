//! Print sheet layout and composition.
//!
//! A print queue of processed photos, each with a copy count, is flattened,
//! placed on a fixed grid described by a [`SheetPreset`] and drawn onto a
//! white page.

mod compose;
mod layout;
mod preset;

pub use compose::{
    compose_sheet, compose_sheet_from_sources, compose_sheet_jpeg, render_sheet, Sheet,
    SheetOptions,
};
pub use layout::{
    flatten, grid_margins, layout_slots, max_guide_width, plan_sheet, Margins, PrintQueueItem,
    SheetLayout, SlotPlacement,
};
pub use preset::{SheetPreset, Spacing, PRINT_DPI};
