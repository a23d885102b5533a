//! Sheet composition: draw flattened photos into their slots and encode.

use std::future::Future;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::layout::{
    flatten, max_guide_width, plan_sheet, PrintQueueItem, SheetLayout, SlotPlacement,
};
use super::preset::SheetPreset;
use crate::color::Color;
use crate::decode::{load_all, DecodeError, DecodedImage};
use crate::encode::{encode_image_jpeg, encode_surface_jpeg, DEFAULT_JPEG_QUALITY};
use crate::error::Result;
use crate::surface::{Affine, CpuSurface, PixelRect, RasterSurface};

/// Output settings for sheet composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SheetOptions {
    /// JPEG quality (1-100).
    pub quality: u8,
    /// Outline every drawn slot so the prints can be cut apart.
    pub cut_guides: bool,
    pub guide_color: String,
    /// Guide line width in pixels. Narrowed to half the space between
    /// neighbouring slots when wider.
    pub guide_width: u32,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            cut_guides: true,
            guide_color: "#c8c8c8".to_string(),
            guide_width: 2,
        }
    }
}

/// A composed print sheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub preset: SheetPreset,
    pub image: DecodedImage,
    /// Number of photo copies drawn.
    pub placed: usize,
    /// Number of photo copies that did not fit.
    pub skipped: usize,
}

impl Sheet {
    pub fn to_jpeg(&self, quality: u8) -> Result<Vec<u8>> {
        Ok(encode_image_jpeg(&self.image, quality)?)
    }
}

/// Render already-flattened photos onto a fresh page.
///
/// `photos[i]` goes into slot `i`; photos beyond what the page holds are
/// counted in the returned layout's `skipped` and never drawn.
pub fn render_sheet<S: RasterSurface>(
    photos: &[&DecodedImage],
    preset: &SheetPreset,
    options: &SheetOptions,
) -> Result<(S, SheetLayout)> {
    let guide = if options.cut_guides && options.guide_width > 0 {
        Some(Color::parse(&options.guide_color)?)
    } else {
        None
    };

    let layout = plan_sheet(preset, photos.len());
    debug!(
        preset = %preset,
        photos = photos.len(),
        placed = layout.placements.len(),
        skipped = layout.skipped,
        "composing sheet"
    );
    if layout.skipped > 0 {
        warn!(
            preset = %preset,
            capacity = preset.capacity(),
            skipped = layout.skipped,
            "photos did not fit on the sheet"
        );
    }

    let mut page = S::allocate(preset.page_width, preset.page_height)?;
    page.fill(Color::WHITE);

    for placement in &layout.placements {
        draw_slot(&mut page, photos[placement.index], placement);
    }

    // Guides are stroked after all photos, at most half a gutter wide.
    if let Some(color) = guide {
        let width = options.guide_width.min(max_guide_width(preset));
        if width < options.guide_width {
            debug!(
                requested = options.guide_width,
                used = width,
                "cut guide narrowed to fit between slots"
            );
        }
        if width > 0 {
            for placement in &layout.placements {
                page.stroke_rect(outset(placement.rect, width), width, color);
            }
        }
    }

    Ok((page, layout))
}

fn draw_slot<S: RasterSurface>(page: &mut S, photo: &DecodedImage, placement: &SlotPlacement) {
    if !placement.rotated {
        page.draw_image_in_rect(photo, placement.rect);
        return;
    }
    if photo.is_empty() {
        return;
    }

    // Stretch into the swapped box, then turn it upright about the slot center.
    let box_w = placement.rect.height as f64;
    let box_h = placement.rect.width as f64;
    let (cx, cy) = placement.rect.center();
    let transform = Affine::scale(box_w / photo.width as f64, box_h / photo.height as f64)
        .then(&Affine::translate(-box_w / 2.0, -box_h / 2.0))
        .then(&Affine::rotate_degrees(90.0))
        .then(&Affine::translate(cx, cy));
    page.draw_image(photo, &transform);
}

/// Grow `rect` by `by` pixels on every side.
fn outset(rect: PixelRect, by: u32) -> PixelRect {
    let grow = by.saturating_mul(2);
    PixelRect::new(
        rect.x - by as i64,
        rect.y - by as i64,
        rect.width.saturating_add(grow),
        rect.height.saturating_add(grow),
    )
}

/// Lay out and draw a print queue.
///
/// Each item is repeated `copies` times in queue order. Copies that do not
/// fit are left off the sheet; that is reported in [`Sheet::skipped`], not as
/// an error.
pub fn compose_sheet(
    queue: &[PrintQueueItem<DecodedImage>],
    preset: &SheetPreset,
    options: &SheetOptions,
) -> Result<Sheet> {
    let photos = flatten(queue);
    let (surface, layout): (CpuSurface, _) = render_sheet(&photos, preset, options)?;
    Ok(Sheet {
        preset: *preset,
        image: surface.into_image(),
        placed: layout.placements.len(),
        skipped: layout.skipped,
    })
}

/// [`compose_sheet`] followed by JPEG encoding at `options.quality`.
pub fn compose_sheet_jpeg(
    queue: &[PrintQueueItem<DecodedImage>],
    preset: &SheetPreset,
    options: &SheetOptions,
) -> Result<Vec<u8>> {
    let photos = flatten(queue);
    let (surface, _): (CpuSurface, _) = render_sheet(&photos, preset, options)?;
    Ok(encode_surface_jpeg(&surface, options.quality)?)
}

/// Load every queued source concurrently, then compose.
///
/// Each item with at least one copy is loaded once. Results keep queue order
/// regardless of completion order, and the first failed load aborts the
/// composition before anything is drawn.
pub async fn compose_sheet_from_sources<'a, S, F, Fut>(
    queue: &'a [PrintQueueItem<S>],
    preset: &SheetPreset,
    options: &SheetOptions,
    load: F,
) -> Result<Sheet>
where
    F: FnMut(&'a S) -> Fut,
    Fut: Future<Output = std::result::Result<DecodedImage, DecodeError>>,
{
    let wanted: Vec<&'a PrintQueueItem<S>> = queue.iter().filter(|item| item.copies > 0).collect();
    let images = load_all(wanted.iter().copied().map(|item| &item.image), load).await?;

    let loaded: Vec<PrintQueueItem<DecodedImage>> = images
        .into_iter()
        .zip(&wanted)
        .map(|(image, item)| PrintQueueItem::new(image, item.copies))
        .collect();
    compose_sheet(&loaded, preset, options)
}
