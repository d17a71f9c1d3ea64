// Procedural drawing of the block tile sheet.
//
// Tiles are stacked vertically. Insets are fixed pixel offsets from the tile
// edge and do not scale with the tile size: the hardware side expects the exact
// layout produced for 20x20 tiles.
use crate::{
    common::{Bitmap, ColorRGB, BLACK, WHITE},
    config::TileSheetConfig,
    helpers::darken,
};

const CORE_SHADE: u8 = 5;
const GRID_SHADE: u8 = 2;
const CROSS_INSET: u32 = 2;
const INNER_RECT_INSET: u32 = 5;

pub fn render_tile_sheet(config: &TileSheetConfig) -> Bitmap {
    let mut sheet = Bitmap::new(config.sheet_width(), config.sheet_height(), BLACK);
    // Slot 0 is the empty cell and stays black.
    for (slot, &color) in config
        .palette
        .iter()
        .enumerate()
        .take(config.num_tiles.saturating_sub(1) as usize)
    {
        let top = (slot as u32 + 1) * config.tile_size;
        draw_tile(&mut sheet, top, config.tile_size, color);
    }
    sheet
}

fn draw_tile(sheet: &mut Bitmap, top: u32, size: u32, color: ColorRGB) {
    let dark_core = darken(color, CORE_SHADE);
    let mid_grid = darken(color, GRID_SHADE);
    let Some(last) = size.checked_sub(1) else {
        return;
    };

    // Rectangle inset by `d` on every side, in sheet coordinates.
    let inset = |d: u32| (last >= 2 * d).then(|| (d, top + d, last - d, top + last - d));

    if let Some((x0, y0, x1, y1)) = inset(1) {
        sheet.fill_rect(x0, y0, x1, y1, dark_core);
    }

    // Cross through the center.
    if last >= 2 * CROSS_INSET + 1 {
        let center = size / 2;
        sheet.vline(center, top + CROSS_INSET, top + last - CROSS_INSET, mid_grid);
        sheet.hline(CROSS_INSET, last - CROSS_INSET, top + center, mid_grid);
    }
    if let Some((x0, y0, x1, y1)) = inset(INNER_RECT_INSET) {
        sheet.outline_rect(x0, y0, x1, y1, mid_grid);
    }

    // Bright rim with a softer ring just inside it.
    sheet.outline_rect(0, top, last, top + last, color);
    if let Some((x0, y0, x1, y1)) = inset(1) {
        sheet.outline_rect(x0, y0, x1, y1, mid_grid);
    }

    for (x, y) in [(0, top), (last, top), (0, top + last), (last, top + last)] {
        sheet.put(x, y, WHITE);
    }
}
