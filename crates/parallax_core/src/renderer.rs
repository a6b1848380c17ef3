//! Renderer interface and a CPU implementation
//!
//! The editor only talks to a [`TileRenderer`]; [`SoftwareRenderer`] composes
//! RGBA frames that the UI layer uploads as textures.

use crate::grid::GRID_WIDTH;
use crate::palette::{Palette, PaletteSet};
use crate::tileset::{SheetSlot, TilesetSheet, SHEET_HEIGHT, SHEET_WIDTH, TILE_SIZE};
use crate::{TileGrid, PALETTE_COUNT};

/// Map frame edge length in pixels
pub const MAP_FRAME_SIZE: u32 = GRID_WIDTH as u32 * TILE_SIZE;
/// Picker frame width in pixels
pub const PICKER_FRAME_WIDTH: u32 = SHEET_WIDTH;
/// Picker frame height in pixels (primary sheet above secondary)
pub const PICKER_FRAME_HEIGHT: u32 = SHEET_HEIGHT * 2;

const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

/// Everything the editor needs from a tile renderer
pub trait TileRenderer {
    /// Reset all GPU/CPU resources to their initial state
    fn init(&mut self);
    fn load_primary(&mut self, sheet: &TilesetSheet);
    fn load_secondary(&mut self, sheet: &TilesetSheet);
    /// Replace palette slot `index` (0-15)
    fn load_palette(&mut self, index: u8, palette: &Palette);
    /// Palette used to draw the tileset picker
    fn select_active_palette(&mut self, index: u8);
    /// Draw the map using each cell's own palette and flip bits
    fn render(&mut self, grid: &TileGrid);
}

/// CPU renderer producing RGBA8 frames
#[derive(Debug, Clone)]
pub struct SoftwareRenderer {
    primary: Option<TilesetSheet>,
    secondary: Option<TilesetSheet>,
    palettes: PaletteSet,
    active_palette: u8,
    map_frame: Vec<u8>,
    picker_frame: Vec<u8>,
    map_version: u64,
    picker_version: u64,
}

impl Default for SoftwareRenderer {
    fn default() -> Self {
        let mut renderer = Self {
            primary: None,
            secondary: None,
            palettes: PaletteSet::default(),
            active_palette: 0,
            map_frame: Vec::new(),
            picker_frame: Vec::new(),
            map_version: 0,
            picker_version: 0,
        };
        renderer.init();
        renderer
    }
}

impl SoftwareRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// RGBA pixels of the last rendered map, `MAP_FRAME_SIZE` square
    pub fn map_frame(&self) -> &[u8] {
        &self.map_frame
    }

    /// RGBA pixels of the tileset picker drawn with the active palette
    pub fn picker_frame(&self) -> &[u8] {
        &self.picker_frame
    }

    /// Incremented on every map render
    pub fn map_version(&self) -> u64 {
        self.map_version
    }

    /// Incremented whenever the picker frame is redrawn
    pub fn picker_version(&self) -> u64 {
        self.picker_version
    }

    pub fn active_palette(&self) -> u8 {
        self.active_palette
    }

    pub fn palettes(&self) -> &PaletteSet {
        &self.palettes
    }

    pub fn has_sheet(&self, slot: SheetSlot) -> bool {
        match slot {
            SheetSlot::Primary => self.primary.is_some(),
            SheetSlot::Secondary => self.secondary.is_some(),
        }
    }

    /// Load all sixteen palettes at once
    pub fn load_palette_set(&mut self, set: &PaletteSet) {
        self.palettes = set.clone();
        self.redraw_picker();
    }

    /// RGBA colour of one pixel of tile `tileset_index`, or transparent if its sheet is missing
    fn tile_rgba(&self, tileset_index: u16, px: u32, py: u32, palette: &Palette) -> [u8; 4] {
        let (slot, local) = SheetSlot::locate(tileset_index);
        let sheet = match slot {
            SheetSlot::Primary => self.primary.as_ref(),
            SheetSlot::Secondary => self.secondary.as_ref(),
        };
        match sheet {
            Some(sheet) => palette[usize::from(sheet.tile_pixel(local, px, py))].to_rgba(),
            None => TRANSPARENT,
        }
    }

    fn redraw_picker(&mut self) {
        let palette = *self.palettes.get(self.active_palette);
        let columns = PICKER_FRAME_WIDTH / TILE_SIZE;
        let mut frame = vec![0u8; (PICKER_FRAME_WIDTH * PICKER_FRAME_HEIGHT * 4) as usize];

        for y in 0..PICKER_FRAME_HEIGHT {
            for x in 0..PICKER_FRAME_WIDTH {
                let tile = ((y / TILE_SIZE) * columns + x / TILE_SIZE) as u16;
                let rgba = self.tile_rgba(tile, x % TILE_SIZE, y % TILE_SIZE, &palette);
                let offset = ((y * PICKER_FRAME_WIDTH + x) * 4) as usize;
                frame[offset..offset + 4].copy_from_slice(&rgba);
            }
        }

        self.picker_frame = frame;
        self.picker_version += 1;
    }
}

impl TileRenderer for SoftwareRenderer {
    fn init(&mut self) {
        self.primary = None;
        self.secondary = None;
        self.palettes = PaletteSet::default();
        self.active_palette = 0;
        self.map_frame = vec![0u8; (MAP_FRAME_SIZE * MAP_FRAME_SIZE * 4) as usize];
        self.redraw_picker();
    }

    fn load_primary(&mut self, sheet: &TilesetSheet) {
        self.primary = Some(sheet.clone());
        self.redraw_picker();
    }

    fn load_secondary(&mut self, sheet: &TilesetSheet) {
        self.secondary = Some(sheet.clone());
        self.redraw_picker();
    }

    fn load_palette(&mut self, index: u8, palette: &Palette) {
        self.palettes.set(index, *palette);
        if index == self.active_palette {
            self.redraw_picker();
        }
    }

    fn select_active_palette(&mut self, index: u8) {
        let index = index.min(PALETTE_COUNT - 1);
        if index != self.active_palette {
            self.active_palette = index;
            self.redraw_picker();
        }
    }

    fn render(&mut self, grid: &TileGrid) {
        let mut frame = std::mem::take(&mut self.map_frame);
        frame.resize((MAP_FRAME_SIZE * MAP_FRAME_SIZE * 4) as usize, 0);

        for (i, cell) in grid.cells().iter().enumerate() {
            let tile_x = (i % GRID_WIDTH) as u32;
            let tile_y = (i / GRID_WIDTH) as u32;
            let palette = *self.palettes.get(cell.palette());

            for py in 0..TILE_SIZE {
                for px in 0..TILE_SIZE {
                    let sx = if cell.flip_x() { TILE_SIZE - 1 - px } else { px };
                    let sy = if cell.flip_y() { TILE_SIZE - 1 - py } else { py };
                    let rgba = self.tile_rgba(cell.tileset_index(), sx, sy, &palette);

                    let x = tile_x * TILE_SIZE + px;
                    let y = tile_y * TILE_SIZE + py;
                    let offset = ((y * MAP_FRAME_SIZE + x) * 4) as usize;
                    frame[offset..offset + 4].copy_from_slice(&rgba);
                }
            }
        }

        self.map_frame = frame;
        self.map_version += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Color;
    use crate::TileCell;
    use image::{DynamicImage, GrayImage, Luma};

    /// Sheet whose tile 0 has colour index 1 at its top-left pixel and 2 elsewhere
    fn test_sheet() -> TilesetSheet {
        let mut image = GrayImage::from_pixel(SHEET_WIDTH, SHEET_HEIGHT, Luma([2]));
        image.put_pixel(0, 0, Luma([1]));
        TilesetSheet::from_image(&DynamicImage::ImageLuma8(image)).unwrap()
    }

    fn pixel(frame: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let offset = ((y * width + x) * 4) as usize;
        [frame[offset], frame[offset + 1], frame[offset + 2], frame[offset + 3]]
    }

    fn two_color_palette() -> Palette {
        let mut palette = [Color::BLACK; 16];
        palette[1] = Color::new(255, 0, 0);
        palette[2] = Color::new(0, 0, 255);
        palette
    }

    #[test]
    fn test_frame_sizes() {
        let renderer = SoftwareRenderer::new();
        assert_eq!(renderer.map_frame().len(), 256 * 256 * 4);
        assert_eq!(renderer.picker_frame().len(), 128 * 512 * 4);
    }

    #[test]
    fn test_render_applies_cell_palette_and_flip() {
        let mut renderer = SoftwareRenderer::new();
        renderer.load_primary(&test_sheet());
        renderer.load_palette(5, &two_color_palette());

        let mut grid = TileGrid::default();
        grid.set(1, 0, TileCell::new(0, true, false, 5));
        renderer.render(&grid);

        let frame = renderer.map_frame();
        // Flipped horizontally: the marked pixel moves to the top-right of the tile
        assert_eq!(pixel(frame, MAP_FRAME_SIZE, 8 + 7, 0), [255, 0, 0, 255]);
        assert_eq!(pixel(frame, MAP_FRAME_SIZE, 8, 0), [0, 0, 255, 255]);
    }

    #[test]
    fn test_missing_sheet_is_transparent() {
        let mut renderer = SoftwareRenderer::new();
        renderer.load_primary(&test_sheet());
        let mut grid = TileGrid::default();
        grid.set(0, 0, TileCell::new(600, false, false, 0));
        renderer.render(&grid);
        assert_eq!(pixel(renderer.map_frame(), MAP_FRAME_SIZE, 0, 0), [0, 0, 0, 0]);
    }

    #[test]
    fn test_picker_follows_active_palette() {
        let mut renderer = SoftwareRenderer::new();
        renderer.load_primary(&test_sheet());
        renderer.load_palette(3, &two_color_palette());
        let version = renderer.picker_version();

        renderer.select_active_palette(3);
        assert!(renderer.picker_version() > version);
        assert_eq!(pixel(renderer.picker_frame(), PICKER_FRAME_WIDTH, 0, 0), [255, 0, 0, 255]);
        // Secondary half is not loaded
        assert_eq!(
            pixel(renderer.picker_frame(), PICKER_FRAME_WIDTH, 0, SHEET_HEIGHT),
            [0, 0, 0, 0]
        );
    }
}
