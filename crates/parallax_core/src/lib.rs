//! Core data structures for the Parallax tilemap editor
//!
//! This crate holds everything that does not need a window:
//! - `TileCell` - Packed tile index, flip bits and palette selector
//! - `TileGrid` - The fixed 32x32 map and its binary file format
//! - `Brush` - Rectangular tile selections and stamping
//! - `ActionStack` - Bounded undo/redo of whole-grid snapshots
//! - `PaletteSet` - JASC-PAL palettes
//! - `TilesetSheet` - Validated 8x8 tile sheets
//! - `TileRenderer` - The renderer interface, with a CPU implementation
//! - `EditorSession` - Ties the above together into paint strokes
//! - `ShortcutTable` - Keyboard bindings for editor commands

mod brush;
mod cell;
mod grid;
mod history;
mod palette;
mod renderer;
mod session;
mod shortcut;
mod tileset;

pub use brush::{Brush, BrushSource, SelectionDrag, PICKER_COLUMNS, PICKER_ROWS};
pub use cell::{
    TileCell, PALETTE_COUNT, TILESET_INDEX_COUNT, TILE_FLIP_X, TILE_FLIP_Y, TILE_INDEX_MASK,
    TILE_PALETTE_MASK, TILE_PALETTE_SHIFT,
};
pub use grid::{TileGrid, TilemapError, GRID_CELLS, GRID_HEIGHT, GRID_WIDTH, TILEMAP_FILE_SIZE};
pub use history::{Action, ActionStack, DEFAULT_HISTORY_LIMIT};
pub use palette::{
    load_jasc_pal, palette_file_name, parse_jasc_pal, to_palette, Color, Palette, PaletteError,
    PaletteSet, MAX_PALETTE_FILE_COLORS, PALETTE_SIZE,
};
pub use renderer::{
    SoftwareRenderer, TileRenderer, MAP_FRAME_SIZE, PICKER_FRAME_HEIGHT, PICKER_FRAME_WIDTH,
};
pub use session::EditorSession;
pub use shortcut::{EditorCommand, Key, Modifiers, ShortcutTable};
pub use tileset::{
    SheetSlot, TilesetError, TilesetSheet, SHEET_COLUMNS, SHEET_HEIGHT, SHEET_TILES, SHEET_WIDTH,
    TILE_SIZE,
};
