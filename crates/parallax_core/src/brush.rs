//! Brush state and rectangular selection capture
//!
//! A drag over either the tileset picker or the map produces a new [`Brush`].
//! Selection rectangles only grow right and down from the anchor cell; a drag
//! toward negative offsets collapses to a single cell.

use crate::grid::{GRID_HEIGHT, GRID_WIDTH};
use crate::{TileCell, TileGrid, PALETTE_COUNT};

/// Tiles per row in the tileset picker
pub const PICKER_COLUMNS: usize = 16;
/// Rows in the tileset picker (both sheets stacked)
pub const PICKER_ROWS: usize = 64;

/// Where a selection drag started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushSource {
    /// The tileset picker; cells are synthesized from picker positions
    Tileset,
    /// The live map; cells are copied verbatim
    Map,
}

impl BrushSource {
    /// Width and height of the source in cells
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            BrushSource::Tileset => (PICKER_COLUMNS, PICKER_ROWS),
            BrushSource::Map => (GRID_WIDTH, GRID_HEIGHT),
        }
    }
}

/// In-progress selection rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionDrag {
    pub source: BrushSource,
    pub anchor_x: usize,
    pub anchor_y: usize,
    pub width: usize,
    pub height: usize,
}

/// The block of tiles currently available for painting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    selection: Vec<TileCell>,
    width: usize,
    height: usize,
    from_tileset: bool,
    palette: u8,
    xflip: bool,
    yflip: bool,
    drag: Option<SelectionDrag>,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            selection: vec![TileCell::EMPTY],
            width: 1,
            height: 1,
            from_tileset: true,
            palette: 0,
            xflip: false,
            yflip: false,
            drag: None,
        }
    }
}

impl Brush {
    /// Build a brush directly from a row-major block of cells.
    /// Returns `None` when the dimensions are zero or do not match the cell count.
    pub fn from_cells(
        selection: Vec<TileCell>,
        width: usize,
        height: usize,
        from_tileset: bool,
    ) -> Option<Self> {
        if width == 0 || height == 0 || selection.len() != width * height {
            return None;
        }
        Some(Self {
            selection,
            width,
            height,
            from_tileset,
            ..Self::default()
        })
    }

    pub fn selection(&self) -> &[TileCell] {
        &self.selection
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn from_tileset(&self) -> bool {
        self.from_tileset
    }

    pub fn palette(&self) -> u8 {
        self.palette
    }

    pub fn xflip(&self) -> bool {
        self.xflip
    }

    pub fn yflip(&self) -> bool {
        self.yflip
    }

    /// Tileset index of the top-left selected cell
    pub fn first_tile_index(&self) -> u16 {
        self.selection
            .first()
            .map(|cell| cell.tileset_index())
            .unwrap_or(0)
    }

    /// Select the active palette, clamped to 0-15
    pub fn set_palette(&mut self, palette: u8) {
        self.palette = palette.min(PALETTE_COUNT - 1);
        self.restamp_tileset_selection();
    }

    pub fn set_xflip(&mut self, xflip: bool) {
        self.xflip = xflip;
        self.restamp_tileset_selection();
    }

    pub fn set_yflip(&mut self, yflip: bool) {
        self.yflip = yflip;
        self.restamp_tileset_selection();
    }

    /// Current drag rectangle, if a selection drag is in progress
    pub fn drag(&self) -> Option<&SelectionDrag> {
        self.drag.as_ref()
    }

    /// Start a selection drag at `origin`, a linear cell index in the source's layout
    pub fn begin_drag(&mut self, origin: usize, source: BrushSource) {
        let (columns, rows) = source.dimensions();
        let origin = origin.min(columns * rows - 1);
        self.drag = Some(SelectionDrag {
            source,
            anchor_x: origin % columns,
            anchor_y: origin / columns,
            width: 1,
            height: 1,
        });
        self.from_tileset = source == BrushSource::Tileset;
    }

    /// Grow the drag rectangle from a pointer offset in pixels relative to the anchor cell.
    /// Negative offsets clamp to a single cell; the rectangle never leaves its source.
    pub fn update_drag(&mut self, dx: f32, dy: f32, cell_pixel_size: f32) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        let (columns, rows) = drag.source.dimensions();
        let span = |delta: f32, room: usize| -> usize {
            let cells = if cell_pixel_size > 0.0 && delta.is_finite() {
                (delta / cell_pixel_size).floor().max(0.0) as usize
            } else {
                0
            };
            (cells + 1).min(room)
        };
        drag.width = span(dx, columns - drag.anchor_x);
        drag.height = span(dy, rows - drag.anchor_y);
    }

    /// Finish the drag and replace the selection with the dragged block.
    /// Does nothing when no drag is in progress.
    pub fn end_drag(&mut self, grid: &TileGrid) {
        let Some(drag) = self.drag.take() else {
            return;
        };

        let mut selection = Vec::with_capacity(drag.width * drag.height);
        for y in drag.anchor_y..drag.anchor_y + drag.height {
            for x in drag.anchor_x..drag.anchor_x + drag.width {
                let cell = match drag.source {
                    BrushSource::Tileset => {
                        let index = (y * PICKER_COLUMNS + x) as u16;
                        TileCell::new(index, self.xflip, self.yflip, self.palette)
                    }
                    BrushSource::Map => grid.get(x as i32, y as i32).unwrap_or_default(),
                };
                selection.push(cell);
            }
        }

        self.selection = selection;
        self.width = drag.width;
        self.height = drag.height;
        self.from_tileset = drag.source == BrushSource::Tileset;
        log::debug!(
            "Brush selected {}x{} from {:?} at ({}, {})",
            drag.width,
            drag.height,
            drag.source,
            drag.anchor_x,
            drag.anchor_y
        );
    }

    /// Abandon a drag without touching the current selection
    pub fn cancel_drag(&mut self) {
        self.drag = None;
    }

    /// Take a single map cell's tile as the brush and load its palette and flips
    /// into the brush controls, which keep driving later paints
    pub fn pick_cell(&mut self, cell: TileCell) {
        self.palette = cell.palette();
        self.xflip = cell.flip_x();
        self.yflip = cell.flip_y();
        self.selection = vec![TileCell::new(
            cell.tileset_index(),
            self.xflip,
            self.yflip,
            self.palette,
        )];
        self.width = 1;
        self.height = 1;
        self.from_tileset = true;
        self.drag = None;
    }

    /// Stamp the brush onto `grid` with its top-left at `(start_x, start_y)`.
    /// Cells falling outside the grid are skipped. Returns `true` if any cell changed.
    pub fn apply_at(&self, grid: &mut TileGrid, start_x: i32, start_y: i32) -> bool {
        let mut changed = false;
        for y in 0..self.height {
            for x in 0..self.width {
                let (Some(tx), Some(ty)) = (
                    start_x.checked_add(x as i32),
                    start_y.checked_add(y as i32),
                ) else {
                    continue;
                };
                let Some(current) = grid.get(tx, ty) else {
                    continue;
                };
                let source = self.selection[y * self.width + x];
                let cell = if self.from_tileset {
                    source.with_palette(self.palette)
                } else {
                    source
                };
                if cell != current {
                    grid.set(tx, ty, cell);
                    changed = true;
                }
            }
        }
        changed
    }

    fn restamp_tileset_selection(&mut self) {
        if !self.from_tileset {
            return;
        }
        let (palette, xflip, yflip) = (self.palette, self.xflip, self.yflip);
        for cell in &mut self.selection {
            *cell = TileCell::new(cell.tileset_index(), xflip, yflip, palette);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(bits: &[u16]) -> Vec<TileCell> {
        bits.iter().copied().map(TileCell::from_bits).collect()
    }

    #[test]
    fn test_default_brush() {
        let brush = Brush::default();
        assert_eq!(brush.width(), 1);
        assert_eq!(brush.height(), 1);
        assert!(brush.from_tileset());
        assert_eq!(brush.selection(), &[TileCell::EMPTY]);
    }

    #[test]
    fn test_clipped_paint_at_corner() {
        let mut grid = TileGrid::default();
        let brush = Brush::from_cells(cells(&[1, 2, 3, 4]), 2, 2, false).unwrap();

        assert!(brush.apply_at(&mut grid, 30, 30));
        assert_eq!(grid.get(30, 30), Some(TileCell::from_bits(1)));
        assert_eq!(grid.get(31, 30), Some(TileCell::from_bits(2)));
        assert_eq!(grid.get(30, 31), Some(TileCell::from_bits(3)));
        assert_eq!(grid.get(31, 31), Some(TileCell::from_bits(4)));

        let mut grid = TileGrid::default();
        brush.apply_at(&mut grid, 31, 31);
        assert_eq!(grid.get(31, 31), Some(TileCell::from_bits(1)));
        let written = grid.cells().iter().filter(|c| **c != TileCell::EMPTY).count();
        assert_eq!(written, 1);
    }

    #[test]
    fn test_apply_never_writes_outside_grid() {
        let brush = Brush::from_cells(vec![TileCell::from_bits(9); 16], 4, 4, false).unwrap();
        for (x, y) in [(-3, -3), (-4, 0), (32, 5), (29, 29), (i32::MAX, i32::MAX), (i32::MIN, 0)] {
            let mut grid = TileGrid::default();
            brush.apply_at(&mut grid, x, y);
            let written = grid.cells().iter().filter(|c| **c != TileCell::EMPTY).count();
            let expected_w = (x.saturating_add(4).min(32) - x.max(0)).max(0);
            let expected_h = (y.saturating_add(4).min(32) - y.max(0)).max(0);
            assert_eq!(written as i32, expected_w * expected_h, "origin ({}, {})", x, y);
        }
    }

    #[test]
    fn test_tileset_paint_overrides_palette() {
        let mut grid = TileGrid::default();
        let mut brush = Brush::default();
        brush.begin_drag(17, BrushSource::Tileset);
        brush.end_drag(&grid);
        brush.set_palette(6);

        brush.apply_at(&mut grid, 0, 0);
        let cell = grid.get(0, 0).unwrap();
        assert_eq!(cell.tileset_index(), 17);
        assert_eq!(cell.palette(), 6);
    }

    #[test]
    fn test_map_paint_copies_palette_verbatim() {
        let mut grid = TileGrid::default();
        grid.set(2, 2, TileCell::new(40, true, false, 9));

        let mut brush = Brush::default();
        brush.set_palette(1);
        brush.begin_drag(2 * 32 + 2, BrushSource::Map);
        brush.end_drag(&grid);
        assert!(!brush.from_tileset());

        brush.apply_at(&mut grid, 10, 10);
        assert_eq!(grid.get(10, 10), Some(TileCell::new(40, true, false, 9)));
    }

    #[test]
    fn test_drag_from_tileset_synthesizes_indices() {
        let grid = TileGrid::default();
        let mut brush = Brush::default();
        brush.set_palette(3);
        brush.set_xflip(true);

        brush.begin_drag(2 * PICKER_COLUMNS + 4, BrushSource::Tileset);
        brush.update_drag(17.0, 8.0, 8.0);
        brush.end_drag(&grid);

        assert_eq!(brush.width(), 3);
        assert_eq!(brush.height(), 2);
        let indices: Vec<u16> = brush.selection().iter().map(|c| c.tileset_index()).collect();
        assert_eq!(indices, vec![36, 37, 38, 52, 53, 54]);
        assert!(brush.selection().iter().all(|c| c.flip_x() && c.palette() == 3));
    }

    #[test]
    fn test_negative_drag_clamps_to_single_cell() {
        let mut brush = Brush::default();
        brush.begin_drag(100, BrushSource::Map);
        brush.update_drag(-50.0, -1.0, 8.0);
        let drag = brush.drag().unwrap();
        assert_eq!((drag.width, drag.height), (1, 1));
    }

    #[test]
    fn test_drag_stays_inside_source() {
        let mut brush = Brush::default();
        brush.begin_drag(PICKER_COLUMNS - 2, BrushSource::Tileset);
        brush.update_drag(1000.0, 0.0, 8.0);
        assert_eq!(brush.drag().unwrap().width, 2);

        brush.begin_drag(31 * 32 + 31, BrushSource::Map);
        brush.update_drag(64.0, 64.0, 8.0);
        let drag = brush.drag().unwrap();
        assert_eq!((drag.width, drag.height), (1, 1));
    }

    #[test]
    fn test_end_drag_without_begin_keeps_selection() {
        let grid = TileGrid::default();
        let mut brush = Brush::from_cells(cells(&[5, 6]), 2, 1, false).unwrap();
        brush.end_drag(&grid);
        assert_eq!(brush.selection(), cells(&[5, 6]).as_slice());
    }

    #[test]
    fn test_pick_cell_adopts_attributes() {
        let mut brush = Brush::default();
        brush.pick_cell(TileCell::new(600, false, true, 12));
        assert_eq!(brush.first_tile_index(), 600);
        assert_eq!(brush.palette(), 12);
        assert!(!brush.xflip());
        assert!(brush.yflip());
        assert!(brush.from_tileset());

        brush.set_xflip(true);
        brush.set_palette(3);
        assert_eq!(brush.selection(), &[TileCell::new(600, true, true, 3)]);
    }

    #[test]
    fn test_map_block_ignores_controls() {
        let mut brush = Brush::from_cells(cells(&[0x7001, 0x0402]), 2, 1, false).unwrap();
        brush.set_palette(5);
        brush.set_xflip(true);
        assert_eq!(brush.selection(), cells(&[0x7001, 0x0402]).as_slice());

        let mut grid = TileGrid::default();
        brush.apply_at(&mut grid, 0, 0);
        assert_eq!(grid.get(0, 0), Some(TileCell::from_bits(0x7001)));
        assert_eq!(grid.get(1, 0), Some(TileCell::from_bits(0x0402)));
    }

    #[test]
    fn test_palette_is_clamped() {
        let mut brush = Brush::default();
        brush.set_palette(200);
        assert_eq!(brush.palette(), 15);
    }
}
