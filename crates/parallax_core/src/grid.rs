//! The fixed 32x32 tile grid and its on-disk format

use std::path::Path;

use crate::TileCell;

/// Grid width in cells
pub const GRID_WIDTH: usize = 32;
/// Grid height in cells
pub const GRID_HEIGHT: usize = 32;
/// Total number of cells in a grid
pub const GRID_CELLS: usize = GRID_WIDTH * GRID_HEIGHT;
/// Size of a tilemap file: one little-endian `u16` per cell, no header
pub const TILEMAP_FILE_SIZE: usize = GRID_CELLS * 2;

#[derive(Debug, thiserror::Error)]
pub enum TilemapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Tilemap must be exactly 2048 bytes, found {0}")]
    WrongSize(usize),
}

/// Row-major 32x32 array of tile cells, indexed `y * 32 + x`
#[derive(Clone, PartialEq, Eq)]
pub struct TileGrid {
    cells: Box<[TileCell; GRID_CELLS]>,
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::filled(TileCell::EMPTY)
    }
}

impl std::fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let used = self.cells.iter().filter(|c| **c != TileCell::EMPTY).count();
        f.debug_struct("TileGrid").field("non_empty_cells", &used).finish()
    }
}

impl TileGrid {
    /// Create a grid with every cell set to `cell`
    pub fn filled(cell: TileCell) -> Self {
        Self {
            cells: Box::new([cell; GRID_CELLS]),
        }
    }

    /// Linear index of `(x, y)`, or `None` when outside the grid
    #[inline]
    pub fn index_of(x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= GRID_WIDTH as i32 || y >= GRID_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * GRID_WIDTH + x as usize)
    }

    /// Get the cell at `(x, y)`, `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<TileCell> {
        Self::index_of(x, y).map(|i| self.cells[i])
    }

    /// Write the cell at `(x, y)`. Returns `false` and leaves the grid untouched when out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: TileCell) -> bool {
        match Self::index_of(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[TileCell; GRID_CELLS] {
        &self.cells
    }

    /// Overwrite all 1024 cells with the contents of `other`
    pub fn replace_with(&mut self, other: &TileGrid) {
        *self.cells = *other.cells;
    }

    /// Decode a tilemap file image. The input must be exactly [`TILEMAP_FILE_SIZE`] bytes.
    pub fn from_le_bytes(bytes: &[u8]) -> Result<Self, TilemapError> {
        if bytes.len() != TILEMAP_FILE_SIZE {
            return Err(TilemapError::WrongSize(bytes.len()));
        }
        let mut grid = Self::default();
        for (cell, chunk) in grid.cells.iter_mut().zip(bytes.chunks_exact(2)) {
            *cell = TileCell::from_bits(u16::from_le_bytes([chunk[0], chunk[1]]));
        }
        Ok(grid)
    }

    pub fn to_le_bytes(&self) -> Vec<u8> {
        self.cells
            .iter()
            .flat_map(|cell| cell.to_bits().to_le_bytes())
            .collect()
    }

    /// Read a tilemap file from disk
    pub fn load(path: &Path) -> Result<Self, TilemapError> {
        let bytes = std::fs::read(path)?;
        let grid = Self::from_le_bytes(&bytes)?;
        log::debug!("Loaded tilemap from {:?}", path);
        Ok(grid)
    }

    /// Write the grid verbatim to disk
    pub fn save(&self, path: &Path) -> Result<(), TilemapError> {
        std::fs::write(path, self.to_le_bytes())?;
        log::debug!("Saved tilemap to {:?}", path);
        Ok(())
    }
}
