//! Packed 16-bit tile cell values

use serde::{Deserialize, Serialize};

/// Mask to extract the tileset index (bits 0-9)
pub const TILE_INDEX_MASK: u16 = 0x03FF;
/// Bit flag for horizontal flip
pub const TILE_FLIP_X: u16 = 0x0400;
/// Bit flag for vertical flip
pub const TILE_FLIP_Y: u16 = 0x0800;
/// Bit offset of the palette selector
pub const TILE_PALETTE_SHIFT: u16 = 12;
/// Mask for the palette selector (bits 12-15)
pub const TILE_PALETTE_MASK: u16 = 0xF000;

/// Number of addressable tiles across both tileset sheets
pub const TILESET_INDEX_COUNT: u16 = 1024;
/// Number of palettes a cell can select from
pub const PALETTE_COUNT: u8 = 16;

/// One grid entry: tileset index, flip bits and palette selector packed into a `u16`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileCell(u16);

impl TileCell {
    /// The all-zero cell (tile 0, no flips, palette 0)
    pub const EMPTY: TileCell = TileCell(0);

    /// Build a cell from its fields. Out-of-range index and palette values are masked.
    pub fn new(tileset_index: u16, flip_x: bool, flip_y: bool, palette: u8) -> Self {
        let mut bits = tileset_index & TILE_INDEX_MASK;
        if flip_x {
            bits |= TILE_FLIP_X;
        }
        if flip_y {
            bits |= TILE_FLIP_Y;
        }
        bits |= (u16::from(palette) << TILE_PALETTE_SHIFT) & TILE_PALETTE_MASK;
        Self(bits)
    }

    /// Reinterpret a raw 16-bit value as a cell. Every bit pattern is valid.
    #[inline]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn to_bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn tileset_index(self) -> u16 {
        self.0 & TILE_INDEX_MASK
    }

    #[inline]
    pub fn flip_x(self) -> bool {
        self.0 & TILE_FLIP_X != 0
    }

    #[inline]
    pub fn flip_y(self) -> bool {
        self.0 & TILE_FLIP_Y != 0
    }

    #[inline]
    pub fn palette(self) -> u8 {
        ((self.0 & TILE_PALETTE_MASK) >> TILE_PALETTE_SHIFT) as u8
    }

    /// Same cell with the palette selector replaced
    #[inline]
    pub fn with_palette(self, palette: u8) -> Self {
        let palette_bits = (u16::from(palette) << TILE_PALETTE_SHIFT) & TILE_PALETTE_MASK;
        Self((self.0 & !TILE_PALETTE_MASK) | palette_bits)
    }
}

impl From<u16> for TileCell {
    fn from(bits: u16) -> Self {
        Self::from_bits(bits)
    }
}

impl From<TileCell> for u16 {
    fn from(cell: TileCell) -> Self {
        cell.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_packing() {
        let cell = TileCell::new(0x123, true, false, 0xA);
        assert_eq!(cell.to_bits(), 0xA523);
        assert_eq!(cell.tileset_index(), 0x123);
        assert!(cell.flip_x());
        assert!(!cell.flip_y());
        assert_eq!(cell.palette(), 0xA);
    }

    #[test]
    fn test_out_of_range_fields_are_masked() {
        let cell = TileCell::new(1024 + 5, false, true, 17);
        assert_eq!(cell.tileset_index(), 5);
        assert!(cell.flip_y());
        assert_eq!(cell.palette(), 1);
    }

    #[test]
    fn test_with_palette_keeps_index_and_flips() {
        let cell = TileCell::new(700, true, true, 3).with_palette(15);
        assert_eq!(cell.tileset_index(), 700);
        assert!(cell.flip_x() && cell.flip_y());
        assert_eq!(cell.palette(), 15);
    }
}
