//! Tileset sheets: 128x256 single-channel images of 8x8 tiles

use image::{ColorType, DynamicImage};
use std::path::Path;

/// Sheet width in pixels
pub const SHEET_WIDTH: u32 = 128;
/// Sheet height in pixels
pub const SHEET_HEIGHT: u32 = 256;
/// Tile edge length in pixels
pub const TILE_SIZE: u32 = 8;
/// Tiles per sheet row
pub const SHEET_COLUMNS: u32 = SHEET_WIDTH / TILE_SIZE;
/// Tiles held by one sheet
pub const SHEET_TILES: u16 = ((SHEET_WIDTH / TILE_SIZE) * (SHEET_HEIGHT / TILE_SIZE)) as u16;

#[derive(Debug, thiserror::Error)]
pub enum TilesetError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Tileset must be 128x256 pixels, found {width}x{height}")]
    WrongDimensions { width: u32, height: u32 },
    #[error("Tileset must be a single-channel (grayscale) image, found {0:?}")]
    NotSingleChannel(ColorType),
}

/// Which half of the tile index space a sheet occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetSlot {
    /// Tile indices 0-511
    Primary,
    /// Tile indices 512-1023
    Secondary,
}

impl SheetSlot {
    /// Slot holding `tileset_index` and the tile's position inside that sheet
    pub fn locate(tileset_index: u16) -> (SheetSlot, u16) {
        if tileset_index < SHEET_TILES {
            (SheetSlot::Primary, tileset_index)
        } else {
            (SheetSlot::Secondary, tileset_index - SHEET_TILES)
        }
    }
}

/// Validated sheet of colour indices, one byte per pixel, row-major
#[derive(Clone, PartialEq, Eq)]
pub struct TilesetSheet {
    pixels: Vec<u8>,
}

impl std::fmt::Debug for TilesetSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TilesetSheet")
            .field("width", &SHEET_WIDTH)
            .field("height", &SHEET_HEIGHT)
            .finish()
    }
}

impl TilesetSheet {
    /// Load and validate a sheet from an image file
    pub fn load(path: &Path) -> Result<Self, TilesetError> {
        let image = image::open(path)?;
        let sheet = Self::from_image(&image)?;
        log::debug!("Loaded tileset sheet from {:?}", path);
        Ok(sheet)
    }

    /// Validate a decoded image. Anything other than 128x256 8-bit grayscale is rejected.
    pub fn from_image(image: &DynamicImage) -> Result<Self, TilesetError> {
        if image.width() != SHEET_WIDTH || image.height() != SHEET_HEIGHT {
            return Err(TilesetError::WrongDimensions {
                width: image.width(),
                height: image.height(),
            });
        }
        match image {
            DynamicImage::ImageLuma8(luma) => Ok(Self {
                pixels: luma.as_raw().clone(),
            }),
            other => Err(TilesetError::NotSingleChannel(other.color())),
        }
    }

    /// Colour index (0-15) at pixel `(px, py)` of tile `tile` within this sheet
    #[inline]
    pub fn tile_pixel(&self, tile: u16, px: u32, py: u32) -> u8 {
        let tile = u32::from(tile);
        let x = (tile % SHEET_COLUMNS) * TILE_SIZE + px;
        let y = (tile / SHEET_COLUMNS) * TILE_SIZE + py;
        self.pixels
            .get((y * SHEET_WIDTH + x) as usize)
            .map_or(0, |v| (*v).min(15))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, RgbaImage};

    #[test]
    fn test_accepts_grayscale_sheet() {
        let mut image = GrayImage::new(SHEET_WIDTH, SHEET_HEIGHT);
        // Tile 17 is row 1, column 1
        image.put_pixel(8 + 3, 8 + 2, Luma([7]));
        let sheet = TilesetSheet::from_image(&DynamicImage::ImageLuma8(image)).unwrap();
        assert_eq!(sheet.tile_pixel(17, 3, 2), 7);
        assert_eq!(sheet.tile_pixel(17, 0, 0), 0);
    }

    #[test]
    fn test_rejects_wrong_geometry() {
        let image = DynamicImage::ImageLuma8(GrayImage::new(128, 128));
        assert!(matches!(
            TilesetSheet::from_image(&image),
            Err(TilesetError::WrongDimensions {
                width: 128,
                height: 128
            })
        ));
    }

    #[test]
    fn test_rejects_color_image() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(SHEET_WIDTH, SHEET_HEIGHT));
        assert!(matches!(
            TilesetSheet::from_image(&image),
            Err(TilesetError::NotSingleChannel(_))
        ));
    }

    #[test]
    fn test_slot_lookup() {
        assert_eq!(SheetSlot::locate(0), (SheetSlot::Primary, 0));
        assert_eq!(SheetSlot::locate(511), (SheetSlot::Primary, 511));
        assert_eq!(SheetSlot::locate(512), (SheetSlot::Secondary, 0));
        assert_eq!(SheetSlot::locate(1023), (SheetSlot::Secondary, 511));
    }

    #[test]
    fn test_load_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tiles.png");
        GrayImage::new(SHEET_WIDTH, SHEET_HEIGHT).save(&path).unwrap();
        assert!(TilesetSheet::load(&path).is_ok());

        let wrong = dir.path().join("wrong.png");
        GrayImage::new(64, 64).save(&wrong).unwrap();
        assert!(TilesetSheet::load(&wrong).is_err());
    }
}
