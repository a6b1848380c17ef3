//! Tilemap, palette and tileset file operations

use super::Project;
use parallax_core::{
    PaletteError, SheetSlot, TileRenderer, TilemapError, TilesetError, TilesetSheet,
};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("Tilemap: {0}")]
    Tilemap(#[from] TilemapError),
    #[error("Palette: {0}")]
    Palette(#[from] PaletteError),
    #[error("Tileset: {0}")]
    Tileset(#[from] TilesetError),
    #[error("No file path set")]
    NoPath,
}

impl Project {
    /// Open a tilemap, replacing the grid and dropping undo history
    pub fn open_tilemap(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.session.open_tilemap(path)?;
        self.mark_changed();
        bevy::log::info!("Opened tilemap {:?}", path);
        Ok(())
    }

    /// Save the grid to `path` and make it the document path
    pub fn save_tilemap(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.session.save_tilemap(path)?;
        bevy::log::info!("Saved tilemap to {:?}", path);
        Ok(())
    }

    /// Save to current path if set
    pub fn save_current(&mut self) -> Result<(), ProjectError> {
        match self.session.path().map(Path::to_path_buf) {
            Some(path) => self.save_tilemap(&path),
            None => Err(ProjectError::NoPath),
        }
    }

    /// Load `00.pal` .. `15.pal` from a folder. Nothing changes if any file is malformed.
    pub fn load_palette_dir(&mut self, dir: &Path) -> Result<usize, ProjectError> {
        let mut palettes = self.renderer.palettes().clone();
        let loaded = palettes.load_dir(dir)?;
        if loaded.is_empty() {
            bevy::log::warn!("No palette files found in {:?}", dir);
        }
        self.renderer.load_palette_set(&palettes);
        self.palette_dir = Some(dir.to_path_buf());
        self.mark_changed();
        Ok(loaded.len())
    }

    /// Load and validate a tileset sheet into `slot`
    pub fn load_tileset(&mut self, slot: SheetSlot, path: &Path) -> Result<(), ProjectError> {
        let sheet = TilesetSheet::load(path)?;
        match slot {
            SheetSlot::Primary => {
                self.renderer.load_primary(&sheet);
                self.primary_tileset = Some(path.to_path_buf());
            }
            SheetSlot::Secondary => {
                self.renderer.load_secondary(&sheet);
                self.secondary_tileset = Some(path.to_path_buf());
            }
        }
        self.mark_changed();
        bevy::log::info!("Loaded {:?} tileset from {:?}", slot, path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma};
    use parallax_core::{Color, TileCell, TILEMAP_FILE_SIZE};

    #[test]
    fn test_open_rejects_wrong_size_and_keeps_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("short.bin");
        std::fs::write(&path, [0u8; 100]).unwrap();

        let mut project = Project::default();
        project.session.grid.set(0, 0, TileCell::from_bits(7));
        let err = project.open_tilemap(&path).unwrap_err();
        assert!(matches!(err, ProjectError::Tilemap(TilemapError::WrongSize(100))));
        assert_eq!(project.session.grid.get(0, 0), Some(TileCell::from_bits(7)));
    }

    #[test]
    fn test_save_current_requires_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut project = Project::default();
        assert!(matches!(project.save_current(), Err(ProjectError::NoPath)));

        let path = dir.path().join("map.bin");
        project.save_tilemap(&path).unwrap();
        assert!(project.save_current().is_ok());
        assert_eq!(std::fs::read(&path).unwrap().len(), TILEMAP_FILE_SIZE);
    }

    #[test]
    fn test_palette_dir_is_all_or_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("02.pal"), "JASC-PAL\n0100\n1\n10 20 30\n").unwrap();

        let mut project = Project::default();
        assert_eq!(project.load_palette_dir(dir.path()).unwrap(), 1);
        assert_eq!(project.renderer.palettes().get(2)[0], Color::new(10, 20, 30));

        std::fs::write(dir.path().join("03.pal"), "JASC-PAL\n0100\n1\n10 20\n").unwrap();
        std::fs::write(dir.path().join("02.pal"), "JASC-PAL\n0100\n1\n1 1 1\n").unwrap();
        assert!(project.load_palette_dir(dir.path()).is_err());
        assert_eq!(project.renderer.palettes().get(2)[0], Color::new(10, 20, 30));
    }

    #[test]
    fn test_load_tileset_validates_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("primary.png");
        GrayImage::from_pixel(128, 256, Luma([3])).save(&good).unwrap();
        let bad = dir.path().join("bad.png");
        GrayImage::new(256, 128).save(&bad).unwrap();

        let mut project = Project::default();
        project.load_tileset(SheetSlot::Secondary, &good).unwrap();
        assert!(project.renderer.has_sheet(SheetSlot::Secondary));
        assert_eq!(project.tileset_path(SheetSlot::Secondary), Some(&good));

        let err = project.load_tileset(SheetSlot::Primary, &bad).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Tileset(TilesetError::WrongDimensions { .. })
        ));
        assert!(!project.renderer.has_sheet(SheetSlot::Primary));
    }
}
