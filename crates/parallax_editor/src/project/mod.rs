//! The open document: tile grid, brush, history and the loaded art
//!
//! This module owns the [`Project`] resource. File operations live in `file.rs`.

mod file;

pub use file::*;

use bevy::prelude::Resource;
use parallax_core::{
    EditorSession, SheetSlot, SoftwareRenderer, TileRenderer, DEFAULT_HISTORY_LIMIT,
    PALETTE_COUNT,
};
use std::path::PathBuf;

/// Everything the editor is working on
#[derive(Resource)]
pub struct Project {
    pub session: EditorSession,
    pub renderer: SoftwareRenderer,
    pub palette_dir: Option<PathBuf>,
    pub primary_tileset: Option<PathBuf>,
    pub secondary_tileset: Option<PathBuf>,
    needs_render: bool,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl Project {
    pub fn new(history_limit: usize) -> Self {
        Self {
            session: EditorSession::new(history_limit),
            renderer: SoftwareRenderer::new(),
            palette_dir: None,
            primary_tileset: None,
            secondary_tileset: None,
            needs_render: true,
        }
    }

    /// Title bar name of the tilemap
    pub fn name(&self) -> String {
        self.session.name()
    }

    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    pub fn tileset_path(&self, slot: SheetSlot) -> Option<&PathBuf> {
        match slot {
            SheetSlot::Primary => self.primary_tileset.as_ref(),
            SheetSlot::Secondary => self.secondary_tileset.as_ref(),
        }
    }

    /// Request a map redraw on the next frame
    pub fn mark_changed(&mut self) {
        self.needs_render = true;
    }

    /// Redraw the map frame if anything changed since the last call
    pub fn render_if_needed(&mut self) -> bool {
        self.sync_active_palette();
        if !self.needs_render {
            return false;
        }
        self.renderer.render(&self.session.grid);
        self.needs_render = false;
        true
    }

    /// Keep the picker drawn with the brush's palette
    pub fn sync_active_palette(&mut self) {
        let palette = self.session.brush.palette();
        if self.renderer.active_palette() != palette {
            self.renderer.select_active_palette(palette);
        }
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.session.undo();
        self.needs_render |= changed;
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.session.redo();
        self.needs_render |= changed;
        changed
    }

    pub fn toggle_flip_x(&mut self) {
        let brush = &mut self.session.brush;
        brush.set_xflip(!brush.xflip());
    }

    pub fn toggle_flip_y(&mut self) {
        let brush = &mut self.session.brush;
        brush.set_yflip(!brush.yflip());
    }

    /// Select the brush palette; the picker follows
    pub fn set_palette(&mut self, palette: u8) {
        self.session.brush.set_palette(palette);
        self.sync_active_palette();
    }

    /// Step the brush palette by `delta`, wrapping around 0-15
    pub fn cycle_palette(&mut self, delta: i32) {
        let count = i32::from(PALETTE_COUNT);
        let next = (i32::from(self.session.brush.palette()) + delta).rem_euclid(count);
        self.set_palette(next as u8);
    }
}
