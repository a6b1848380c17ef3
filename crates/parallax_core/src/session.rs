//! Editing session: the live grid, the brush and the undo history
//!
//! A session is created when the editor starts and replaced wholesale when
//! a different tilemap document is opened.

use std::path::{Path, PathBuf};

use crate::history::{Action, ActionStack, DEFAULT_HISTORY_LIMIT};
use crate::{Brush, TileGrid, TilemapError};

/// Snapshot taken when a paint stroke begins
#[derive(Debug, Clone)]
struct Stroke {
    before: TileGrid,
    last_cell: Option<(i32, i32)>,
}

#[derive(Debug)]
pub struct EditorSession {
    pub grid: TileGrid,
    pub brush: Brush,
    pub history: ActionStack,
    path: Option<PathBuf>,
    dirty: bool,
    stroke: Option<Stroke>,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl EditorSession {
    /// Empty session. `history_limit` of zero keeps unbounded history.
    pub fn new(history_limit: usize) -> Self {
        Self {
            grid: TileGrid::default(),
            brush: Brush::default(),
            history: ActionStack::bounded(history_limit),
            path: None,
            dirty: false,
            stroke: None,
        }
    }

    /// File the current grid was loaded from or last saved to
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Display name for title bars
    pub fn name(&self) -> String {
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string())
    }

    /// Replace the grid with a new document. History referring to the old grid is dropped.
    pub fn replace_grid(&mut self, grid: TileGrid, path: Option<PathBuf>) {
        self.grid = grid;
        self.path = path;
        self.dirty = false;
        self.stroke = None;
        self.history.clear();
    }

    /// Load a tilemap file. On failure the session is left untouched.
    pub fn open_tilemap(&mut self, path: &Path) -> Result<(), TilemapError> {
        let grid = TileGrid::load(path)?;
        self.replace_grid(grid, Some(path.to_path_buf()));
        Ok(())
    }

    /// Load a tilemap from an in-memory file image
    pub fn load_tilemap_bytes(&mut self, bytes: &[u8]) -> Result<(), TilemapError> {
        let grid = TileGrid::from_le_bytes(bytes)?;
        self.replace_grid(grid, None);
        Ok(())
    }

    /// Write the grid to `path` and remember it as the document path
    pub fn save_tilemap(&mut self, path: &Path) -> Result<(), TilemapError> {
        self.grid.save(path)?;
        self.path = Some(path.to_path_buf());
        self.dirty = false;
        Ok(())
    }

    pub fn is_painting(&self) -> bool {
        self.stroke.is_some()
    }

    /// Mouse-down on the map: remember the grid as it is now
    pub fn begin_stroke(&mut self) {
        if self.stroke.is_none() {
            self.stroke = Some(Stroke {
                before: self.grid.clone(),
                last_cell: None,
            });
        }
    }

    /// Stamp the brush at `(x, y)`. Repeats of the previous cell within a stroke are ignored.
    /// Starts a stroke if none is active. Returns `true` if the grid changed.
    pub fn paint_at(&mut self, x: i32, y: i32) -> bool {
        self.begin_stroke();
        let Some(stroke) = self.stroke.as_mut() else {
            return false;
        };
        if stroke.last_cell == Some((x, y)) {
            return false;
        }
        stroke.last_cell = Some((x, y));
        self.brush.apply_at(&mut self.grid, x, y)
    }

    /// Mouse-up: record the whole stroke as one action if it changed anything.
    /// A committed stroke invalidates the redo history.
    pub fn end_stroke(&mut self) -> bool {
        let Some(stroke) = self.stroke.take() else {
            return false;
        };
        let action = Action::new(stroke.before, self.grid.clone());
        if action.is_noop() {
            return false;
        }
        self.history.push_undo(action);
        self.history.discard_redo();
        self.dirty = true;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo the most recent stroke; a stroke still in progress is committed first
    pub fn undo(&mut self) -> bool {
        self.end_stroke();
        let changed = self.history.undo(&mut self.grid);
        self.dirty |= changed;
        changed
    }

    pub fn redo(&mut self) -> bool {
        self.end_stroke();
        let changed = self.history.redo(&mut self.grid);
        self.dirty |= changed;
        changed
    }

    /// Eyedropper: make the map cell at `(x, y)` the brush
    pub fn pick_from_map(&mut self, x: i32, y: i32) -> bool {
        match self.grid.get(x, y) {
            Some(cell) => {
                self.brush.pick_cell(cell);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BrushSource, TileCell};

    fn tile_brush(index: usize) -> Brush {
        let mut brush = Brush::default();
        brush.begin_drag(index, BrushSource::Tileset);
        brush.end_drag(&TileGrid::default());
        brush
    }

    #[test]
    fn test_drag_stroke_is_one_action() {
        let mut session = EditorSession::default();
        session.brush = tile_brush(5);

        session.begin_stroke();
        for x in 0..10 {
            session.paint_at(x, 3);
        }
        assert!(session.end_stroke());

        assert_eq!(session.history.undo_len(), 1);
        assert!(session.is_dirty());
        session.undo();
        assert_eq!(session.grid, TileGrid::default());
    }

    #[test]
    fn test_noop_stroke_records_nothing() {
        let mut session = EditorSession::default();
        session.begin_stroke();
        session.paint_at(0, 0);
        assert!(!session.end_stroke());
        assert!(!session.can_undo());
        assert!(!session.is_dirty());
    }

    #[test]
    fn test_repeat_cell_is_skipped_within_stroke() {
        let mut session = EditorSession::default();
        session.brush = tile_brush(9);
        assert!(session.paint_at(4, 4));
        session.grid.set(4, 4, TileCell::EMPTY);
        assert!(!session.paint_at(4, 4));
        assert!(session.paint_at(5, 4));
        session.end_stroke();
    }

    #[test]
    fn test_fresh_stroke_invalidates_redo() {
        let mut session = EditorSession::default();
        session.brush = tile_brush(1);
        session.paint_at(0, 0);
        session.end_stroke();
        session.undo();
        assert!(session.can_redo());

        session.brush = tile_brush(2);
        session.paint_at(1, 1);
        session.end_stroke();

        assert!(!session.can_redo());
        assert!(!session.redo());
        assert_eq!(session.grid.get(0, 0), Some(TileCell::EMPTY));
    }

    #[test]
    fn test_undo_commits_open_stroke() {
        let mut session = EditorSession::default();
        session.brush = tile_brush(3);
        session.paint_at(2, 2);
        assert!(session.undo());
        assert!(!session.is_painting());
        assert_eq!(session.grid.get(2, 2), Some(TileCell::EMPTY));
        assert!(session.can_redo());
    }

    #[test]
    fn test_load_clears_history() {
        let mut session = EditorSession::default();
        session.brush = tile_brush(3);
        session.paint_at(0, 0);
        session.end_stroke();
        assert!(session.can_undo());

        let mut bytes = vec![0u8; crate::grid::TILEMAP_FILE_SIZE];
        bytes[0] = 0x2A;
        session.load_tilemap_bytes(&bytes).unwrap();

        assert!(!session.can_undo());
        assert!(!session.can_redo());
        assert!(!session.is_dirty());
        assert_eq!(session.grid.get(0, 0), Some(TileCell::from_bits(0x2A)));
    }

    #[test]
    fn test_failed_load_keeps_state() {
        let mut session = EditorSession::default();
        session.brush = tile_brush(3);
        session.paint_at(0, 0);
        session.end_stroke();
        let before = session.grid.clone();

        assert!(session.load_tilemap_bytes(&[1, 2, 3]).is_err());
        assert_eq!(session.grid, before);
        assert!(session.can_undo());
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("level.bin");

        let mut session = EditorSession::default();
        session.brush = tile_brush(77);
        session.paint_at(8, 8);
        session.end_stroke();
        session.save_tilemap(&path).unwrap();
        assert!(!session.is_dirty());
        assert_eq!(session.name(), "level.bin");

        let mut reopened = EditorSession::default();
        reopened.open_tilemap(&path).unwrap();
        assert_eq!(reopened.grid, session.grid);
        assert_eq!(reopened.path(), Some(path.as_path()));
    }

    #[test]
    fn test_pick_from_map() {
        let mut session = EditorSession::default();
        session.grid.set(3, 4, TileCell::new(12, true, false, 7));
        assert!(session.pick_from_map(3, 4));
        assert_eq!(session.brush.selection(), &[TileCell::new(12, true, false, 7)]);
        assert_eq!(session.brush.palette(), 7);
        assert!(!session.pick_from_map(40, 0));
    }

    #[test]
    fn test_picked_tile_paints_with_current_controls() {
        let mut session = EditorSession::default();
        session.grid.set(3, 4, TileCell::new(12, false, false, 7));
        assert!(session.pick_from_map(3, 4));

        session.brush.set_xflip(true);
        session.brush.set_palette(2);
        session.begin_stroke();
        assert!(session.paint_at(10, 10));
        session.end_stroke();

        assert_eq!(session.grid.get(10, 10), Some(TileCell::new(12, true, false, 2)));
    }
}
