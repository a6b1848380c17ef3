//! Pointer tools for the map and tileset panes
//!
//! The UI samples egui's pointer once per pane per frame into a [`PointerSample`];
//! everything below turns samples into brush and session operations.

use bevy::prelude::*;
use bevy_egui::egui;
use parallax_core::{BrushSource, EditorSession, TileGrid, PICKER_COLUMNS, PICKER_ROWS};

/// Pressed/held/released state of one mouse button for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonEdge {
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

impl ButtonEdge {
    pub fn sample(pointer: &egui::PointerState, button: egui::PointerButton) -> Self {
        Self {
            pressed: pointer.button_pressed(button),
            down: pointer.button_down(button),
            released: pointer.button_released(button),
        }
    }
}

/// Pointer state over a pane. `pos` is relative to the pane's top-left corner
/// and is `None` while the pointer is outside it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub pos: Option<egui::Vec2>,
    pub primary: ButtonEdge,
    pub secondary: ButtonEdge,
}

/// Cell under `pos` for a pane of `columns` x `rows` cells each `cell_px` wide
pub fn cell_at(
    pos: egui::Vec2,
    cell_px: f32,
    columns: usize,
    rows: usize,
) -> Option<(usize, usize)> {
    if cell_px <= 0.0 || pos.x < 0.0 || pos.y < 0.0 {
        return None;
    }
    let x = (pos.x / cell_px).floor() as usize;
    let y = (pos.y / cell_px).floor() as usize;
    (x < columns && y < rows).then_some((x, y))
}

/// Per-pane drag bookkeeping
#[derive(Resource, Debug, Default)]
pub struct PointerTracker {
    /// Press position of a map selection drag (secondary button)
    map_select_origin: Option<egui::Vec2>,
    /// Press position of a tileset picker drag
    picker_origin: Option<egui::Vec2>,
}

impl PointerTracker {
    /// Map pane: primary paints, secondary drags out a selection from the map.
    /// A secondary click without dragging picks the single cell under the pointer.
    /// Returns `true` if the grid changed.
    pub fn handle_map(
        &mut self,
        sample: &PointerSample,
        session: &mut EditorSession,
        cell_px: f32,
    ) -> bool {
        let columns = parallax_core::GRID_WIDTH;
        let rows = parallax_core::GRID_HEIGHT;
        let hovered = sample.pos.and_then(|pos| cell_at(pos, cell_px, columns, rows));
        let mut changed = false;

        // Painting
        if sample.primary.pressed && hovered.is_some() && self.map_select_origin.is_none() {
            session.begin_stroke();
        }
        if session.is_painting() {
            if sample.primary.down {
                if let Some((x, y)) = hovered {
                    changed |= session.paint_at(x as i32, y as i32);
                }
            }
            if sample.primary.released || !sample.primary.down {
                session.end_stroke();
            }
        }

        // Selection from the map
        if sample.secondary.pressed && !session.is_painting() {
            if let (Some(pos), Some((x, y))) = (sample.pos, hovered) {
                self.map_select_origin = Some(pos);
                session.brush.begin_drag(y * columns + x, BrushSource::Map);
            }
        }
        if let Some(origin) = self.map_select_origin {
            if let Some(pos) = sample.pos {
                let delta = pos - origin;
                session.brush.update_drag(delta.x, delta.y, cell_px);
            }
            if sample.secondary.released || !sample.secondary.down {
                self.map_select_origin = None;
                finish_map_selection(session);
            }
        }

        changed
    }

    /// Tileset picker: primary drags out a block of tiles
    pub fn handle_picker(
        &mut self,
        sample: &PointerSample,
        session: &mut EditorSession,
        cell_px: f32,
    ) {
        if sample.primary.pressed {
            if let Some(pos) = sample.pos {
                if let Some((x, y)) = cell_at(pos, cell_px, PICKER_COLUMNS, PICKER_ROWS) {
                    self.picker_origin = Some(pos);
                    session.brush.begin_drag(y * PICKER_COLUMNS + x, BrushSource::Tileset);
                }
            }
        }
        if let Some(origin) = self.picker_origin {
            if let Some(pos) = sample.pos {
                let delta = pos - origin;
                session.brush.update_drag(delta.x, delta.y, cell_px);
            }
            if sample.primary.released || !sample.primary.down {
                self.picker_origin = None;
                session.brush.end_drag(&TileGrid::default());
            }
        }
    }
}

fn finish_map_selection(session: &mut EditorSession) {
    let single = session
        .brush
        .drag()
        .map(|drag| (drag.width, drag.height, drag.anchor_x, drag.anchor_y));
    match single {
        Some((1, 1, x, y)) => {
            session.brush.cancel_drag();
            session.pick_from_map(x as i32, y as i32);
        }
        Some(_) => {
            let grid = session.grid.clone();
            session.brush.end_drag(&grid);
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parallax_core::TileCell;

    const PRESS: ButtonEdge = ButtonEdge {
        pressed: true,
        down: true,
        released: false,
    };
    const HELD: ButtonEdge = ButtonEdge {
        pressed: false,
        down: true,
        released: false,
    };
    const RELEASE: ButtonEdge = ButtonEdge {
        pressed: false,
        down: false,
        released: true,
    };

    fn primary(pos: (f32, f32), edge: ButtonEdge) -> PointerSample {
        PointerSample {
            pos: Some(egui::vec2(pos.0, pos.1)),
            primary: edge,
            ..Default::default()
        }
    }

    fn secondary(pos: (f32, f32), edge: ButtonEdge) -> PointerSample {
        PointerSample {
            pos: Some(egui::vec2(pos.0, pos.1)),
            secondary: edge,
            ..Default::default()
        }
    }

    #[test]
    fn test_cell_at_bounds() {
        assert_eq!(cell_at(egui::vec2(0.0, 0.0), 32.0, 32, 32), Some((0, 0)));
        assert_eq!(cell_at(egui::vec2(33.0, 95.9), 32.0, 32, 32), Some((1, 2)));
        assert_eq!(cell_at(egui::vec2(-1.0, 0.0), 32.0, 32, 32), None);
        assert_eq!(cell_at(egui::vec2(1024.0, 0.0), 32.0, 32, 32), None);
    }

    #[test]
    fn test_cell_at_far_picker_edges() {
        // 16x64 picker at 3x zoom: 24px cells, 384x1536 pane
        let cell_px = 24.0;
        assert_eq!(
            cell_at(egui::vec2(383.9, 1535.9), cell_px, PICKER_COLUMNS, PICKER_ROWS),
            Some((15, 63))
        );
        assert_eq!(
            cell_at(egui::vec2(384.0, 10.0), cell_px, PICKER_COLUMNS, PICKER_ROWS),
            None
        );
        assert_eq!(
            cell_at(egui::vec2(10.0, 1536.0), cell_px, PICKER_COLUMNS, PICKER_ROWS),
            None
        );
    }

    #[test]
    fn test_paint_drag_is_one_undo_step() {
        let mut tracker = PointerTracker::default();
        let mut session = EditorSession::default();
        session.brush.set_palette(2);

        tracker.handle_map(&primary((4.0, 4.0), PRESS), &mut session, 8.0);
        tracker.handle_map(&primary((12.0, 4.0), HELD), &mut session, 8.0);
        tracker.handle_map(&primary((20.0, 4.0), HELD), &mut session, 8.0);
        tracker.handle_map(&primary((20.0, 4.0), RELEASE), &mut session, 8.0);

        assert!(!session.is_painting());
        assert_eq!(session.history.undo_len(), 1);
        for x in 0..3 {
            assert_eq!(session.grid.get(x, 0).map(|c| c.palette()), Some(2));
        }
    }

    #[test]
    fn test_picker_drag_selects_block() {
        let mut tracker = PointerTracker::default();
        let mut session = EditorSession::default();

        tracker.handle_picker(&primary((25.0, 1.0), PRESS), &mut session, 24.0);
        tracker.handle_picker(&primary((75.0, 30.0), HELD), &mut session, 24.0);
        tracker.handle_picker(&primary((75.0, 30.0), RELEASE), &mut session, 24.0);

        let brush = &session.brush;
        assert!(brush.from_tileset());
        assert_eq!((brush.width(), brush.height()), (3, 2));
        assert_eq!(brush.first_tile_index(), 1);
    }

    #[test]
    fn test_secondary_click_picks_cell() {
        let mut tracker = PointerTracker::default();
        let mut session = EditorSession::default();
        session.grid.set(2, 1, TileCell::new(99, true, true, 4));

        tracker.handle_map(&secondary((20.0, 12.0), PRESS), &mut session, 8.0);
        tracker.handle_map(&secondary((20.0, 12.0), RELEASE), &mut session, 8.0);

        assert_eq!(session.brush.selection(), &[TileCell::new(99, true, true, 4)]);
        assert_eq!(session.brush.palette(), 4);
        assert!(tracker.map_select_origin.is_none());
    }

    #[test]
    fn test_secondary_drag_copies_map_block() {
        let mut tracker = PointerTracker::default();
        let mut session = EditorSession::default();
        session.grid.set(0, 0, TileCell::from_bits(1));
        session.grid.set(1, 0, TileCell::from_bits(2));

        tracker.handle_map(&secondary((1.0, 1.0), PRESS), &mut session, 8.0);
        tracker.handle_map(&secondary((9.0, 1.0), HELD), &mut session, 8.0);
        tracker.handle_map(&secondary((9.0, 1.0), RELEASE), &mut session, 8.0);

        assert!(!session.brush.from_tileset());
        assert_eq!(
            session.brush.selection(),
            &[TileCell::from_bits(1), TileCell::from_bits(2)]
        );
    }
}
