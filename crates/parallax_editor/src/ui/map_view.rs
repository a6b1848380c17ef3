//! Tilemap pane

use bevy_egui::egui;
use parallax_core::{BrushSource, GRID_HEIGHT, GRID_WIDTH, MAP_FRAME_SIZE, TILE_SIZE};

use super::theme::EditorTheme;
use crate::project::Project;
use crate::render::RenderState;
use crate::tools::{cell_at, ButtonEdge, PointerSample, PointerTracker};
use crate::EditorState;

/// Visible screen area drawn over the map, in tiles
const SCREEN_TILES_X: usize = 30;
const SCREEN_TILES_Y: usize = 20;

pub fn render_map_view(
    ui: &mut egui::Ui,
    editor_state: &mut EditorState,
    project: &mut Project,
    render_state: &RenderState,
    tracker: &mut PointerTracker,
) {
    let zoom = editor_state.zoom;
    let cell_px = TILE_SIZE as f32 * zoom;

    egui::ScrollArea::both()
        .id_salt("map_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let side = MAP_FRAME_SIZE as f32 * zoom;
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click_and_drag());
            let painter = ui.painter_at(rect);

            match render_state.map_texture() {
                Some(texture) => {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture, rect, uv, egui::Color32::WHITE);
                }
                None => {
                    painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
                }
            }

            let tile_rect = |x: usize, y: usize, w: usize, h: usize| {
                egui::Rect::from_min_size(
                    rect.min + egui::vec2(x as f32 * cell_px, y as f32 * cell_px),
                    egui::vec2(w as f32 * cell_px, h as f32 * cell_px),
                )
                .intersect(rect)
            };

            if editor_state.show_grid {
                let stroke = egui::Stroke::new(1.0, EditorTheme::GRID);
                for i in 1..GRID_WIDTH {
                    painter.vline(rect.left() + i as f32 * cell_px, rect.y_range(), stroke);
                }
                for i in 1..GRID_HEIGHT {
                    painter.hline(rect.x_range(), rect.top() + i as f32 * cell_px, stroke);
                }
            }

            if editor_state.draw_screen_bounds {
                painter.rect_stroke(
                    tile_rect(0, 0, SCREEN_TILES_X, SCREEN_TILES_Y),
                    0.0,
                    EditorTheme::stroke(EditorTheme::SCREEN_BOUNDS),
                    egui::StrokeKind::Inside,
                );
            }

            let sample = ui.input(|i| PointerSample {
                pos: i
                    .pointer
                    .hover_pos()
                    .filter(|_| response.contains_pointer())
                    .map(|p| p - rect.min),
                primary: ButtonEdge::sample(&i.pointer, egui::PointerButton::Primary),
                secondary: ButtonEdge::sample(&i.pointer, egui::PointerButton::Secondary),
            });

            // Released outside the pane still has to end the stroke, so this runs every frame
            if tracker.handle_map(&sample, &mut project.session, cell_px) {
                project.mark_changed();
            }

            editor_state.hovered_cell = sample
                .pos
                .and_then(|pos| cell_at(pos, cell_px, GRID_WIDTH, GRID_HEIGHT));

            let brush = &project.session.brush;
            match brush.drag() {
                Some(drag) if drag.source == BrushSource::Map => {
                    painter.rect_stroke(
                        tile_rect(drag.anchor_x, drag.anchor_y, drag.width, drag.height),
                        0.0,
                        EditorTheme::stroke(EditorTheme::DRAG_RECT),
                        egui::StrokeKind::Inside,
                    );
                }
                _ => {
                    if let Some((x, y)) = editor_state.hovered_cell {
                        painter.rect_stroke(
                            tile_rect(x, y, brush.width(), brush.height()),
                            0.0,
                            EditorTheme::stroke(EditorTheme::HOVER),
                            egui::StrokeKind::Inside,
                        );
                    }
                }
            }
        });
}
