//! Tileset picker pane
//!
//! Both sheets are drawn as one 16x64 tile column: primary on top (tiles
//! 0-511), secondary below (512-1023), using the brush's palette.

use bevy_egui::egui;
use parallax_core::{
    BrushSource, PICKER_COLUMNS, PICKER_FRAME_HEIGHT, PICKER_FRAME_WIDTH, PICKER_ROWS, SHEET_HEIGHT,
    TILE_SIZE,
};

use super::theme::EditorTheme;
use crate::project::Project;
use crate::render::RenderState;
use crate::tools::{cell_at, ButtonEdge, PointerSample, PointerTracker};
use crate::EditorState;

pub fn render_tileset_picker(
    ui: &mut egui::Ui,
    editor_state: &EditorState,
    project: &mut Project,
    render_state: &RenderState,
    tracker: &mut PointerTracker,
) {
    let zoom = editor_state.picker_zoom;
    let cell_px = TILE_SIZE as f32 * zoom;

    ui.horizontal(|ui| {
        ui.heading("Tileset");
        ui.separator();
        ui.label(format!("Palette {}", project.session.brush.palette()));
    });
    for (label, slot) in [
        ("Primary", parallax_core::SheetSlot::Primary),
        ("Secondary", parallax_core::SheetSlot::Secondary),
    ] {
        let name = project
            .tileset_path(slot)
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "(not loaded)".to_string());
        ui.small(format!("{}: {}", label, name));
    }
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("tileset_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let size = egui::vec2(
                PICKER_FRAME_WIDTH as f32 * zoom,
                PICKER_FRAME_HEIGHT as f32 * zoom,
            );
            let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click_and_drag());
            let painter = ui.painter_at(rect);

            match render_state.picker_texture() {
                Some(texture) => {
                    let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                    painter.image(texture, rect, uv, egui::Color32::WHITE);
                }
                None => {
                    painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
                }
            }

            // Sheet divider
            let divider_y = rect.top() + SHEET_HEIGHT as f32 * zoom;
            painter.hline(
                rect.x_range(),
                divider_y,
                egui::Stroke::new(1.0, EditorTheme::SHEET_DIVIDER),
            );

            let tile_rect = |x: usize, y: usize, w: usize, h: usize| {
                egui::Rect::from_min_size(
                    rect.min + egui::vec2(x as f32 * cell_px, y as f32 * cell_px),
                    egui::vec2(w as f32 * cell_px, h as f32 * cell_px),
                )
            };

            // Current brush, when it came from here
            let brush = &project.session.brush;
            if brush.from_tileset() && brush.drag().is_none() {
                let first = usize::from(brush.first_tile_index());
                painter.rect_stroke(
                    tile_rect(
                        first % PICKER_COLUMNS,
                        first / PICKER_COLUMNS,
                        brush.width(),
                        brush.height(),
                    ),
                    0.0,
                    EditorTheme::stroke(EditorTheme::ACCENT_BLUE),
                    egui::StrokeKind::Inside,
                );
            }
            if let Some(drag) = brush.drag().filter(|d| d.source == BrushSource::Tileset) {
                painter.rect_stroke(
                    tile_rect(drag.anchor_x, drag.anchor_y, drag.width, drag.height),
                    0.0,
                    EditorTheme::stroke(EditorTheme::DRAG_RECT),
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
                secondary: ButtonEdge::default(),
            });
            tracker.handle_picker(&sample, &mut project.session, cell_px);

            let hovered = response
                .hover_pos()
                .and_then(|pos| cell_at(pos - rect.min, cell_px, PICKER_COLUMNS, PICKER_ROWS));
            if let Some((x, y)) = hovered {
                response.on_hover_text(format!("Tile {}", y * PICKER_COLUMNS + x));
            }
        });
}
