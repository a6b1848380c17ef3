//! Brush panel and status bar

use bevy_egui::egui;
use parallax_core::{BrushSource, PALETTE_COUNT};

use crate::project::Project;
use crate::EditorState;

const SWATCH_SIZE: f32 = 14.0;

/// Palette, flips and the current selection
pub fn render_brush_panel(ui: &mut egui::Ui, project: &mut Project) {
    ui.heading("Brush");
    ui.separator();

    // Map blocks paint verbatim, so palette and flips only apply to tileset brushes
    let controls_apply = project.session.brush.from_tileset();

    // Palette selection
    let mut palette = project.session.brush.palette();
    ui.add_enabled_ui(controls_apply, |ui| {
        egui::ComboBox::from_label("Palette")
            .selected_text(format!("{:02}", palette))
            .show_ui(ui, |ui| {
                for p in 0..PALETTE_COUNT {
                    ui.selectable_value(&mut palette, p, format!("{:02}", p));
                }
            });
    });
    if palette != project.session.brush.palette() {
        project.set_palette(palette);
    }

    // Swatches of the active palette
    let colors = *project.renderer.palettes().get(palette);
    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(1.0, 1.0);
        for (i, color) in colors.iter().enumerate() {
            let (rect, response) =
                ui.allocate_exact_size(egui::vec2(SWATCH_SIZE, SWATCH_SIZE), egui::Sense::hover());
            ui.painter()
                .rect_filled(rect, 0.0, egui::Color32::from_rgb(color.r, color.g, color.b));
            response.on_hover_text(format!(
                "{}: #{:02X}{:02X}{:02X}",
                i, color.r, color.g, color.b
            ));
        }
    });

    ui.add_space(8.0);

    let brush = &mut project.session.brush;
    let mut xflip = brush.xflip();
    let mut yflip = brush.yflip();
    ui.add_enabled_ui(controls_apply, |ui| {
        ui.horizontal(|ui| {
            ui.checkbox(&mut xflip, "Flip X");
            ui.checkbox(&mut yflip, "Flip Y");
        });
    });
    if xflip != brush.xflip() {
        brush.set_xflip(xflip);
    }
    if yflip != brush.yflip() {
        brush.set_yflip(yflip);
    }

    ui.add_space(8.0);
    ui.separator();

    let source = if brush.from_tileset() {
        BrushSource::Tileset
    } else {
        BrushSource::Map
    };
    egui::Grid::new("brush_info").num_columns(2).show(ui, |ui| {
        ui.label("Size:");
        ui.label(format!("{} x {}", brush.width(), brush.height()));
        ui.end_row();

        ui.label("Source:");
        ui.label(match source {
            BrushSource::Tileset => "Tileset",
            BrushSource::Map => "Map",
        });
        ui.end_row();

        if source == BrushSource::Tileset {
            ui.label("First tile:");
            ui.label(brush.first_tile_index().to_string());
            ui.end_row();
        }
    });

    ui.add_space(8.0);
    ui.separator();

    let history = &project.session.history;
    ui.label(format!(
        "Undo: {}  Redo: {}",
        history.undo_len(),
        history.redo_len()
    ));
    match history.limit() {
        Some(limit) => ui.small(format!("Keeping {} steps", limit)),
        None => ui.small("Keeping every step"),
    };
}

/// Hovered cell and what it holds
pub fn render_status_bar(ctx: &egui::Context, editor_state: &EditorState, project: &Project) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            match editor_state.hovered_cell {
                Some((x, y)) => {
                    ui.label(format!("({}, {})", x, y));
                    if let Some(cell) = project.session.grid.get(x as i32, y as i32) {
                        ui.separator();
                        ui.label(format!("Tile {}", cell.tileset_index()));
                        ui.label(format!("Palette {}", cell.palette()));
                        if cell.flip_x() {
                            ui.label("X");
                        }
                        if cell.flip_y() {
                            ui.label("Y");
                        }
                    }
                }
                None => {
                    ui.label("-");
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if project.session.is_painting() {
                    ui.label("Painting");
                }
            });
        });
    });
}
