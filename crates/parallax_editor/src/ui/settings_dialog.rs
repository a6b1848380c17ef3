//! Settings/Preferences dialog

use bevy_egui::egui;

use crate::preferences::EditorPreferences;

/// Render the Settings dialog. Returns `true` when the user saved changes.
pub fn render_settings_dialog(
    ctx: &egui::Context,
    show: &mut bool,
    preferences: &mut EditorPreferences,
) -> bool {
    if !*show {
        return false;
    }

    let mut close_dialog = false;
    let mut save_and_close = false;

    egui::Window::new("Settings")
        .collapsible(false)
        .resizable(true)
        .default_size([380.0, 320.0])
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            // Startup section
            ui.heading("Startup");
            ui.separator();

            ui.checkbox(
                &mut preferences.auto_open_last_tilemap,
                "Auto-open last tilemap on startup",
            );

            ui.add_space(16.0);

            // History section
            ui.heading("History");
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Undo steps:");
                ui.add(egui::DragValue::new(&mut preferences.history_limit).range(0..=1000));
            });
            ui.small("0 keeps every step");

            ui.add_space(16.0);

            // Default View Settings section
            ui.heading("Default View Settings");
            ui.separator();

            ui.checkbox(&mut preferences.draw_screen_bounds, "Draw screen bounds");
            ui.checkbox(&mut preferences.show_grid, "Show grid");

            ui.horizontal(|ui| {
                ui.label("Map Zoom:");
                ui.add(egui::Slider::new(&mut preferences.zoom, 1.0..=8.0).suffix("x"));
            });
            ui.horizontal(|ui| {
                ui.label("Tileset Zoom:");
                ui.add(egui::Slider::new(&mut preferences.picker_zoom, 1.0..=6.0).suffix("x"));
            });

            ui.add_space(16.0);

            // Recent Tilemaps section
            ui.heading("Recent Tilemaps");
            ui.separator();

            if preferences.recent_tilemaps.is_empty() {
                ui.label("No recent tilemaps");
            } else {
                ui.label(format!(
                    "{} recent tilemap(s)",
                    preferences.recent_tilemaps.len()
                ));
            }

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    save_and_close = true;
                }
                if ui.button("Cancel").clicked() {
                    close_dialog = true;
                }
            });
        });

    if save_and_close {
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
        *show = false;
        return true;
    }

    if close_dialog {
        // Reload preferences to discard changes
        *preferences = EditorPreferences::load();
        *show = false;
    }

    false
}
