//! Menu bar UI

use bevy_egui::egui;
use parallax_core::{EditorCommand, SheetSlot, ShortcutTable};
use std::path::PathBuf;

use super::PendingAction;
use crate::preferences::EditorPreferences;
use crate::project::Project;
use crate::EditorState;

/// Menu button showing the command's keyboard shortcut
fn command_button(
    ui: &mut egui::Ui,
    label: &str,
    command: EditorCommand,
    shortcuts: &ShortcutTable,
    enabled: bool,
) -> bool {
    let mut button = egui::Button::new(label);
    if let Some(accel) = command.label(shortcuts) {
        button = button.shortcut_text(accel);
    }
    ui.add_enabled(enabled, button).clicked()
}

/// Render the menu bar
pub fn render_menu_bar(
    ctx: &egui::Context,
    editor_state: &mut EditorState,
    project: &Project,
    preferences: &EditorPreferences,
    shortcuts: &ShortcutTable,
) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            // File menu
            ui.menu_button("File", |ui| {
                if command_button(ui, "Open Tilemap...", EditorCommand::OpenTilemap, shortcuts, true)
                {
                    editor_state.pending_action = Some(PendingAction::OpenTilemap);
                    ui.close();
                }

                // Open Recent submenu
                ui.menu_button("Open Recent", |ui| {
                    if preferences.recent_tilemaps.is_empty() {
                        ui.label("(No recent tilemaps)");
                    } else {
                        for recent in &preferences.recent_tilemaps {
                            if ui.button(&recent.name).on_hover_text(&recent.path).clicked() {
                                editor_state.pending_open_recent_tilemap =
                                    Some(PathBuf::from(&recent.path));
                                ui.close();
                            }
                        }
                        ui.separator();
                        if ui.button("Clear Recent Tilemaps").clicked() {
                            editor_state.pending_clear_recent_tilemaps = true;
                            ui.close();
                        }
                    }
                });

                ui.separator();
                if command_button(ui, "Save", EditorCommand::Save, shortcuts, true) {
                    editor_state.pending_action = Some(PendingAction::Save);
                    ui.close();
                }
                if command_button(ui, "Save As...", EditorCommand::SaveAs, shortcuts, true) {
                    editor_state.pending_action = Some(PendingAction::SaveAs);
                    ui.close();
                }
                ui.separator();
                if command_button(
                    ui,
                    "Open Palette Folder...",
                    EditorCommand::OpenPaletteFolder,
                    shortcuts,
                    true,
                ) {
                    editor_state.pending_action = Some(PendingAction::OpenPaletteFolder);
                    ui.close();
                }
                if command_button(
                    ui,
                    "Open Primary Tileset...",
                    EditorCommand::OpenPrimaryTileset,
                    shortcuts,
                    true,
                ) {
                    editor_state.pending_action =
                        Some(PendingAction::OpenTileset(SheetSlot::Primary));
                    ui.close();
                }
                if command_button(
                    ui,
                    "Open Secondary Tileset...",
                    EditorCommand::OpenSecondaryTileset,
                    shortcuts,
                    true,
                ) {
                    editor_state.pending_action =
                        Some(PendingAction::OpenTileset(SheetSlot::Secondary));
                    ui.close();
                }
                ui.separator();
                if ui.button("Settings...").clicked() {
                    editor_state.show_settings_dialog = true;
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    editor_state.pending_action = Some(PendingAction::Exit);
                    ui.close();
                }
            });

            // Edit menu
            ui.menu_button("Edit", |ui| {
                let can_undo = project.session.can_undo();
                let can_redo = project.session.can_redo();

                if command_button(ui, "Undo", EditorCommand::Undo, shortcuts, can_undo) {
                    editor_state.pending_action = Some(PendingAction::Undo);
                    ui.close();
                }
                if command_button(ui, "Redo", EditorCommand::Redo, shortcuts, can_redo) {
                    editor_state.pending_action = Some(PendingAction::Redo);
                    ui.close();
                }
                ui.separator();
                if command_button(ui, "Flip X", EditorCommand::ToggleFlipX, shortcuts, true) {
                    editor_state.pending_action = Some(PendingAction::ToggleFlipX);
                    ui.close();
                }
                if command_button(ui, "Flip Y", EditorCommand::ToggleFlipY, shortcuts, true) {
                    editor_state.pending_action = Some(PendingAction::ToggleFlipY);
                    ui.close();
                }
                if command_button(
                    ui,
                    "Previous Palette",
                    EditorCommand::PreviousPalette,
                    shortcuts,
                    true,
                ) {
                    editor_state.pending_action = Some(PendingAction::PreviousPalette);
                    ui.close();
                }
                if command_button(ui, "Next Palette", EditorCommand::NextPalette, shortcuts, true)
                {
                    editor_state.pending_action = Some(PendingAction::NextPalette);
                    ui.close();
                }
            });

            // View menu
            ui.menu_button("View", |ui| {
                if ui
                    .checkbox(&mut editor_state.draw_screen_bounds, "Screen Bounds")
                    .clicked()
                {
                    ui.close();
                }
                if ui
                    .checkbox(&mut editor_state.show_grid, "Show Grid")
                    .clicked()
                {
                    ui.close();
                }
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label("Map Zoom:");
                    ui.add(egui::Slider::new(&mut editor_state.zoom, 1.0..=8.0).suffix("x"));
                });
                ui.horizontal(|ui| {
                    ui.label("Tileset Zoom:");
                    ui.add(egui::Slider::new(&mut editor_state.picker_zoom, 1.0..=6.0).suffix("x"));
                });
            });

            // Help menu
            ui.menu_button("Help", |ui| {
                if ui.button("About...").clicked() {
                    editor_state.show_about_dialog = true;
                    ui.close();
                }
            });

            // Document status on the right
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let dirty_indicator = if project.is_dirty() { " *" } else { "" };
                ui.label(format!("{}{}", project.name(), dirty_indicator));
            });
        });
    });
}
