//! Dialog windows and file actions

use bevy_egui::egui;
use parallax_core::{EditorCommand, SheetSlot};

use crate::project::Project;
use crate::EditorState;

/// Actions that can be triggered from menus and shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    OpenTilemap,
    OpenPaletteFolder,
    OpenTileset(SheetSlot),
    Save,
    SaveAs,
    Undo,
    Redo,
    ToggleFlipX,
    ToggleFlipY,
    PreviousPalette,
    NextPalette,
    Exit,
}

impl From<EditorCommand> for PendingAction {
    fn from(command: EditorCommand) -> Self {
        match command {
            EditorCommand::OpenTilemap => PendingAction::OpenTilemap,
            EditorCommand::OpenPaletteFolder => PendingAction::OpenPaletteFolder,
            EditorCommand::OpenPrimaryTileset => PendingAction::OpenTileset(SheetSlot::Primary),
            EditorCommand::OpenSecondaryTileset => {
                PendingAction::OpenTileset(SheetSlot::Secondary)
            }
            EditorCommand::Save => PendingAction::Save,
            EditorCommand::SaveAs => PendingAction::SaveAs,
            EditorCommand::Undo => PendingAction::Undo,
            EditorCommand::Redo => PendingAction::Redo,
            EditorCommand::ToggleFlipX => PendingAction::ToggleFlipX,
            EditorCommand::ToggleFlipY => PendingAction::ToggleFlipY,
            EditorCommand::PreviousPalette => PendingAction::PreviousPalette,
            EditorCommand::NextPalette => PendingAction::NextPalette,
        }
    }
}

/// Render all dialogs
pub fn render_dialogs(ctx: &egui::Context, editor_state: &mut EditorState, project: &mut Project) {
    render_about_dialog(ctx, editor_state);
    render_error_dialog(ctx, editor_state);

    // Handle pending file actions
    if let Some(action) = editor_state.pending_action.take() {
        match action {
            PendingAction::OpenTilemap => {
                #[cfg(feature = "native")]
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Tilemap", &["bin", "map"])
                        .add_filter("All files", &["*"])
                        .pick_file()
                    {
                        match project.open_tilemap(&path) {
                            Ok(()) => {
                                // Add to recent tilemaps
                                editor_state.pending_add_recent_tilemap = Some(path);
                            }
                            Err(e) => {
                                editor_state.error_message =
                                    Some(format!("Failed to open tilemap: {}", e));
                            }
                        }
                    }
                }
            }
            PendingAction::OpenPaletteFolder => {
                #[cfg(feature = "native")]
                {
                    let mut dialog = rfd::FileDialog::new();
                    if let Some(dir) = &project.palette_dir {
                        dialog = dialog.set_directory(dir);
                    }
                    if let Some(dir) = dialog.pick_folder() {
                        match project.load_palette_dir(&dir) {
                            Ok(0) => {
                                editor_state.error_message = Some(format!(
                                    "No palette files (00.pal - 15.pal) found in {}",
                                    dir.display()
                                ));
                            }
                            Ok(_) => {}
                            Err(e) => {
                                editor_state.error_message =
                                    Some(format!("Failed to load palettes: {}", e));
                            }
                        }
                    }
                }
            }
            PendingAction::OpenTileset(slot) => {
                #[cfg(feature = "native")]
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Image", &["png", "bmp"])
                        .pick_file()
                    {
                        if let Err(e) = project.load_tileset(slot, &path) {
                            editor_state.error_message =
                                Some(format!("Failed to load tileset: {}", e));
                        }
                    }
                }
                #[cfg(not(feature = "native"))]
                let _ = slot;
            }
            PendingAction::Save => {
                if project.session.path().is_some() {
                    if let Err(e) = project.save_current() {
                        editor_state.error_message = Some(format!("Failed to save: {}", e));
                    }
                } else {
                    // No path set, trigger Save As
                    editor_state.pending_action = Some(PendingAction::SaveAs);
                }
            }
            PendingAction::SaveAs => {
                #[cfg(feature = "native")]
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Tilemap", &["bin", "map"])
                        .set_file_name(project.name())
                        .save_file()
                    {
                        match project.save_tilemap(&path) {
                            Ok(()) => {
                                editor_state.pending_add_recent_tilemap = Some(path);
                            }
                            Err(e) => {
                                editor_state.error_message = Some(format!("Failed to save: {}", e));
                            }
                        }
                    }
                }
            }
            _ => {
                // Put other actions back
                editor_state.pending_action = Some(action);
            }
        }
    }
}

fn render_about_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    if !editor_state.show_about_dialog {
        return;
    }

    egui::Window::new("About parallax_editor")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("parallax_editor");
            ui.label("A tile map editor for 32x32 palette-indexed maps");
            ui.separator();
            ui.label("Left drag on the map: paint");
            ui.label("Right drag on the map: copy a block");
            ui.label("Right click on the map: pick a tile");
            ui.label("Drag on the tileset: select tiles");
            ui.separator();
            if ui.button("Close").clicked() {
                editor_state.show_about_dialog = false;
            }
        });
}

fn render_error_dialog(ctx: &egui::Context, editor_state: &mut EditorState) {
    let Some(error_msg) = editor_state.error_message.clone() else {
        return;
    };

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label(&error_msg);
            ui.separator();
            if ui.button("OK").clicked() {
                editor_state.error_message = None;
            }
        });
}
