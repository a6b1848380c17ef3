//! Editor UI components using bevy_egui
//!
//! This module provides the panels, dialogs and menus of the editor window.

mod dialogs;
mod map_view;
mod menu_bar;
mod settings_dialog;
mod theme;
mod tileset;
mod toolbar;

pub use dialogs::*;
pub use map_view::render_map_view;
pub use menu_bar::*;
pub use settings_dialog::render_settings_dialog;
pub use theme::EditorTheme;
pub use tileset::render_tileset_picker;
pub use toolbar::{render_brush_panel, render_status_bar};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::commands::Shortcuts;
use crate::preferences::EditorPreferences;
use crate::project::Project;
use crate::render::RenderState;
use crate::tools::PointerTracker;
use crate::EditorState;

/// Main UI plugin
pub struct EditorUiPlugin;

impl Plugin for EditorUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, process_edit_actions)
            .add_systems(EguiPrimaryContextPass, render_ui);
    }
}

/// Draw the whole editor window
pub fn render_ui(
    mut contexts: EguiContexts,
    mut editor_state: ResMut<EditorState>,
    mut project: ResMut<Project>,
    mut preferences: ResMut<EditorPreferences>,
    render_state: Res<RenderState>,
    mut tracker: ResMut<PointerTracker>,
    shortcuts: Res<Shortcuts>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    // Menu bar
    render_menu_bar(ctx, &mut editor_state, &project, &preferences, &shortcuts.0);

    // Settings dialog
    if render_settings_dialog(
        ctx,
        &mut editor_state.show_settings_dialog,
        &mut preferences,
    ) {
        project.session.history.set_limit(preferences.history_limit);
        editor_state.zoom = preferences.zoom;
        editor_state.picker_zoom = preferences.picker_zoom;
        editor_state.draw_screen_bounds = preferences.draw_screen_bounds;
        editor_state.show_grid = preferences.show_grid;
    }

    // Left panel - Tileset picker
    egui::SidePanel::left("tileset_picker")
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            render_tileset_picker(ui, &editor_state, &mut project, &render_state, &mut tracker);
        });

    // Right panel - Brush
    egui::SidePanel::right("brush_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            render_brush_panel(ui, &mut project);
        });

    render_status_bar(ctx, &editor_state, &project);

    // Central area - the map
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(egui::Color32::from_rgb(30, 30, 35)))
        .show(ctx, |ui| {
            render_map_view(ui, &mut editor_state, &mut project, &render_state, &mut tracker);
        });

    // Dialogs and file actions
    render_dialogs(ctx, &mut editor_state, &mut project);
}

/// Handle actions that only touch the open document
fn process_edit_actions(
    mut editor_state: ResMut<EditorState>,
    mut project: ResMut<Project>,
    mut exit: MessageWriter<AppExit>,
) {
    let Some(action) = editor_state.pending_action.take() else {
        return;
    };

    match action {
        PendingAction::Undo => {
            project.undo();
        }
        PendingAction::Redo => {
            project.redo();
        }
        PendingAction::ToggleFlipX => project.toggle_flip_x(),
        PendingAction::ToggleFlipY => project.toggle_flip_y(),
        PendingAction::PreviousPalette => project.cycle_palette(-1),
        PendingAction::NextPalette => project.cycle_palette(1),
        PendingAction::Exit => {
            if project.is_dirty() {
                bevy::log::warn!("Exiting with unsaved changes to {}", project.name());
            }
            exit.write(AppExit::Success);
        }
        // File operations are handled in dialogs.rs
        _ => {
            editor_state.pending_action = Some(action);
        }
    }
}
