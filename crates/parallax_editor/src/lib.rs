//! parallax_editor - Tile map editor for 32x32 palette-indexed maps
//!
//! This crate provides the desktop editor:
//! - Tilemap open/save in the raw 2048-byte format
//! - Tileset picker with rectangular multi-tile selection
//! - Painting with palette and flip controls
//! - Selection and eyedropper from the map
//! - Undo/redo of whole paint strokes
//! - JASC-PAL palette folders
//!
//! # Usage
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use parallax_editor::EditorPlugin;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(EditorPlugin::new())
//!         .run();
//! }
//! ```

pub mod commands;
pub mod preferences;
pub mod project;
pub mod render;
pub mod tools;
pub mod ui;

pub use parallax_core;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use parallax_core::SheetSlot;
use std::path::PathBuf;

use commands::{handle_keyboard_shortcuts, Shortcuts};
use preferences::EditorPreferences;
use project::Project;
use render::MapRenderPlugin;
use tools::PointerTracker;
use ui::{EditorUiPlugin, PendingAction};

/// Files to load when the editor starts, usually from the command line
#[derive(Resource, Clone, Debug, Default)]
pub struct StartupFiles {
    pub tilemap: Option<PathBuf>,
    pub palette_dir: Option<PathBuf>,
    pub primary_tileset: Option<PathBuf>,
    pub secondary_tileset: Option<PathBuf>,
}

/// Main editor plugin
///
/// # Example
///
/// ```rust,ignore
/// use bevy::prelude::*;
/// use parallax_editor::{EditorPlugin, StartupFiles};
///
/// App::new()
///     .add_plugins(DefaultPlugins)
///     .add_plugins(
///         EditorPlugin::new()
///             .with_history_limit(100)
///             .with_startup_files(StartupFiles {
///                 tilemap: Some("maps/town.bin".into()),
///                 ..Default::default()
///             }),
///     )
///     .run();
/// ```
#[derive(Default)]
pub struct EditorPlugin {
    /// Overrides the saved preference when set. 0 keeps unbounded history.
    pub history_limit: Option<usize>,
    pub startup_files: StartupFiles,
}

impl EditorPlugin {
    /// Create an editor plugin with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of undo steps kept (0 for unbounded)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Files to open on startup. Missing entries fall back to the last session's files.
    pub fn with_startup_files(mut self, files: StartupFiles) -> Self {
        self.startup_files = files;
        self
    }
}

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        // Load user preferences
        let preferences = EditorPreferences::load();
        bevy::log::info!("Loaded editor preferences");

        let history_limit = self.history_limit.unwrap_or(preferences.history_limit);
        let editor_state = EditorState::from_preferences(&preferences);

        app.add_plugins(EguiPlugin::default())
            .add_plugins(EditorUiPlugin)
            .add_plugins(MapRenderPlugin)
            .insert_resource(editor_state)
            .insert_resource(preferences)
            .insert_resource(Project::new(history_limit))
            .insert_resource(self.startup_files.clone())
            .init_resource::<Shortcuts>()
            .init_resource::<PointerTracker>()
            .add_systems(Startup, (setup_editor_camera, load_startup_files))
            .add_systems(Update, (handle_keyboard_shortcuts, handle_recent_tilemaps));
    }
}

/// Global editor state
#[derive(Resource)]
pub struct EditorState {
    // View
    pub zoom: f32,
    pub picker_zoom: f32,
    pub draw_screen_bounds: bool,
    pub show_grid: bool,
    /// Map cell under the pointer
    pub hovered_cell: Option<(usize, usize)>,

    // Dialogs
    pub show_settings_dialog: bool,
    pub show_about_dialog: bool,
    pub error_message: Option<String>,

    // Recent tilemaps handling
    pub pending_add_recent_tilemap: Option<PathBuf>,
    pub pending_open_recent_tilemap: Option<PathBuf>,
    pub pending_clear_recent_tilemaps: bool,

    // Pending actions
    pub pending_action: Option<PendingAction>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::from_preferences(&EditorPreferences::default())
    }
}

impl EditorState {
    pub fn from_preferences(preferences: &EditorPreferences) -> Self {
        Self {
            zoom: preferences.zoom,
            picker_zoom: preferences.picker_zoom,
            draw_screen_bounds: preferences.draw_screen_bounds,
            show_grid: preferences.show_grid,
            hovered_cell: None,

            show_settings_dialog: false,
            show_about_dialog: false,
            error_message: None,

            pending_add_recent_tilemap: None,
            pending_open_recent_tilemap: None,
            pending_clear_recent_tilemaps: false,

            pending_action: None,
        }
    }
}

/// Spawns the editor camera if one doesn't exist
fn setup_editor_camera(mut commands: Commands, camera_query: Query<&Camera2d>) {
    if camera_query.is_empty() {
        commands.spawn(Camera2d);
    }
}

/// Load command-line files, falling back to the files used last time
fn load_startup_files(
    files: Res<StartupFiles>,
    mut project: ResMut<Project>,
    mut editor_state: ResMut<EditorState>,
    preferences: Res<EditorPreferences>,
) {
    let mut errors = Vec::new();

    // Remembered paths are skipped quietly once they disappear; explicit ones report errors
    let given_or_last = |given: &Option<PathBuf>, last: &Option<PathBuf>| {
        given
            .clone()
            .or_else(|| last.clone().filter(|p| p.exists()))
    };

    let palette_dir = given_or_last(&files.palette_dir, &preferences.last_palette_dir);
    if let Some(dir) = palette_dir {
        if let Err(e) = project.load_palette_dir(&dir) {
            errors.push(format!("Failed to load palettes: {}", e));
        }
    }

    let sheets = [
        (
            SheetSlot::Primary,
            given_or_last(&files.primary_tileset, &preferences.last_primary_tileset),
        ),
        (
            SheetSlot::Secondary,
            given_or_last(&files.secondary_tileset, &preferences.last_secondary_tileset),
        ),
    ];
    for (slot, path) in sheets {
        if let Some(path) = path {
            if let Err(e) = project.load_tileset(slot, &path) {
                errors.push(format!("Failed to load tileset: {}", e));
            }
        }
    }

    let tilemap = files.tilemap.clone().or_else(|| {
        preferences
            .auto_open_last_tilemap
            .then(|| preferences.last_tilemap().map(|r| PathBuf::from(&r.path)))
            .flatten()
            .filter(|p| p.exists())
    });
    if let Some(path) = tilemap {
        match project.open_tilemap(&path) {
            Ok(()) => editor_state.pending_add_recent_tilemap = Some(path),
            Err(e) => errors.push(format!("Failed to open tilemap {}: {}", path.display(), e)),
        }
    }

    if !errors.is_empty() {
        for e in &errors {
            bevy::log::warn!("{}", e);
        }
        editor_state.error_message = Some(errors.join("\n"));
    }
}

/// System to handle recent tilemap and last-used file bookkeeping
fn handle_recent_tilemaps(
    mut editor_state: ResMut<EditorState>,
    mut preferences: ResMut<EditorPreferences>,
    mut project: ResMut<Project>,
) {
    let mut changed = false;

    // Add tilemap to recent list
    if let Some(path) = editor_state.pending_add_recent_tilemap.take() {
        preferences.add_recent_tilemap(&path);
        changed = true;
    }

    // Open recent tilemap
    if let Some(path) = editor_state.pending_open_recent_tilemap.take() {
        match project.open_tilemap(&path) {
            Ok(()) => preferences.add_recent_tilemap(&path),
            Err(e) => {
                editor_state.error_message = Some(format!("Failed to open tilemap: {}", e));
                // Remove from recent if it can no longer be opened
                preferences.remove_recent_tilemap(&path.to_string_lossy());
            }
        }
        changed = true;
    }

    // Clear recent tilemaps
    if editor_state.pending_clear_recent_tilemaps {
        editor_state.pending_clear_recent_tilemaps = false;
        preferences.clear_recent_tilemaps();
        changed = true;
    }

    // Remember the art in use for the next session
    if project.is_changed() {
        let palette_dir = project.palette_dir.clone();
        let primary = project.primary_tileset.clone();
        let secondary = project.secondary_tileset.clone();
        if preferences.last_palette_dir != palette_dir && palette_dir.is_some() {
            preferences.last_palette_dir = palette_dir;
            changed = true;
        }
        if preferences.last_primary_tileset != primary && primary.is_some() {
            preferences.last_primary_tileset = primary;
            changed = true;
        }
        if preferences.last_secondary_tileset != secondary && secondary.is_some() {
            preferences.last_secondary_tileset = secondary;
            changed = true;
        }
    }

    if changed {
        if let Err(e) = preferences.save() {
            bevy::log::error!("Failed to save preferences: {}", e);
        }
    }
}
