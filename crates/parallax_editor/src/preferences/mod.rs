//! Persisted editor preferences

mod file;

pub use file::PreferencesError;

use bevy::prelude::*;
use parallax_core::DEFAULT_HISTORY_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of entries kept in the recent tilemaps list
pub const MAX_RECENT_TILEMAPS: usize = 10;

/// A recently opened tilemap file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentTilemap {
    pub path: String,
    pub name: String,
}

/// User preferences, loaded at startup and saved from the settings dialog
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Undo steps kept per document; 0 keeps everything
    pub history_limit: usize,
    /// Map pane scale factor
    pub zoom: f32,
    /// Tileset picker scale factor
    pub picker_zoom: f32,
    /// Outline the visible screen area on the map
    pub draw_screen_bounds: bool,
    /// Draw tile grid lines over the map
    pub show_grid: bool,
    pub auto_open_last_tilemap: bool,
    /// Most recent first
    pub recent_tilemaps: Vec<RecentTilemap>,
    pub last_palette_dir: Option<PathBuf>,
    pub last_primary_tileset: Option<PathBuf>,
    pub last_secondary_tileset: Option<PathBuf>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            zoom: 4.0,
            picker_zoom: 3.0,
            draw_screen_bounds: true,
            show_grid: false,
            auto_open_last_tilemap: false,
            recent_tilemaps: Vec::new(),
            last_palette_dir: None,
            last_primary_tileset: None,
            last_secondary_tileset: None,
        }
    }
}

impl EditorPreferences {
    /// Move `path` to the front of the recent list, dropping duplicates and old entries
    pub fn add_recent_tilemap(&mut self, path: &Path) {
        let path_str = path.to_string_lossy().to_string();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path_str.clone());

        self.recent_tilemaps.retain(|r| r.path != path_str);
        self.recent_tilemaps.insert(
            0,
            RecentTilemap {
                path: path_str,
                name,
            },
        );
        self.recent_tilemaps.truncate(MAX_RECENT_TILEMAPS);
    }

    pub fn remove_recent_tilemap(&mut self, path: &str) {
        self.recent_tilemaps.retain(|r| r.path != path);
    }

    pub fn clear_recent_tilemaps(&mut self) {
        self.recent_tilemaps.clear();
    }

    pub fn last_tilemap(&self) -> Option<&RecentTilemap> {
        self.recent_tilemaps.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_tilemaps_dedup_and_order() {
        let mut prefs = EditorPreferences::default();
        prefs.add_recent_tilemap(Path::new("/maps/a.bin"));
        prefs.add_recent_tilemap(Path::new("/maps/b.bin"));
        prefs.add_recent_tilemap(Path::new("/maps/a.bin"));

        let names: Vec<&str> = prefs.recent_tilemaps.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a.bin", "b.bin"]);
        assert_eq!(prefs.last_tilemap().map(|r| r.path.as_str()), Some("/maps/a.bin"));
    }

    #[test]
    fn test_recent_tilemaps_are_capped() {
        let mut prefs = EditorPreferences::default();
        for i in 0..15 {
            prefs.add_recent_tilemap(Path::new(&format!("/maps/{}.bin", i)));
        }
        assert_eq!(prefs.recent_tilemaps.len(), MAX_RECENT_TILEMAPS);
        assert_eq!(prefs.recent_tilemaps[0].name, "14.bin");

        prefs.remove_recent_tilemap("/maps/14.bin");
        assert_eq!(prefs.recent_tilemaps[0].name, "13.bin");
        prefs.clear_recent_tilemaps();
        assert!(prefs.last_tilemap().is_none());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let prefs: EditorPreferences = serde_json::from_str(r#"{ "zoom": 2.0 }"#).unwrap();
        assert_eq!(prefs.zoom, 2.0);
        assert_eq!(prefs.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(prefs.picker_zoom, 3.0);
    }
}
