//! Overlay colours shared by the map and tileset panes

use bevy_egui::egui::{Color32, Stroke};

pub struct EditorTheme;

impl EditorTheme {
    /// Primary accent blue, used for the active brush selection
    pub const ACCENT_BLUE: Color32 = Color32::from_rgb(66, 135, 245);

    /// Rectangle being dragged out
    pub const DRAG_RECT: Color32 = Color32::from_rgb(250, 200, 60);

    /// Brush footprint under the pointer
    pub const HOVER: Color32 = Color32::from_rgba_premultiplied(200, 200, 200, 160);

    /// 240x160 visible screen area
    pub const SCREEN_BOUNDS: Color32 = Color32::from_rgb(230, 70, 70);

    /// Tile grid lines
    pub const GRID: Color32 = Color32::from_rgba_premultiplied(40, 40, 40, 90);

    /// Line between the primary and secondary sheets in the picker
    pub const SHEET_DIVIDER: Color32 = Color32::from_rgb(120, 120, 130);

    pub fn stroke(color: Color32) -> Stroke {
        Stroke::new(2.0, color)
    }
}
