//! Upload the software renderer's frames as egui textures
//!
//! The core renderer composes RGBA frames on the CPU. This module keeps one
//! egui texture per frame and only re-uploads when the frame's version moves.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use parallax_core::{MAP_FRAME_SIZE, PICKER_FRAME_HEIGHT, PICKER_FRAME_WIDTH};

use crate::project::Project;

/// Plugin for map and picker textures
pub struct MapRenderPlugin;

impl Plugin for MapRenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RenderState>().add_systems(
            EguiPrimaryContextPass,
            sync_frame_textures.before(crate::ui::render_ui),
        );
    }
}

/// A texture and the frame version it was uploaded from
pub struct FrameTexture {
    pub handle: egui::TextureHandle,
    version: u64,
}

#[derive(Resource, Default)]
pub struct RenderState {
    pub map: Option<FrameTexture>,
    pub picker: Option<FrameTexture>,
}

impl RenderState {
    pub fn map_texture(&self) -> Option<egui::TextureId> {
        self.map.as_ref().map(|t| t.handle.id())
    }

    pub fn picker_texture(&self) -> Option<egui::TextureId> {
        self.picker.as_ref().map(|t| t.handle.id())
    }
}

fn upload(
    ctx: &egui::Context,
    slot: &mut Option<FrameTexture>,
    name: &str,
    size: [usize; 2],
    rgba: &[u8],
    version: u64,
) {
    if slot.as_ref().is_some_and(|t| t.version == version) {
        return;
    }
    let image = egui::ColorImage::from_rgba_unmultiplied(size, rgba);
    match slot {
        Some(texture) => {
            texture.handle.set(image, egui::TextureOptions::NEAREST);
            texture.version = version;
        }
        None => {
            *slot = Some(FrameTexture {
                handle: ctx.load_texture(name, image, egui::TextureOptions::NEAREST),
                version,
            });
        }
    }
}

/// Redraw the map if needed and push changed frames to the GPU
fn sync_frame_textures(
    mut contexts: EguiContexts,
    mut project: ResMut<Project>,
    mut render_state: ResMut<RenderState>,
) {
    let Ok(ctx) = contexts.ctx_mut() else { return };

    project.render_if_needed();

    let renderer = &project.renderer;
    let map_size = MAP_FRAME_SIZE as usize;
    upload(
        ctx,
        &mut render_state.map,
        "tilemap",
        [map_size, map_size],
        renderer.map_frame(),
        renderer.map_version(),
    );
    upload(
        ctx,
        &mut render_state.picker,
        "tileset_picker",
        [PICKER_FRAME_WIDTH as usize, PICKER_FRAME_HEIGHT as usize],
        renderer.picker_frame(),
        renderer.picker_version(),
    );
}
