//! Standalone tilemap editor binary
//!
//! Run with: parallax_editor --tilemap <FILE> --palettes <DIR> --primary <PNG> --secondary <PNG>

use bevy::image::{ImageFilterMode, ImageSamplerDescriptor};
use bevy::prelude::*;
use bevy::window::WindowResolution;
use clap::Parser;
use parallax_editor::{EditorPlugin, StartupFiles};
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about = "Tile map editor for 32x32 palette-indexed maps")]
pub struct Cli {
    #[arg(help = "Tilemap file to open (2048 bytes)", long)]
    tilemap: Option<PathBuf>,

    #[arg(help = "Folder holding 00.pal through 15.pal", long)]
    palettes: Option<PathBuf>,

    #[arg(help = "Primary tileset image (128x256, grayscale)", long)]
    primary: Option<PathBuf>,

    #[arg(help = "Secondary tileset image (128x256, grayscale)", long)]
    secondary: Option<PathBuf>,

    #[arg(help = "Undo steps to keep, 0 for unlimited", long)]
    history_limit: Option<usize>,
}

fn main() {
    let cli = Cli::parse();

    let mut editor = EditorPlugin::new().with_startup_files(StartupFiles {
        tilemap: cli.tilemap,
        palette_dir: cli.palettes,
        primary_tileset: cli.primary,
        secondary_tileset: cli.secondary,
    });
    if let Some(limit) = cli.history_limit {
        editor = editor.with_history_limit(limit);
    }

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Parallax Editor".to_string(),
                        resolution: WindowResolution::new(1440, 900),
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin {
                    // Pixel art: point sampling everywhere
                    default_sampler: ImageSamplerDescriptor {
                        mag_filter: ImageFilterMode::Nearest,
                        min_filter: ImageFilterMode::Nearest,
                        mipmap_filter: ImageFilterMode::Nearest,
                        ..default()
                    },
                }),
        )
        .add_plugins(editor)
        .run();
}
