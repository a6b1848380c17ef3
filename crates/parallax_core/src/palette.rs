//! JASC-PAL palette files
//!
//! ```text
//! JASC-PAL
//! 0100
//! 16
//! 255 0 255
//! ...
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::PALETTE_COUNT;

const JASC_SIGNATURE: &str = "JASC-PAL";
const JASC_VERSION: &str = "0100";
/// Maximum number of colours a JASC-PAL file may declare
pub const MAX_PALETTE_FILE_COLORS: usize = 256;
/// Colours per palette used for rendering
pub const PALETTE_SIZE: usize = 16;

#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid JASC-PAL signature.")]
    InvalidSignature,
    #[error("Unsupported JASC-PAL version.")]
    UnsupportedVersion,
    #[error("Could not parse number of colors.")]
    InvalidColorCount,
    #[error("Unsupported number of colors: {0}. (Color count must be between 1 and 256)")]
    ColorCountOutOfRange(i64),
    #[error("Error parsing color components of color {0}.")]
    InvalidColor(usize),
    #[error("Color {0}: component value must be between 0 and 255.")]
    ComponentOutOfRange(usize),
    #[error("{file}: {source}")]
    InFile {
        file: String,
        #[source]
        source: Box<PaletteError>,
    },
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xFF]
    }
}

/// Sixteen colours selected by a tile's palette field
pub type Palette = [Color; PALETTE_SIZE];

/// Parse the text of a JASC-PAL file into its ordered colour list
pub fn parse_jasc_pal(text: &str) -> Result<Vec<Color>, PaletteError> {
    let mut tokens = text.split_whitespace();

    if tokens.next() != Some(JASC_SIGNATURE) {
        return Err(PaletteError::InvalidSignature);
    }
    if tokens.next() != Some(JASC_VERSION) {
        return Err(PaletteError::UnsupportedVersion);
    }

    let count: i64 = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(PaletteError::InvalidColorCount)?;
    if !(1..=MAX_PALETTE_FILE_COLORS as i64).contains(&count) {
        return Err(PaletteError::ColorCountOutOfRange(count));
    }

    let mut colors = Vec::with_capacity(count as usize);
    for i in 0..count as usize {
        let mut component = || -> Result<u8, PaletteError> {
            let value: i64 = tokens
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or(PaletteError::InvalidColor(i))?;
            u8::try_from(value).map_err(|_| PaletteError::ComponentOutOfRange(i))
        };
        let r = component()?;
        let g = component()?;
        let b = component()?;
        colors.push(Color::new(r, g, b));
    }

    Ok(colors)
}

/// Read and parse a JASC-PAL file
pub fn load_jasc_pal(path: &Path) -> Result<Vec<Color>, PaletteError> {
    let text = std::fs::read_to_string(path)?;
    parse_jasc_pal(&text)
}

/// Fit a parsed colour list into a 16-colour palette, padding with black
pub fn to_palette(colors: &[Color]) -> Palette {
    let mut palette = [Color::BLACK; PALETTE_SIZE];
    for (slot, color) in palette.iter_mut().zip(colors) {
        *slot = *color;
    }
    palette
}

/// File name of palette slot `index` inside a palette folder (`00.pal` .. `15.pal`)
pub fn palette_file_name(index: usize) -> String {
    format!("{:02}.pal", index)
}

/// The sixteen palettes a map can reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteSet {
    palettes: [Palette; PALETTE_COUNT as usize],
}

impl Default for PaletteSet {
    fn default() -> Self {
        // Greyscale ramp so tiles stay visible before any palette is loaded
        let ramp: Palette = std::array::from_fn(|i| {
            let v = (i * 17) as u8;
            Color::new(v, v, v)
        });
        Self {
            palettes: [ramp; PALETTE_COUNT as usize],
        }
    }
}

impl PaletteSet {
    pub fn get(&self, index: u8) -> &Palette {
        &self.palettes[usize::from(index.min(PALETTE_COUNT - 1))]
    }

    pub fn set(&mut self, index: u8, palette: Palette) {
        self.palettes[usize::from(index.min(PALETTE_COUNT - 1))] = palette;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Palette> {
        self.palettes.iter()
    }

    /// Load `00.pal` .. `15.pal` from `dir` on top of the current set.
    ///
    /// Missing files leave their slot unchanged. Any malformed file aborts the
    /// load and leaves `self` untouched. Returns the slots that were replaced.
    pub fn load_dir(&mut self, dir: &Path) -> Result<Vec<u8>, PaletteError> {
        let mut updated = self.clone();
        let mut loaded = Vec::new();

        for index in 0..PALETTE_COUNT {
            let path = dir.join(palette_file_name(usize::from(index)));
            if !path.exists() {
                continue;
            }
            let colors = load_jasc_pal(&path).map_err(|e| PaletteError::InFile {
                file: path.display().to_string(),
                source: Box::new(e),
            })?;
            updated.set(index, to_palette(&colors));
            loaded.push(index);
        }

        *self = updated;
        log::debug!("Loaded {} palettes from {:?}", loaded.len(), dir);
        Ok(loaded)
    }
}
