//! Font resolution for watermark text
//!
//! Candidate font files are tried in order; the first one that parses wins.
//! When none is usable the DejaVu Sans Mono face compiled into the crate is
//! used, so both variants measure and draw through ab_glyph.

use crate::error::{ProcessingError, Result};
use ab_glyph::{Font, FontRef, FontVec, PxScale};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// DejaVu Sans Mono, see `fonts/LICENSE`
const EMBEDDED_FONT_DATA: &[u8] = include_bytes!("fonts/DejaVuSansMono.ttf");

/// Well-known font locations across macOS, Windows and Linux
pub fn default_font_paths() -> Vec<PathBuf> {
    [
        "Arial.ttf",
        "/System/Library/Fonts/Arial.ttf",
        "C:/Windows/Fonts/arial.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

/// A font able to measure and draw watermark text
pub enum WatermarkFont {
    /// TrueType/OpenType font loaded from disk
    Outline { font: FontVec, source: PathBuf },
    /// Face embedded in the binary
    Builtin(FontRef<'static>),
}

impl WatermarkFont {
    /// Try each candidate in order, falling back to the embedded font
    pub fn resolve(candidates: &[PathBuf]) -> Result<Self> {
        for path in candidates {
            match Self::load(path) {
                Ok(font) => {
                    debug!("Using font {}", path.display());
                    return Ok(font);
                }
                Err(e) => debug!("Skipping font {}: {}", path.display(), e),
            }
        }

        warn!("No usable font found, using the built-in font");
        Self::builtin()
    }

    /// Load a single font file
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let font = FontVec::try_from_vec(data).map_err(|e| ProcessingError::InvalidInput {
            message: format!("{} is not a usable font: {}", path.display(), e),
        })?;

        Ok(WatermarkFont::Outline {
            font,
            source: path.to_path_buf(),
        })
    }

    pub fn builtin() -> Result<Self> {
        let font = FontRef::try_from_slice(EMBEDDED_FONT_DATA).map_err(|e| {
            ProcessingError::InvalidInput {
                message: format!("embedded font is unusable: {}", e),
            }
        })?;
        Ok(WatermarkFont::Builtin(font))
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, WatermarkFont::Builtin(_))
    }

    /// Pixel size of `text` rendered at `size`
    pub fn measure(&self, text: &str, size: u32) -> (u32, u32) {
        match self {
            WatermarkFont::Outline { font, .. } => measure_with(font, text, size),
            WatermarkFont::Builtin(font) => measure_with(font, text, size),
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`
    pub fn draw(&self, canvas: &mut RgbaImage, color: Rgba<u8>, x: i32, y: i32, size: u32, text: &str) {
        let scale = PxScale::from(size as f32);
        match self {
            WatermarkFont::Outline { font, .. } => draw_text_mut(canvas, color, x, y, scale, font, text),
            WatermarkFont::Builtin(font) => draw_text_mut(canvas, color, x, y, scale, font, text),
        }
    }
}

fn measure_with(font: &impl Font, text: &str, size: u32) -> (u32, u32) {
    text_size(PxScale::from(size as f32), font, text)
}

impl std::fmt::Debug for WatermarkFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatermarkFont::Outline { source, .. } => f.debug_tuple("Outline").field(source).finish(),
            WatermarkFont::Builtin(_) => f.write_str("Builtin"),
        }
    }
}
