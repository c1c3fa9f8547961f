//! Watermark engine: places date text on an image and encodes the result

use crate::config::{ImageFormat, WatermarkSettings, DEFAULT_JPEG_QUALITY, MAX_FONT_SIZE};
use crate::error::{ProcessingError, Result};
use crate::font::{default_font_paths, WatermarkFont};
use crate::models::{PlacementResult, WatermarkPosition, WatermarkSpec};
use crate::utils::{file, performance::Timer};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Distance between the text and the image edge for corner anchors
pub const MARGIN: i32 = 20;

/// How far the backing rectangle extends past the text on each side
pub const BACKING_INSET: i32 = 5;

/// Fill of the backing rectangle (about 39% black)
pub const BACKING_COLOR: Rgba<u8> = Rgba([0, 0, 0, 100]);

/// Position calculator for watermark placement
#[derive(Debug)]
pub struct PositionCalculator;

impl PositionCalculator {
    /// Top-left draw coordinate for text of the given size.
    ///
    /// Corners sit [`MARGIN`] pixels inside the image; center ignores the
    /// margin. Results are not clamped.
    pub fn calculate_position(
        position: WatermarkPosition,
        image_width: u32,
        image_height: u32,
        text_width: u32,
        text_height: u32,
    ) -> (i32, i32) {
        let (w, h) = (image_width as i64, image_height as i64);
        let (tw, th) = (text_width as i64, text_height as i64);
        let margin = MARGIN as i64;

        let (x, y) = match position {
            WatermarkPosition::TopLeft => (margin, margin),
            WatermarkPosition::TopRight => (w - tw - margin, margin),
            WatermarkPosition::Center => ((w - tw).div_euclid(2), (h - th).div_euclid(2)),
            WatermarkPosition::BottomLeft => (margin, h - th - margin),
            WatermarkPosition::BottomRight => (w - tw - margin, h - th - margin),
        };

        (saturate(x), saturate(y))
    }
}

fn saturate(value: i64) -> i32 {
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Backing box around text at `(x, y)`, clipped to the image.
///
/// The box spans `x - BACKING_INSET ..= x + text_width + BACKING_INSET`
/// (same for y). `None` when it lies entirely outside the image.
fn backing_rect(
    x: i32,
    y: i32,
    text_width: u32,
    text_height: u32,
    image_width: u32,
    image_height: u32,
) -> Option<Rect> {
    let inset = BACKING_INSET as i64;
    let left = (x as i64 - inset).max(0);
    let top = (y as i64 - inset).max(0);
    let right = (x as i64 + text_width as i64 + inset).min(image_width as i64 - 1);
    let bottom = (y as i64 + text_height as i64 + inset).min(image_height as i64 - 1);

    if left > right || top > bottom {
        return None;
    }
    Some(Rect::at(left as i32, top as i32).of_size((right - left + 1) as u32, (bottom - top + 1) as u32))
}

/// Watermark processing engine
#[derive(Debug, Clone)]
pub struct WatermarkEngine {
    /// Font files tried in order for every render
    font_paths: Vec<PathBuf>,
    jpeg_quality: u8,
}

impl WatermarkEngine {
    /// Create a new watermark engine
    pub fn new() -> Self {
        Self {
            font_paths: default_font_paths(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn from_settings(settings: &WatermarkSettings) -> Self {
        Self {
            font_paths: settings.font_paths.clone(),
            jpeg_quality: settings.jpeg_quality,
        }
    }

    pub fn with_font_paths(mut self, font_paths: Vec<PathBuf>) -> Self {
        self.font_paths = font_paths;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Stamp `source` and write the result to `output`.
    ///
    /// Nothing is written unless decoding, rendering and encoding all
    /// succeed.
    #[instrument(skip(self, source, output, spec), fields(source = %source.display()))]
    pub fn add_watermark(
        &self,
        source: &Path,
        output: &Path,
        spec: &WatermarkSpec,
    ) -> Result<PlacementResult> {
        let _timer = Timer::new(format!("watermark {}", source.display()));

        if !source.is_file() {
            return Err(ProcessingError::FileNotFound {
                path: source.to_path_buf(),
            });
        }
        if spec.font_size == 0 || spec.font_size > MAX_FONT_SIZE {
            return Err(ProcessingError::InvalidInput {
                message: format!("font size must be between 1 and {}", MAX_FONT_SIZE),
            });
        }

        let format = ImageFormat::from_path(source).ok_or_else(|| ProcessingError::UnsupportedFormat {
            format: source
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_else(|| "<none>".to_string()),
        })?;

        let image = image::open(source)?;
        debug!("Decoded {}x{} image", image.width(), image.height());

        let font = WatermarkFont::resolve(&self.font_paths)?;
        let (stamped, placement) = Self::render(&image, spec, &font);
        let bytes = Self::encode(stamped, format, self.jpeg_quality)?;
        file::write_output(output, &bytes)?;

        debug!(
            "Wrote {} ({} bytes), text at ({}, {}) size {}x{}",
            output.display(),
            bytes.len(),
            placement.x,
            placement.y,
            placement.width,
            placement.height
        );
        Ok(placement)
    }

    /// Draw the backing rectangle and text on a transparent layer and
    /// composite it over `image`.
    pub fn render(
        image: &DynamicImage,
        spec: &WatermarkSpec,
        font: &WatermarkFont,
    ) -> (RgbaImage, PlacementResult) {
        let mut base = image.to_rgba8();
        let (width, height) = base.dimensions();

        let (text_width, text_height) = font.measure(&spec.text, spec.font_size);
        let (x, y) = PositionCalculator::calculate_position(
            spec.position,
            width,
            height,
            text_width,
            text_height,
        );

        let mut layer = RgbaImage::new(width, height);
        if let Some(backing) = backing_rect(x, y, text_width, text_height, width, height) {
            draw_filled_rect_mut(&mut layer, backing, BACKING_COLOR);
        }
        font.draw(&mut layer, Rgba(spec.color.rgba()), x, y, spec.font_size, &spec.text);

        imageops::overlay(&mut base, &layer, 0, 0);

        let placement = PlacementResult {
            x,
            y,
            width: text_width,
            height: text_height,
        };
        (base, placement)
    }

    /// Encode in the source format; formats without alpha are flattened to RGB
    pub fn encode(image: RgbaImage, format: ImageFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        if format.supports_transparency() {
            DynamicImage::ImageRgba8(image).write_to(&mut buffer, format.to_image_format())?;
        } else {
            let rgb = DynamicImage::ImageRgba8(image).into_rgb8();
            match format {
                ImageFormat::Jpeg => {
                    let encoder = JpegEncoder::new_with_quality(&mut buffer, jpeg_quality);
                    rgb.write_with_encoder(encoder)?;
                }
                _ => DynamicImage::ImageRgb8(rgb).write_to(&mut buffer, format.to_image_format())?,
            }
        }

        Ok(buffer.into_inner())
    }
}

impl Default for WatermarkEngine {
    fn default() -> Self {
        Self::new()
    }
}
