//! Configuration management for the watermarking library

use crate::error::{ProcessingError, Result};
use crate::models::{WatermarkColor, WatermarkPosition};
use crate::timestamp::TimestampField;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default watermark font size in pixels
pub const DEFAULT_FONT_SIZE: u32 = 40;

/// Largest accepted font size in pixels
pub const MAX_FONT_SIZE: u32 = 2000;

/// Default JPEG quality for flattened output
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Settings shared by every file of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatermarkSettings {
    pub font_size: u32,
    pub color: WatermarkColor,
    pub position: WatermarkPosition,
    /// Font files tried in order before the built-in font
    pub font_paths: Vec<PathBuf>,
    pub jpeg_quality: u8,
    pub timestamp_field: TimestampField,
    pub parallel: bool,
}

impl Default for WatermarkSettings {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            color: WatermarkColor::default(),
            position: WatermarkPosition::default(),
            font_paths: crate::font::default_font_paths(),
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            timestamp_field: TimestampField::platform_default(),
            parallel: false,
        }
    }
}

impl WatermarkSettings {
    /// Reject values no render could succeed with
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_FONT_SIZE).contains(&self.font_size) {
            return Err(ProcessingError::InvalidInput {
                message: format!("font size {} is outside 1-{}", self.font_size, MAX_FONT_SIZE),
            });
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ProcessingError::InvalidInput {
                message: format!("JPEG quality {} is outside 1-100", self.jpeg_quality),
            });
        }
        Ok(())
    }
}

/// Image formats the tool reads and writes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Detect the format from a path's extension, ignoring case
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();

        match extension.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "webp" => Some(ImageFormat::WebP),
            "bmp" => Some(ImageFormat::Bmp),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::WebP => "webp",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
        }
    }

    /// Check if this format supports transparency
    pub fn supports_transparency(&self) -> bool {
        matches!(self, ImageFormat::Png | ImageFormat::WebP)
    }

    /// The matching encoder selector of the `image` crate
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
        }
    }
}

/// Loads watermark settings from a TOML file
pub struct ConfigManager {
    config_path: PathBuf,
    config: WatermarkSettings,
}

impl ConfigManager {
    /// Load from the per-user config location
    pub fn new() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        Self::with_path(config_path)
    }

    /// Load from a custom path; a missing file yields defaults
    pub fn with_path(config_path: PathBuf) -> Result<Self> {
        let config = Self::load_or_default(&config_path)?;

        Ok(Self {
            config_path,
            config,
        })
    }

    pub fn config(&self) -> &WatermarkSettings {
        &self.config
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn into_config(self) -> WatermarkSettings {
        self.config
    }

    /// Get the default configuration file path
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ProcessingError::ConfigError {
                message: "Could not determine config directory".to_string(),
            })?
            .join("datestamp");

        Ok(config_dir.join("config.toml"))
    }

    fn load_or_default(path: &Path) -> Result<WatermarkSettings> {
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(WatermarkSettings::default());
        }

        let config_str = std::fs::read_to_string(path).map_err(|e| ProcessingError::ConfigError {
            message: format!("Failed to read config file: {}", e),
        })?;

        let config: WatermarkSettings =
            toml::from_str(&config_str).map_err(|e| ProcessingError::ConfigError {
                message: format!("Failed to parse config file: {}", e),
            })?;
        config.validate()?;

        tracing::info!("Configuration loaded from {:?}", path);
        Ok(config)
    }
}
