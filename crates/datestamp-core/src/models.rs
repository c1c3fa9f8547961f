//! Core data models for watermarking operations

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Opacity of the watermark text (about 78%)
pub const TEXT_ALPHA: u8 = 200;

/// Watermark text colors.
///
/// Parsing by name never fails: unknown names become [`WatermarkColor::White`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WatermarkColor {
    #[default]
    White,
    Black,
    Red,
    Blue,
    Green,
}

impl WatermarkColor {
    pub const ALL: [WatermarkColor; 5] = [
        WatermarkColor::White,
        WatermarkColor::Black,
        WatermarkColor::Red,
        WatermarkColor::Blue,
        WatermarkColor::Green,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "white" => WatermarkColor::White,
            "black" => WatermarkColor::Black,
            "red" => WatermarkColor::Red,
            "blue" => WatermarkColor::Blue,
            "green" => WatermarkColor::Green,
            _ => WatermarkColor::White,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WatermarkColor::White => "white",
            WatermarkColor::Black => "black",
            WatermarkColor::Red => "red",
            WatermarkColor::Blue => "blue",
            WatermarkColor::Green => "green",
        }
    }

    /// RGBA value the text is drawn with
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            WatermarkColor::White => [255, 255, 255, TEXT_ALPHA],
            WatermarkColor::Black => [0, 0, 0, TEXT_ALPHA],
            WatermarkColor::Red => [255, 0, 0, TEXT_ALPHA],
            WatermarkColor::Blue => [0, 0, 255, TEXT_ALPHA],
            WatermarkColor::Green => [0, 255, 0, TEXT_ALPHA],
        }
    }
}

impl From<String> for WatermarkColor {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<WatermarkColor> for String {
    fn from(color: WatermarkColor) -> Self {
        color.name().to_string()
    }
}

impl fmt::Display for WatermarkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Watermark anchor points.
///
/// Parsing by name never fails: unknown names become
/// [`WatermarkPosition::BottomRight`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    Center,
    BottomLeft,
    #[default]
    BottomRight,
}

impl WatermarkPosition {
    pub const ALL: [WatermarkPosition; 5] = [
        WatermarkPosition::TopLeft,
        WatermarkPosition::TopRight,
        WatermarkPosition::Center,
        WatermarkPosition::BottomLeft,
        WatermarkPosition::BottomRight,
    ];

    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "top-left" => WatermarkPosition::TopLeft,
            "top-right" => WatermarkPosition::TopRight,
            "center" => WatermarkPosition::Center,
            "bottom-left" => WatermarkPosition::BottomLeft,
            _ => WatermarkPosition::BottomRight,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WatermarkPosition::TopLeft => "top-left",
            WatermarkPosition::TopRight => "top-right",
            WatermarkPosition::Center => "center",
            WatermarkPosition::BottomLeft => "bottom-left",
            WatermarkPosition::BottomRight => "bottom-right",
        }
    }
}

impl From<String> for WatermarkPosition {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<WatermarkPosition> for String {
    fn from(position: WatermarkPosition) -> Self {
        position.name().to_string()
    }
}

impl fmt::Display for WatermarkPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything needed to stamp one image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkSpec {
    pub text: String,
    pub font_size: u32,
    pub color: WatermarkColor,
    pub position: WatermarkPosition,
}

impl WatermarkSpec {
    pub fn new(text: impl Into<String>, font_size: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            color: WatermarkColor::default(),
            position: WatermarkPosition::default(),
        }
    }

    pub fn with_color(mut self, color: WatermarkColor) -> Self {
        self.color = color;
        self
    }

    pub fn with_position(mut self, position: WatermarkPosition) -> Self {
        self.position = position;
        self
    }
}

/// Where the text landed and how large it measured.
///
/// Coordinates are signed: text larger than the image overflows instead of
/// being clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementResult {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Result of stamping a single file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub source: PathBuf,
    pub output: PathBuf,
    pub watermark_text: String,
    pub result: std::result::Result<PlacementResult, String>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Batch processing result
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub output_dir: Option<PathBuf>,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_palette() {
        assert_eq!(WatermarkColor::White.rgba(), [255, 255, 255, 200]);
        assert_eq!(WatermarkColor::Black.rgba(), [0, 0, 0, 200]);
        assert_eq!(WatermarkColor::Red.rgba(), [255, 0, 0, 200]);
        assert_eq!(WatermarkColor::Blue.rgba(), [0, 0, 255, 200]);
        assert_eq!(WatermarkColor::Green.rgba(), [0, 255, 0, 200]);
    }

    #[test]
    fn test_unknown_names_fall_back() {
        assert_eq!(WatermarkColor::from_name("magenta"), WatermarkColor::White);
        assert_eq!(WatermarkColor::from_name(""), WatermarkColor::White);
        assert_eq!(WatermarkPosition::from_name("middle"), WatermarkPosition::BottomRight);
        assert_eq!(WatermarkPosition::from_name("top"), WatermarkPosition::BottomRight);
    }

    #[test]
    fn test_names_round_trip() {
        for color in WatermarkColor::ALL {
            assert_eq!(WatermarkColor::from_name(color.name()), color);
        }
        for position in WatermarkPosition::ALL {
            assert_eq!(WatermarkPosition::from_name(position.name()), position);
        }
    }

    #[test]
    fn test_spec_builder() {
        let spec = WatermarkSpec::new("2024-03-05", 32)
            .with_color(WatermarkColor::Blue)
            .with_position(WatermarkPosition::Center);
        assert_eq!(spec.text, "2024-03-05");
        assert_eq!(spec.font_size, 32);
        assert_eq!(spec.color, WatermarkColor::Blue);
        assert_eq!(spec.position, WatermarkPosition::Center);
    }

    #[test]
    fn test_batch_report_counts() {
        let ok = FileOutcome {
            source: PathBuf::from("a.jpg"),
            output: PathBuf::from("out/watermark_a.jpg"),
            watermark_text: "2024-01-01".to_string(),
            result: Ok(PlacementResult { x: 1, y: 2, width: 3, height: 4 }),
        };
        let bad = FileOutcome {
            result: Err("corrupt".to_string()),
            ..ok.clone()
        };
        let report = BatchReport {
            output_dir: None,
            outcomes: vec![ok.clone(), bad, ok],
        };
        assert_eq!(report.total(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.failures().count(), 1);
    }
}
