//! Utility functions and helpers

use crate::error::Result;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// File utilities
pub mod file {
    use super::*;

    /// Prefix added to every stamped file name
    pub const OUTPUT_PREFIX: &str = "watermark_";

    /// Suffix of the output directory name
    pub const OUTPUT_DIR_SUFFIX: &str = "_watermark";

    /// Ensure a directory exists, creating it if necessary
    pub fn ensure_directory_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        Ok(())
    }

    /// `<dir>/<dir name>_watermark`
    pub fn output_directory(input_dir: &Path) -> PathBuf {
        let name = input_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        input_dir.join(format!("{}{}", name, OUTPUT_DIR_SUFFIX))
    }

    /// `<output dir>/watermark_<file name>`
    pub fn output_file(output_dir: &Path, source: &Path) -> PathBuf {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        output_dir.join(format!("{}{}", OUTPUT_PREFIX, name))
    }

    /// Write `bytes` to `path`, removing whatever a failed write left behind
    pub fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
        if let Err(e) = std::fs::write(path, bytes) {
            let _ = std::fs::remove_file(path);
            return Err(e.into());
        }
        Ok(())
    }
}

/// Image format detection and utilities
pub mod format {
    use super::*;

    /// Extensions picked up when scanning a directory
    pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tiff", "webp"];

    /// Check a path's extension against [`SUPPORTED_EXTENSIONS`], ignoring case
    pub fn has_supported_extension(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                SUPPORTED_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}

/// Performance monitoring utilities
pub mod performance {
    use super::*;
    use std::time::Instant;

    /// Simple performance timer
    pub struct Timer {
        start: Instant,
        name: String,
    }

    impl Timer {
        pub fn new(name: impl Into<String>) -> Self {
            Self {
                start: Instant::now(),
                name: name.into(),
            }
        }

        pub fn elapsed(&self) -> Duration {
            self.start.elapsed()
        }

        pub fn elapsed_ms(&self) -> u128 {
            self.elapsed().as_millis()
        }
    }

    impl Drop for Timer {
        fn drop(&mut self) {
            tracing::debug!("Timer '{}' elapsed: {}ms", self.name, self.elapsed_ms());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_supported_extensions() {
        assert!(format::has_supported_extension(Path::new("a.jpg")));
        assert!(format::has_supported_extension(Path::new("a.JPEG")));
        assert!(format::has_supported_extension(Path::new("dir/a.Tiff")));
        assert!(format::has_supported_extension(Path::new("a.webp")));
        assert!(!format::has_supported_extension(Path::new("a.tif")));
        assert!(!format::has_supported_extension(Path::new("a.gif")));
        assert!(!format::has_supported_extension(Path::new("notes.txt")));
        assert!(!format::has_supported_extension(Path::new("jpg")));
    }

    #[test]
    fn test_output_naming() {
        let dir = Path::new("/photos/holiday");
        let out_dir = file::output_directory(dir);
        assert_eq!(out_dir, Path::new("/photos/holiday/holiday_watermark"));
        assert_eq!(
            file::output_file(&out_dir, Path::new("/photos/holiday/IMG_01.JPG")),
            Path::new("/photos/holiday/holiday_watermark/watermark_IMG_01.JPG")
        );
    }

    #[test]
    fn test_ensure_directory_exists() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        file::ensure_directory_exists(&nested).unwrap();
        assert!(nested.is_dir());
        // Reusing an existing directory is fine
        file::ensure_directory_exists(&nested).unwrap();
    }

    #[test]
    fn test_write_output_reports_failure() {
        let temp_dir = tempdir().unwrap();
        let target = temp_dir.path().join("missing_dir").join("out.png");

        assert!(file::write_output(&target, b"data").is_err());
        assert!(!target.exists());
    }

    #[test]
    fn test_timer() {
        let timer = performance::Timer::new("test");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.elapsed_ms() >= 5);
    }
}
