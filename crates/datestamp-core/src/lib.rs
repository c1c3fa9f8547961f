//! # Datestamp Core
//!
//! Stamps images with the date taken from their file metadata: resolves the
//! date, renders it over a translucent backing box at one of five anchor
//! points and writes the stamped copy next to the originals.

pub mod config;
pub mod error;
pub mod font;
pub mod logging;
pub mod models;
pub mod processing;
pub mod progress;
pub mod timestamp;
pub mod utils;
pub mod watermark_engine;

// Re-export commonly used types
pub use config::*;
pub use error::*;
pub use font::WatermarkFont;
pub use logging::*;
pub use models::*;
pub use processing::BatchProcessor;
pub use progress::BatchProgress;
pub use timestamp::{resolve_date, resolve_date_with, TimestampField, UNKNOWN_DATE};
pub use watermark_engine::{PositionCalculator, WatermarkEngine};

/// Initialize the core library with the given default log level
pub fn init(default_log_level: &str) -> Result<()> {
    logging::init_logging(default_log_level)?;

    tracing::debug!("Datestamp core {} initialized", version());
    Ok(())
}

/// Get the version of the core library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
