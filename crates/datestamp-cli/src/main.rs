//! Command-line interface for datestamp

use anyhow::{Context, Result};
use clap::Parser;
use datestamp_core::{
    init, version, BatchProcessor, BatchProgress, ConfigManager, WatermarkColor, WatermarkPosition,
    WatermarkSettings, MAX_FONT_SIZE,
};
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "datestamp")]
#[command(about = "Stamp images with the date they were created")]
#[command(version = version())]
struct Cli {
    /// Image file or directory of images
    path: PathBuf,

    /// Font size in pixels, up to 2000 [default: 40]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=MAX_FONT_SIZE as i64))]
    font_size: Option<u32>,

    /// Watermark color [default: white]
    #[arg(long, value_parser = ["white", "black", "red", "blue", "green"])]
    color: Option<String>,

    /// Watermark position [default: bottom-right]
    #[arg(long, value_parser = ["top-left", "top-right", "center", "bottom-left", "bottom-right"])]
    position: Option<String>,

    /// Process files on all CPU cores
    #[arg(long)]
    parallel: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Command-line values win over the config file
    fn apply_overrides(&self, mut settings: WatermarkSettings) -> WatermarkSettings {
        if let Some(font_size) = self.font_size {
            settings.font_size = font_size;
        }
        if let Some(color) = &self.color {
            settings.color = WatermarkColor::from_name(color);
        }
        if let Some(position) = &self.position {
            settings.position = WatermarkPosition::from_name(position);
        }
        if self.parallel {
            settings.parallel = true;
        }
        settings
    }

    fn load_settings(&self) -> Result<WatermarkSettings> {
        let manager = match &self.config {
            Some(path) => ConfigManager::with_path(path.clone()),
            None => ConfigManager::new(),
        }
        .context("Failed to load configuration")?;
        debug!("Settings source: {}", manager.config_path().display());

        Ok(self.apply_overrides(manager.into_config()))
    }
}

fn print_progress(event: &BatchProgress) {
    match event {
        BatchProgress::NoImagesFound { input } => {
            println!("No images found in {}", input.display());
        }
        BatchProgress::Started { total, output_dir } => {
            println!("Processing {} images...", total);
            println!("Output directory: {}", output_dir.display());
        }
        BatchProgress::FileStarted { index, total, source } => {
            println!("[{}/{}] {}", index + 1, total, file_name(source));
        }
        BatchProgress::FileCompleted { output, .. } => {
            println!("  done: {}", file_name(output));
        }
        BatchProgress::FileFailed { source, error } => {
            println!("  failed: {} ({})", file_name(source), error);
        }
        BatchProgress::Finished { succeeded, total } => {
            println!();
            println!("Done: {}/{} images watermarked", succeeded, total);
        }
    }
}

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init(if cli.verbose { "debug" } else { "info" })?;
    info!("Datestamp v{} starting", version());

    if !cli.path.exists() {
        println!("Path does not exist: {}", cli.path.display());
        return Ok(());
    }

    let settings = cli.load_settings()?;
    debug!(?settings, "Effective settings");

    let report = BatchProcessor::new(settings)
        .run(&cli.path, print_progress)
        .with_context(|| format!("Failed to process {}", cli.path.display()))?;

    info!(
        succeeded = report.succeeded(),
        failed = report.failed(),
        "Batch complete"
    );
    Ok(())
}
