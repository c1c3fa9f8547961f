//! Batch driver: discovers images and stamps each one independently

use crate::config::WatermarkSettings;
use crate::error::{ProcessingError, Result};
use crate::models::{BatchReport, FileOutcome, WatermarkSpec};
use crate::progress::BatchProgress;
use crate::timestamp::resolve_date_with;
use crate::utils::{file, format};
use crate::watermark_engine::WatermarkEngine;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{error, info, instrument, warn};

/// Watermarks a single image or every supported image of a directory
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    settings: WatermarkSettings,
    engine: WatermarkEngine,
}

impl BatchProcessor {
    pub fn new(settings: WatermarkSettings) -> Self {
        let engine = WatermarkEngine::from_settings(&settings);
        Self { settings, engine }
    }

    pub fn settings(&self) -> &WatermarkSettings {
        &self.settings
    }

    /// Files to process for `input`.
    ///
    /// A file is taken as-is. A directory contributes its immediate children
    /// with a supported extension, sorted by name.
    pub fn discover_images(input: &Path) -> Result<Vec<PathBuf>> {
        if !input.exists() {
            return Err(ProcessingError::FileNotFound {
                path: input.to_path_buf(),
            });
        }
        if input.is_file() {
            return Ok(vec![input.to_path_buf()]);
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(input)?
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", input.display(), e);
                    None
                }
            })
            .filter(|path| path.is_file() && format::has_supported_extension(path))
            .collect();
        files.sort();

        Ok(files)
    }

    /// Directory the stamped copies of `input` are written to
    pub fn output_dir_for(input: &Path) -> PathBuf {
        let input_dir = if input.is_file() {
            input.parent().unwrap_or_else(|| Path::new("."))
        } else {
            input
        };
        // A bare file name has an empty parent
        let input_dir = if input_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            input_dir
        };
        // `.` and `..` have no file name of their own
        if input_dir.file_name().is_none() {
            if let Ok(dir) = input_dir.canonicalize() {
                return file::output_directory(&dir);
            }
        }
        file::output_directory(input_dir)
    }

    /// Stamp every discovered image under `input`.
    ///
    /// Only a missing input or an output directory that cannot be created
    /// fails the whole run; per-file failures are recorded in the report.
    #[instrument(skip(self, input, on_progress), fields(input = %input.display()))]
    pub fn run<F>(&self, input: &Path, on_progress: F) -> Result<BatchReport>
    where
        F: Fn(&BatchProgress) + Sync,
    {
        self.settings.validate()?;
        let files = Self::discover_images(input)?;

        if files.is_empty() {
            info!("No images found in {}", input.display());
            on_progress(&BatchProgress::NoImagesFound {
                input: input.to_path_buf(),
            });
            return Ok(BatchReport::default());
        }

        let output_dir = Self::output_dir_for(input);
        file::ensure_directory_exists(&output_dir)?;

        let total = files.len();
        info!("Processing {} images into {}", total, output_dir.display());
        on_progress(&BatchProgress::Started {
            total,
            output_dir: output_dir.clone(),
        });

        let process = |(index, source): (usize, &PathBuf)| {
            on_progress(&BatchProgress::FileStarted {
                index,
                total,
                source: source.clone(),
            });
            let outcome = self.process_file(source, &output_dir);
            match &outcome.result {
                Ok(_) => on_progress(&BatchProgress::FileCompleted {
                    source: outcome.source.clone(),
                    output: outcome.output.clone(),
                }),
                Err(e) => on_progress(&BatchProgress::FileFailed {
                    source: outcome.source.clone(),
                    error: e.clone(),
                }),
            }
            outcome
        };

        let outcomes: Vec<FileOutcome> = if self.settings.parallel {
            files.par_iter().enumerate().map(process).collect()
        } else {
            files.iter().enumerate().map(process).collect()
        };

        let report = BatchReport {
            output_dir: Some(output_dir),
            outcomes,
        };
        info!("Finished: {}/{} images watermarked", report.succeeded(), report.total());
        on_progress(&BatchProgress::Finished {
            succeeded: report.succeeded(),
            total: report.total(),
        });

        Ok(report)
    }

    /// Resolve the date and stamp one file; never fails the batch
    pub fn process_file(&self, source: &Path, output_dir: &Path) -> FileOutcome {
        let output = file::output_file(output_dir, source);
        let text = resolve_date_with(source, self.settings.timestamp_field);

        let spec = WatermarkSpec::new(text.clone(), self.settings.font_size)
            .with_color(self.settings.color)
            .with_position(self.settings.position);

        let result = self
            .engine
            .add_watermark(source, &output, &spec)
            .map_err(|e| {
                error!(
                    path = %source.display(),
                    error_type = e.error_type(),
                    "Failed to watermark: {}",
                    e
                );
                e.to_string()
            });

        FileOutcome {
            source: source.to_path_buf(),
            output,
            watermark_text: text,
            result,
        }
    }
}
