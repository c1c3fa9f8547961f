//! Progress events emitted while a batch is processed

use std::path::PathBuf;

/// Progress update for a batch run.
///
/// With parallel processing enabled, `FileStarted` / `FileCompleted` /
/// `FileFailed` events of different files may interleave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchProgress {
    /// The input contained no supported images; nothing was written
    NoImagesFound { input: PathBuf },
    Started { total: usize, output_dir: PathBuf },
    FileStarted { index: usize, total: usize, source: PathBuf },
    FileCompleted { source: PathBuf, output: PathBuf },
    FileFailed { source: PathBuf, error: String },
    Finished { succeeded: usize, total: usize },
}

impl BatchProgress {
    pub fn is_failure(&self) -> bool {
        matches!(self, BatchProgress::FileFailed { .. })
    }
}

/// Progress callback that ignores every event
pub fn silent(_: &BatchProgress) {}
