//! Error types for the watermarking library

use std::path::PathBuf;

/// Main error type for watermarking operations
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image format not supported: {format}")]
    UnsupportedFormat { format: String },

    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Logging initialization failed: {message}")]
    LoggingError { message: String },
}

impl ProcessingError {
    /// Get the error type as a string for categorization
    pub fn error_type(&self) -> &'static str {
        match self {
            ProcessingError::Io(_) => "io_error",
            ProcessingError::Image(_) => "image_error",
            ProcessingError::UnsupportedFormat { .. } => "unsupported_format",
            ProcessingError::FileNotFound { .. } => "file_not_found",
            ProcessingError::InvalidInput { .. } => "invalid_input",
            ProcessingError::ConfigError { .. } => "config_error",
            ProcessingError::LoggingError { .. } => "logging_error",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, ProcessingError>;
