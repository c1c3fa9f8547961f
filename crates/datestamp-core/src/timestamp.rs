//! Resolves the date text stamped onto an image from its file metadata

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs::Metadata;
use std::path::Path;
use std::time::SystemTime;
use tracing::{debug, warn};

/// Text used when no timestamp can be read
pub const UNKNOWN_DATE: &str = "unknown date";

/// Format of the resolved date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which filesystem timestamp is used as the image date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampField {
    /// Creation time when the platform reports one, else modification time
    Created,
    Modified,
}

impl TimestampField {
    /// Creation time on macOS and Windows, modification time elsewhere
    pub fn platform_default() -> Self {
        if cfg!(any(target_os = "macos", target_os = "windows")) {
            TimestampField::Created
        } else {
            TimestampField::Modified
        }
    }

    fn pick(&self, metadata: &Metadata) -> std::io::Result<SystemTime> {
        match self {
            TimestampField::Created => metadata.created().or_else(|e| {
                debug!("creation time unavailable ({}), using modification time", e);
                metadata.modified()
            }),
            TimestampField::Modified => metadata.modified(),
        }
    }
}

impl Default for TimestampField {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Resolve the date for `path` using the platform's default field
pub fn resolve_date(path: &Path) -> String {
    resolve_date_with(path, TimestampField::platform_default())
}

/// Resolve the date for `path` as `YYYY-MM-DD` in local time.
///
/// Never fails: unreadable metadata yields [`UNKNOWN_DATE`].
pub fn resolve_date_with(path: &Path, field: TimestampField) -> String {
    let timestamp = std::fs::metadata(path).and_then(|metadata| field.pick(&metadata));

    match timestamp {
        Ok(time) => format_date(time),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not read file date");
            UNKNOWN_DATE.to_string()
        }
    }
}

/// Format an instant as a local calendar date
pub fn format_date(time: SystemTime) -> String {
    DateTime::<Local>::from(time).format(DATE_FORMAT).to_string()
}
