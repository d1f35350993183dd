//! Recording descriptor value object

use std::path::{Path, PathBuf};

use super::format::OutputFormat;

/// File path and format of the current recording.
/// Immutable once created; a new recording replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingDescriptor {
    file_path: PathBuf,
    format: OutputFormat,
}

impl RecordingDescriptor {
    /// Create a descriptor for a recording written to `file_path`
    pub fn new(file_path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            file_path: file_path.into(),
            format,
        }
    }

    /// Path of the recorded file
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Format the file was recorded in
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// File name shown on screen
    pub fn file_name(&self) -> String {
        self.file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.file_path.to_string_lossy().to_string())
    }
}
