//! Recording storage port

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::recording::OutputFormat;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Cannot create recordings folder {path}: {message}")]
    CreateDir { path: String, message: String },

    #[error("System clock is before the Unix epoch")]
    Clock,
}

/// Port for choosing where the next recording goes
pub trait RecordingStore: Send + Sync {
    /// Path for a new recording in `format`; the folder exists on success
    fn next_output_path(&self, format: OutputFormat) -> Result<PathBuf, StorageError>;
}
