//! Filesystem recording store

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::application::ports::{RecordingStore, StorageError};
use crate::domain::recording::{derive_output_path, recordings_dir, OutputFormat};

/// Places recordings under `<base>/AudioRecorder`, named by wall-clock millis
#[derive(Debug, Clone)]
pub struct FsRecordingStore {
    base: PathBuf,
}

impl FsRecordingStore {
    /// Create a store rooted at `base`
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Get the base directory
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn now_ms() -> Result<u64, StorageError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|_| StorageError::Clock)
    }

    /// Path for a recording made at `timestamp_ms`; the folder is created if needed
    pub fn output_path_at(
        &self,
        timestamp_ms: u64,
        format: OutputFormat,
    ) -> Result<PathBuf, StorageError> {
        let dir = recordings_dir(&self.base);
        std::fs::create_dir_all(&dir).map_err(|e| StorageError::CreateDir {
            path: dir.display().to_string(),
            message: e.to_string(),
        })?;

        let path = derive_output_path(&self.base, timestamp_ms, format);
        debug!(path = %path.display(), "Next recording path");
        Ok(path)
    }
}

impl RecordingStore for FsRecordingStore {
    fn next_output_path(&self, format: OutputFormat) -> Result<PathBuf, StorageError> {
        self.output_path_at(Self::now_ms()?, format)
    }
}
