//! Output path derivation

use std::path::{Path, PathBuf};

use super::format::OutputFormat;

/// Subfolder of the base directory that holds all recordings
pub const RECORDINGS_FOLDER: &str = "AudioRecorder";

/// Directory new recordings are written into
pub fn recordings_dir(base: &Path) -> PathBuf {
    base.join(RECORDINGS_FOLDER)
}

/// Build `base/AudioRecorder/<timestamp_ms><ext>`.
///
/// Two calls with the same millisecond and format yield the same path.
pub fn derive_output_path(base: &Path, timestamp_ms: u64, format: OutputFormat) -> PathBuf {
    recordings_dir(base).join(format!("{}{}", timestamp_ms, format.extension()))
}
