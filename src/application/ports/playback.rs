//! Playback service port

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Cannot open recording: {0}")]
    Source(String),

    #[error("Cannot prepare playback: {0}")]
    Preparation(String),

    #[error("Playback is not ready to {0}")]
    InvalidState(String),

    #[error("Audio output not available: {0}")]
    Device(String),
}

/// Port for playing back a recorded file.
///
/// Natural end of the clip is posted as `ServiceEvent::PlaybackCompleted`.
#[async_trait]
pub trait PlaybackService: Send + Sync {
    /// Drop any loaded clip
    async fn reset(&self) -> Result<(), PlaybackError>;

    /// Select the file to play
    async fn set_source(&self, path: &Path) -> Result<(), PlaybackError>;

    /// Decode the selected file so it can start immediately
    async fn prepare(&self) -> Result<(), PlaybackError>;

    /// Start or resume playback
    async fn start(&self) -> Result<(), PlaybackError>;

    /// Pause playback, keeping the position
    async fn pause(&self) -> Result<(), PlaybackError>;

    /// Stop playback
    async fn stop(&self) -> Result<(), PlaybackError>;

    /// Length of the loaded clip in milliseconds
    async fn duration_ms(&self) -> Result<u64, PlaybackError>;

    /// Current position in milliseconds
    async fn position_ms(&self) -> Result<u64, PlaybackError>;

    /// Check if audio is currently being played
    async fn is_playing(&self) -> bool;
}
