//! Capture service port

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::{AudioCodec, AudioSource, ContainerKind};

/// Capture errors
#[derive(Debug, Clone, Error)]
pub enum CaptureError {
    #[error("Capture is not ready to {0}")]
    InvalidState(String),

    #[error("Cannot write recording: {0}")]
    Io(String),

    #[error("ffmpeg not found. Please install ffmpeg.")]
    ToolNotFound,

    #[error("Recording failed: {0}")]
    Failed(String),
}

/// Everything the capture service needs before `prepare`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureConfig {
    pub source: AudioSource,
    pub container: ContainerKind,
    pub codec: AudioCodec,
    pub output_path: PathBuf,
}

/// Port for recording audio into a file.
///
/// Lifecycle: configure -> prepare -> start -> stop -> reset -> release.
/// Runtime errors and warnings are posted as `ServiceEvent`s.
#[async_trait]
pub trait CaptureService: Send + Sync {
    /// Set source, container, codec and output file
    async fn configure(&self, config: CaptureConfig) -> Result<(), CaptureError>;

    /// Validate the configuration and the output location
    async fn prepare(&self) -> Result<(), CaptureError>;

    /// Begin writing audio
    async fn start(&self) -> Result<(), CaptureError>;

    /// Finish the file
    async fn stop(&self) -> Result<(), CaptureError>;

    /// Return to the unconfigured state
    async fn reset(&self) -> Result<(), CaptureError>;

    /// Free any resources held
    async fn release(&self) -> Result<(), CaptureError>;
}
