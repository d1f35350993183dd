//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like FFmpeg, rodio, the filesystem
//! and the desktop notification daemon.

pub mod capture;
pub mod config;
pub mod notification;
pub mod permission;
pub mod playback;
pub mod storage;

// Re-export adapters
pub use capture::FfmpegCaptureService;
pub use config::XdgConfigStore;
pub use notification::{create_notifier, NotifyRustNotifier, TerminalNotifier};
pub use permission::PromptPermissionGate;
pub use playback::RodioPlaybackService;
pub use storage::FsRecordingStore;
