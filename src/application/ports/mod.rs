//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod capture;
pub mod config;
pub mod events;
pub mod notifier;
pub mod permission;
pub mod playback;
pub mod progress;
pub mod storage;

// Re-export common types
pub use capture::{CaptureConfig, CaptureError, CaptureService};
pub use config::ConfigStore;
pub use events::{
    event_channel, EventReceiver, EventSender, ServiceEvent, CAPTURE_ERROR_SERVER_DIED,
    CAPTURE_ERROR_UNKNOWN, CAPTURE_INFO_UNKNOWN,
};
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use permission::PermissionGate;
pub use playback::{PlaybackError, PlaybackService};
pub use progress::ProgressSink;
pub use storage::{RecordingStore, StorageError};
