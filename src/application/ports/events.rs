//! Asynchronous callbacks from the services

use tokio::sync::mpsc;

/// Unknown capture error
pub const CAPTURE_ERROR_UNKNOWN: i32 = 1;

/// The capture process died
pub const CAPTURE_ERROR_SERVER_DIED: i32 = 100;

/// Unknown capture info
pub const CAPTURE_INFO_UNKNOWN: i32 = 1;

/// Callbacks delivered back to the controller's thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEvent {
    /// Non-fatal capture error
    CaptureError { code: i32, detail: String },
    /// Capture warning
    CaptureInfo { code: i32, detail: String },
    /// The clip played to its end
    PlaybackCompleted,
    /// Answer to a permission request
    PermissionResult { granted: bool },
}

/// Sender adapters use to post events
pub type EventSender = mpsc::UnboundedSender<ServiceEvent>;

/// Receiver the session loop drains
pub type EventReceiver = mpsc::UnboundedReceiver<ServiceEvent>;

/// Create the event channel
pub fn event_channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}
