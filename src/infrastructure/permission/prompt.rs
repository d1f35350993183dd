//! Terminal prompt permission gate

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::application::ports::{EventSender, PermissionGate, ServiceEvent};

/// Question shown while a request is open
pub const PERMISSION_QUESTION: &str = "Allow Pocket Recorder to record audio and save files? [y/n]";

/// Permission gate answered on the terminal.
///
/// `request` only marks the question as open; the session loop shows it and
/// feeds the user's reply to [`PromptPermissionGate::answer`], which posts
/// `ServiceEvent::PermissionResult`.
pub struct PromptPermissionGate {
    granted: AtomicBool,
    pending: AtomicBool,
    events: EventSender,
}

impl PromptPermissionGate {
    /// Create a gate that has not been granted yet
    pub fn new(events: EventSender) -> Self {
        Self {
            granted: AtomicBool::new(false),
            pending: AtomicBool::new(false),
            events,
        }
    }

    /// Create a gate that is already granted (`--yes`)
    pub fn pre_granted(events: EventSender) -> Self {
        let gate = Self::new(events);
        gate.granted.store(true, Ordering::SeqCst);
        gate
    }

    /// Check if a question is waiting for an answer
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// Record the user's reply and post the result
    pub fn answer(&self, granted: bool) {
        if !self.pending.swap(false, Ordering::SeqCst) {
            debug!("Ignoring permission answer with no open request");
            return;
        }
        self.granted.store(granted, Ordering::SeqCst);
        let _ = self.events.send(ServiceEvent::PermissionResult { granted });
    }
}

impl PermissionGate for PromptPermissionGate {
    fn is_granted(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn request(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }
}
