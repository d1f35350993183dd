//! Permission gate port

use std::sync::Arc;

/// Port for microphone and storage access checks
pub trait PermissionGate: Send + Sync {
    /// Check if microphone and storage-write access are granted
    fn is_granted(&self) -> bool;

    /// Ask for access without blocking.
    ///
    /// The answer arrives later as `ServiceEvent::PermissionResult`.
    fn request(&self);
}

/// Blanket implementation for shared gates
impl<T: PermissionGate + ?Sized> PermissionGate for Arc<T> {
    fn is_granted(&self) -> bool {
        self.as_ref().is_granted()
    }

    fn request(&self) {
        self.as_ref().request()
    }
}
