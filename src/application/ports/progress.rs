//! Progress view port

use std::sync::Arc;

use crate::domain::playback::ProgressDisplay;

/// Port for the on-screen progress bar
pub trait ProgressSink: Send + Sync {
    /// Show the bar at 0 of 100
    fn reset(&self);

    /// Show a new sample
    fn update(&self, progress: &ProgressDisplay);

    /// Remove the bar from the screen
    fn hide(&self);
}

/// Blanket implementation for shared sinks
impl<T: ProgressSink + ?Sized> ProgressSink for Arc<T> {
    fn reset(&self) {
        self.as_ref().reset()
    }

    fn update(&self, progress: &ProgressDisplay) {
        self.as_ref().update(progress)
    }

    fn hide(&self) {
        self.as_ref().hide()
    }
}
