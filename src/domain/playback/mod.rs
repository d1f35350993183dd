//! Playback domain module

mod progress;

pub use progress::{format_duration, progress_percentage, ProgressDisplay, ProgressSample};
