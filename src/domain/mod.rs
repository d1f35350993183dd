//! Domain layer - Core business logic
//!
//! Contains value objects, the session state machine, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod playback;
pub mod recording;
pub mod session;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use playback::{format_duration, progress_percentage, ProgressDisplay, ProgressSample};
pub use recording::{FormatSelector, OutputFormat, RecordingDescriptor};
pub use session::{ButtonStates, PlayAffordance, RecorderSession, SessionState};
