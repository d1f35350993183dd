//! Application layer - Use cases and port interfaces
//!
//! Contains the recorder controller, the progress loop and the trait
//! definitions for external system interactions.

pub mod controller;
pub mod ports;
pub mod progress;

// Re-export use cases
pub use controller::{
    ControllerConfig, ControllerError, FormatDialog, RecorderController, ViewState,
    PERMISSION_DENIED_TEXT, PERMISSION_GRANTED_TEXT, TOAST_TITLE,
};
pub use progress::{ProgressTask, PROGRESS_PERIOD};
