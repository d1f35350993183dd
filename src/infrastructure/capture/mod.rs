//! Capture infrastructure module
//!
//! Records the microphone with an external `ffmpeg` process.

mod ffmpeg;

pub use ffmpeg::{build_capture_args, classify_log_line, FfmpegCaptureService};
