//! Pocket Recorder - record the microphone and play the clip back
//!
//! A small recorder/player controller: one button set (Start, Stop, Play,
//! Format) driven by a session state machine, with ffmpeg doing the capture
//! and rodio doing the playback.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Session state machine, output formats, paths and progress math
//! - **Application**: The recorder controller, the progress loop and port traits
//! - **Infrastructure**: Adapter implementations (FFmpeg, rodio, notifications, config)
//! - **CLI**: Argument parsing, the interactive session and signal handling

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
