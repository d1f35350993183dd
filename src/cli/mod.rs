//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the interactive session runner.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod input;
pub mod presenter;
pub mod progress_bar;
pub mod session_app;
pub mod signals;

// Re-export commonly used types
pub use app::{init_tracing, load_merged_config, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, FormatArg};
pub use presenter::Presenter;
pub use session_app::{run_session, SessionOptions};
