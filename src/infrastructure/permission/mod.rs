//! Permission infrastructure module

mod prompt;

pub use prompt::{PromptPermissionGate, PERMISSION_QUESTION};
