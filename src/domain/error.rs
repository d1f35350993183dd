//! Domain error types

use thiserror::Error;

/// Error when a format index or name does not name a supported format
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid format: \"{input}\". Valid formats are: 0 or mp4 (MPEG 4), 1 or 3gp (3GPP)")]
pub struct InvalidFormatError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_lists_choices() {
        let err = InvalidFormatError {
            input: "wav".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("wav"));
        assert!(msg.contains("mp4"));
        assert!(msg.contains("3gp"));
    }
}
