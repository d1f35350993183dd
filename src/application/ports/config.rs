//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Port for startup preference storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load configuration; a missing file yields an empty config
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Save configuration, creating the parent directory if needed
    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    /// Get the configuration file path.
    fn path(&self) -> PathBuf;

    /// Check if configuration file exists.
    fn exists(&self) -> bool;

    /// Write the defaults. Fails if the file already exists.
    async fn init(&self) -> Result<(), ConfigError>;
}
