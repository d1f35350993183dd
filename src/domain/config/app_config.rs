//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::recording::OutputFormat;

/// Default ffmpeg input demuxer for the microphone
pub const DEFAULT_INPUT_FORMAT: &str = "pulse";

/// Default ffmpeg input device
pub const DEFAULT_INPUT_DEVICE: &str = "default";

/// Capture device configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaptureDeviceConfig {
    pub input_format: Option<String>,
    pub input_device: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
///
/// Holds startup preferences only. The format chosen during a session is
/// never written back.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub base_dir: Option<String>,
    pub format: Option<String>,
    pub notify: Option<bool>,
    pub assume_permissions: Option<bool>,
    pub capture: Option<CaptureDeviceConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            base_dir: None,
            format: Some("mp4".to_string()),
            notify: Some(false),
            assume_permissions: Some(false),
            capture: Some(CaptureDeviceConfig {
                input_format: Some(DEFAULT_INPUT_FORMAT.to_string()),
                input_device: Some(DEFAULT_INPUT_DEVICE.to_string()),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            base_dir: other.base_dir.or(self.base_dir),
            format: other.format.or(self.format),
            notify: other.notify.or(self.notify),
            assume_permissions: other.assume_permissions.or(self.assume_permissions),
            capture: Self::merge_capture_config(self.capture, other.capture),
        }
    }

    /// Merge capture config sections
    fn merge_capture_config(
        base: Option<CaptureDeviceConfig>,
        other: Option<CaptureDeviceConfig>,
    ) -> Option<CaptureDeviceConfig> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(CaptureDeviceConfig {
                input_format: o.input_format.or(b.input_format),
                input_device: o.input_device.or(b.input_device),
            }),
        }
    }

    /// Get format as parsed OutputFormat, or MPEG 4 if not set/invalid
    pub fn format_or_default(&self) -> OutputFormat {
        self.format
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get desktop notification setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get permission pre-grant setting, or false if not set
    pub fn assume_permissions_or_default(&self) -> bool {
        self.assume_permissions.unwrap_or(false)
    }

    /// Get ffmpeg input demuxer, or "pulse" if not set
    pub fn input_format_or_default(&self) -> &str {
        self.capture
            .as_ref()
            .and_then(|c| c.input_format.as_deref())
            .unwrap_or(DEFAULT_INPUT_FORMAT)
    }

    /// Get ffmpeg input device, or "default" if not set
    pub fn input_device_or_default(&self) -> &str {
        self.capture
            .as_ref()
            .and_then(|c| c.input_device.as_deref())
            .unwrap_or(DEFAULT_INPUT_DEVICE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert!(config.base_dir.is_none());
        assert_eq!(config.format, Some("mp4".to_string()));
        assert_eq!(config.notify, Some(false));
        assert_eq!(config.assume_permissions, Some(false));
        assert_eq!(config.input_format_or_default(), "pulse");
        assert_eq!(config.input_device_or_default(), "default");
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.base_dir.is_none());
        assert!(config.format.is_none());
        assert!(config.notify.is_none());
        assert!(config.capture.is_none());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            base_dir: Some("/base".to_string()),
            format: Some("mp4".to_string()),
            notify: Some(true),
            ..Default::default()
        };

        let other = AppConfig {
            base_dir: None,
            format: Some("3gp".to_string()),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.base_dir, Some("/base".to_string()));
        assert_eq!(merged.format, Some("3gp".to_string()));
        assert_eq!(merged.notify, Some(true));
    }

    #[test]
    fn merge_capture_sections() {
        let base = AppConfig::defaults();
        let other = AppConfig {
            capture: Some(CaptureDeviceConfig {
                input_format: Some("alsa".to_string()),
                input_device: None,
            }),
            ..Default::default()
        };

        let merged = base.merge(other);
        assert_eq!(merged.input_format_or_default(), "alsa");
        assert_eq!(merged.input_device_or_default(), "default");
    }

    #[test]
    fn format_or_default_parses() {
        let config = AppConfig {
            format: Some("3gp".to_string()),
            ..Default::default()
        };
        assert_eq!(config.format_or_default(), OutputFormat::ThreeGpp);
    }

    #[test]
    fn format_or_default_invalid_falls_back() {
        let config = AppConfig {
            format: Some("flac".to_string()),
            ..Default::default()
        };
        assert_eq!(config.format_or_default(), OutputFormat::Mpeg4);
    }

    #[test]
    fn toml_round_trip() {
        let config = AppConfig::defaults();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.format, config.format);
        assert_eq!(parsed.input_format_or_default(), "pulse");
    }
}
