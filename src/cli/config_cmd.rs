//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, CaptureDeviceConfig};
use crate::domain::error::ConfigError;
use crate::domain::recording::OutputFormat;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;
    let value = normalize_config_value(key, value)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, &value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key);
        presenter.key_value(key, value.as_deref().unwrap_or(NOT_SET));
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    Ok(())
}

/// Validate a config value and return the form that is stored
fn normalize_config_value(key: &str, value: &str) -> Result<String, ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "format" => {
            let format: OutputFormat = value.parse().map_err(|e| invalid(format!("{}", e)))?;
            Ok(format.extension().trim_start_matches('.').to_string())
        }
        "notify" | "assume_permissions" => parse_bool(value)
            .map(|b| b.to_string())
            .map_err(|_| invalid("Value must be 'true' or 'false'".to_string())),
        _ => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
            Ok(trimmed.to_string())
        }
    }
}

fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "base_dir" => config.base_dir = Some(value.to_string()),
        "format" => config.format = Some(value.to_string()),
        "notify" => config.notify = Some(value == "true"),
        "assume_permissions" => config.assume_permissions = Some(value == "true"),
        "capture.input_format" => {
            config
                .capture
                .get_or_insert_with(CaptureDeviceConfig::default)
                .input_format = Some(value.to_string())
        }
        "capture.input_device" => {
            config
                .capture
                .get_or_insert_with(CaptureDeviceConfig::default)
                .input_device = Some(value.to_string())
        }
        _ => return check_key(key),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "base_dir" => config.base_dir.clone(),
        "format" => config.format.clone(),
        "notify" => config.notify.map(|b| b.to_string()),
        "assume_permissions" => config.assume_permissions.map(|b| b.to_string()),
        "capture.input_format" => config.capture.as_ref().and_then(|c| c.input_format.clone()),
        "capture.input_device" => config.capture.as_ref().and_then(|c| c.input_device.clone()),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_values() {
        assert_eq!(parse_bool("true"), Ok(true));
        assert_eq!(parse_bool("false"), Ok(false));
        assert_eq!(parse_bool("yes"), Ok(true));
        assert_eq!(parse_bool("no"), Ok(false));
        assert_eq!(parse_bool("1"), Ok(true));
        assert_eq!(parse_bool("0"), Ok(false));
        assert!(parse_bool("invalid").is_err());
    }

    #[test]
    fn format_is_stored_canonically() {
        assert_eq!(normalize_config_value("format", "3GPP").unwrap(), "3gp");
        assert_eq!(normalize_config_value("format", ".mp4").unwrap(), "mp4");
        assert_eq!(normalize_config_value("format", "1").unwrap(), "3gp");
    }

    #[test]
    fn format_invalid() {
        assert!(normalize_config_value("format", "wav").is_err());
    }

    #[test]
    fn bool_keys_are_validated() {
        assert_eq!(normalize_config_value("notify", "yes").unwrap(), "true");
        assert!(normalize_config_value("assume_permissions", "maybe").is_err());
    }

    #[test]
    fn string_keys_reject_empty() {
        assert!(normalize_config_value("base_dir", "  ").is_err());
        assert_eq!(
            normalize_config_value("capture.input_device", " hw:1 ").unwrap(),
            "hw:1"
        );
    }

    #[test]
    fn apply_and_read_capture_keys() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "capture.input_format", "alsa").unwrap();
        apply_value(&mut config, "capture.input_device", "hw:1").unwrap();

        assert_eq!(
            read_value(&config, "capture.input_format").as_deref(),
            Some("alsa")
        );
        assert_eq!(
            read_value(&config, "capture.input_device").as_deref(),
            Some("hw:1")
        );
    }

    #[test]
    fn apply_bool_keys() {
        let mut config = AppConfig::empty();
        apply_value(&mut config, "assume_permissions", "true").unwrap();
        apply_value(&mut config, "notify", "false").unwrap();

        assert_eq!(config.assume_permissions, Some(true));
        assert_eq!(config.notify, Some(false));
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(matches!(
            check_key("api_key"),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
