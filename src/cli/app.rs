//! Startup wiring shared by the entry point

use std::path::{Path, PathBuf};

use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;

use super::session_app::SessionOptions;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Log filter used when RUST_LOG is not set
fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "pocket_recorder=warn",
        1 => "pocket_recorder=debug",
        _ => "pocket_recorder=trace",
    }
}

/// Install the tracing subscriber. Logs go to stderr so they never mix
/// with command output.
pub fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(verbose).into());

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

/// Load and merge configuration: defaults < file < cli
pub async fn load_merged_config<S: ConfigStore>(store: &S, cli_config: AppConfig) -> AppConfig {
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, path = %store.path().display(), "Ignoring unreadable config file");
            AppConfig::empty()
        }
    };

    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Resolve the directory that holds the recordings folder
pub fn resolve_base_dir(config: &AppConfig) -> Result<PathBuf, String> {
    let home = dirs::home_dir();

    match config.base_dir.as_deref() {
        Some(dir) => expand_home(dir, home.as_deref()),
        None => home.ok_or_else(|| {
            "Cannot determine home directory. Set base_dir with --base-dir or 'pocket-recorder config set base_dir <dir>'".to_string()
        }),
    }
}

fn expand_home(dir: &str, home: Option<&Path>) -> Result<PathBuf, String> {
    if dir == "~" || dir.starts_with("~/") {
        let home = home.ok_or_else(|| format!("Cannot expand '{}': no home directory", dir))?;
        let rest = dir.trim_start_matches('~').trim_start_matches('/');
        return Ok(if rest.is_empty() {
            home.to_path_buf()
        } else {
            home.join(rest)
        });
    }
    Ok(PathBuf::from(dir))
}

/// Build session options from a merged config
pub fn session_options(config: &AppConfig) -> Result<SessionOptions, String> {
    Ok(SessionOptions {
        base_dir: resolve_base_dir(config)?,
        format: config.format_or_default(),
        notify: config.notify_or_default(),
        assume_permissions: config.assume_permissions_or_default(),
        input_format: config.input_format_or_default().to_string(),
        input_device: config.input_device_or_default().to_string(),
    })
}
