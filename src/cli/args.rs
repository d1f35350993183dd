//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::recording::OutputFormat;

/// Pocket Recorder - record the microphone and play it back
#[derive(Parser, Debug)]
#[command(name = "pocket-recorder")]
#[command(version)]
#[command(about = "Record the microphone to MP4 or 3GP and play it back")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory that holds the AudioRecorder folder (default: home directory)
    #[arg(short = 'b', long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Initial recording format
    #[arg(short = 'f', long, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Show desktop notifications
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Grant microphone and storage access without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Format argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// MPEG 4 (.mp4)
    Mp4,
    /// 3GPP (.3gp)
    #[value(name = "3gp")]
    ThreeGp,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Mp4 => OutputFormat::Mpeg4,
            FormatArg::ThreeGp => OutputFormat::ThreeGpp,
        }
    }
}

impl From<OutputFormat> for FormatArg {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Mpeg4 => FormatArg::Mp4,
            OutputFormat::ThreeGpp => FormatArg::ThreeGp,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "base_dir",
    "format",
    "notify",
    "assume_permissions",
    "capture.input_format",
    "capture.input_device",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["pocket-recorder"]);
        assert!(cli.base_dir.is_none());
        assert!(cli.format.is_none());
        assert!(!cli.notify);
        assert!(!cli.yes);
        assert_eq!(cli.verbose, 0);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_format() {
        let cli = Cli::parse_from(["pocket-recorder", "--format", "3gp"]);
        assert_eq!(cli.format, Some(FormatArg::ThreeGp));

        let cli = Cli::parse_from(["pocket-recorder", "-f", "mp4"]);
        assert_eq!(cli.format, Some(FormatArg::Mp4));
    }

    #[test]
    fn cli_rejects_unknown_format() {
        let result = Cli::try_parse_from(["pocket-recorder", "--format", "wav"]);
        assert!(result.is_err());
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["pocket-recorder", "-n", "-y", "-vv"]);
        assert!(cli.notify);
        assert!(cli.yes);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_parses_base_dir() {
        let cli = Cli::parse_from(["pocket-recorder", "--base-dir", "/srv/audio"]);
        assert_eq!(cli.base_dir, Some(PathBuf::from("/srv/audio")));
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["pocket-recorder", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["pocket-recorder", "config", "set", "format", "3gp"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "format");
            assert_eq!(value, "3gp");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn format_arg_converts_to_output_format() {
        assert_eq!(OutputFormat::from(FormatArg::Mp4), OutputFormat::Mpeg4);
        assert_eq!(OutputFormat::from(FormatArg::ThreeGp), OutputFormat::ThreeGpp);
        assert_eq!(FormatArg::from(OutputFormat::ThreeGpp), FormatArg::ThreeGp);
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("base_dir"));
        assert!(is_valid_config_key("format"));
        assert!(is_valid_config_key("capture.input_device"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
