//! Pocket Recorder CLI entry point

use std::process::ExitCode;

use clap::Parser;

use pocket_recorder::cli::{
    app::{init_tracing, load_merged_config, session_options, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
    session_app::run_session,
};
use pocket_recorder::domain::config::AppConfig;
use pocket_recorder::domain::recording::OutputFormat;
use pocket_recorder::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    if let Some(Commands::Config { action }) = cli.command {
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        base_dir: cli
            .base_dir
            .map(|dir| dir.to_string_lossy().into_owned()),
        format: cli.format.map(|f| {
            OutputFormat::from(f)
                .extension()
                .trim_start_matches('.')
                .to_string()
        }),
        notify: if cli.notify { Some(true) } else { None },
        assume_permissions: if cli.yes { Some(true) } else { None },
        capture: None,
    };

    let config = load_merged_config(&store, cli_config).await;
    let options = match session_options(&config) {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    run_session(options).await
}
