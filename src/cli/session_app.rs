//! Interactive recorder session

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::application::ports::{event_channel, Notifier};
use crate::application::{ControllerConfig, ControllerError, RecorderController};
use crate::domain::recording::{recordings_dir, OutputFormat};
use crate::infrastructure::notification::create_notifier;
use crate::infrastructure::permission::PERMISSION_QUESTION;
use crate::infrastructure::{
    FfmpegCaptureService, FsRecordingStore, PromptPermissionGate, RodioPlaybackService,
};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::input::{parse_command, parse_yes_no, UserCommand};
use super::presenter::Presenter;
use super::progress_bar::ProgressBarSink;
use super::signals::ShutdownSignal;

/// Resolved settings for one session
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub base_dir: PathBuf,
    pub format: OutputFormat,
    pub notify: bool,
    pub assume_permissions: bool,
    pub input_format: String,
    pub input_device: String,
}

type SessionController = RecorderController<
    FfmpegCaptureService,
    RodioPlaybackService,
    Arc<PromptPermissionGate>,
    FsRecordingStore,
    Box<dyn Notifier>,
    ProgressBarSink,
>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the recorder until `quit`, end of input or a shutdown signal
pub async fn run_session(options: SessionOptions) -> ExitCode {
    let presenter = Presenter::new();

    let mut signals = match ShutdownSignal::listen() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (events, mut event_rx) = event_channel();
    let capture = FfmpegCaptureService::new(
        options.input_format.clone(),
        options.input_device.clone(),
        events.clone(),
    );
    let playback = Arc::new(RodioPlaybackService::new(events.clone()));
    let gate = Arc::new(if options.assume_permissions {
        PromptPermissionGate::pre_granted(events)
    } else {
        PromptPermissionGate::new(events)
    });
    let store = FsRecordingStore::new(&options.base_dir);

    let mut controller: SessionController = RecorderController::new(
        capture,
        playback,
        Arc::clone(&gate),
        store,
        create_notifier(options.notify),
        Arc::new(ProgressBarSink::new()),
        ControllerConfig {
            initial_format: options.format,
            ..Default::default()
        },
    );

    presenter.info(&format!(
        "Recordings are saved in {}",
        recordings_dir(&options.base_dir).display()
    ));
    presenter.info("Type 'help' for the list of commands");
    presenter.render_view(&controller.view());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut dialog_open = false;

    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let flow = handle_line(&line, &mut controller, &gate, &presenter, &mut dialog_open).await;
                    if flow == Flow::Quit {
                        break;
                    }
                }
                Ok(None) => {
                    debug!("Input closed");
                    break;
                }
                Err(e) => {
                    presenter.error(&format!("Cannot read input: {}", e));
                    break;
                }
            },
            Some(event) = event_rx.recv() => {
                debug!(?event, "Service event");
                if let Err(e) = controller.handle_event(event).await {
                    report(&presenter, Err(e));
                }
                presenter.render_view(&controller.view());
            },
            Some(name) = signals.recv() => {
                presenter.info(&format!("Received {}, shutting down", name));
                break;
            },
        }
    }

    controller.shutdown().await;
    ExitCode::from(EXIT_SUCCESS)
}

async fn handle_line(
    line: &str,
    controller: &mut SessionController,
    gate: &PromptPermissionGate,
    presenter: &Presenter,
    dialog_open: &mut bool,
) -> Flow {
    if gate.is_pending() {
        match parse_yes_no(line) {
            // The result comes back through the event channel
            Some(granted) => gate.answer(granted),
            None => presenter.question(PERMISSION_QUESTION),
        }
        return Flow::Continue;
    }

    if std::mem::take(dialog_open) {
        let answer = line.trim();
        if !answer.is_empty() {
            choose_format(controller, answer, presenter);
        }
        presenter.render_view(&controller.view());
        return Flow::Continue;
    }

    match parse_command(line) {
        UserCommand::Start => {
            report(presenter, controller.press_start().await);
            if gate.is_pending() {
                presenter.question(PERMISSION_QUESTION);
                return Flow::Continue;
            }
        }
        UserCommand::Stop => report(presenter, controller.press_stop().await),
        UserCommand::Play => report(presenter, controller.press_play().await),
        UserCommand::Format(None) => match controller.press_format() {
            Ok(dialog) => {
                presenter.format_dialog(&dialog);
                *dialog_open = true;
                return Flow::Continue;
            }
            Err(e) => report(presenter, Err(e)),
        },
        UserCommand::Format(Some(answer)) => choose_format(controller, &answer, presenter),
        UserCommand::Status => {}
        UserCommand::Help => {
            presenter.help();
            return Flow::Continue;
        }
        UserCommand::Quit => return Flow::Quit,
        UserCommand::Empty => return Flow::Continue,
        UserCommand::Unknown(text) => {
            presenter.warn(&format!(
                "Unknown command '{}'. Type 'help' for the list",
                text
            ));
            return Flow::Continue;
        }
    }

    presenter.render_view(&controller.view());
    Flow::Continue
}

fn choose_format(controller: &mut SessionController, answer: &str, presenter: &Presenter) {
    let result = answer
        .parse::<OutputFormat>()
        .map_err(ControllerError::from)
        .and_then(|format| controller.choose_format(format));
    report(presenter, result);
}

/// Show failures the controller has not already toasted
fn report(presenter: &Presenter, result: Result<(), ControllerError>) {
    match result {
        Ok(()) => {}
        Err(ControllerError::ButtonDisabled(e)) => presenter.warn(&e.to_string()),
        Err(ControllerError::InvalidFormat(e)) => presenter.warn(&e.to_string()),
        Err(ControllerError::NoRecording) => presenter.warn("No recording to play"),
        Err(e) => debug!(error = %e, "Command failed"),
    }
}
