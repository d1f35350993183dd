//! Recorder controller use case
//!
//! Owns the session state machine and drives the capture, playback and
//! permission ports from button presses and service callbacks.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::error::InvalidFormatError;
use crate::domain::recording::{AudioSource, FormatSelector, OutputFormat, RecordingDescriptor};
use crate::domain::session::{
    ButtonStates, InvalidStateTransition, PlayAffordance, RecorderSession, SessionState,
};

use super::ports::{
    CaptureConfig, CaptureError, CaptureService, NotificationIcon, Notifier, PermissionGate,
    PlaybackError, PlaybackService, ProgressSink, RecordingStore, ServiceEvent, StorageError,
};
use super::progress::{ProgressTask, PROGRESS_PERIOD};

/// Title used for every toast
pub const TOAST_TITLE: &str = "Pocket Recorder";

/// Shown when microphone access is refused
pub const PERMISSION_DENIED_TEXT: &str =
    "Permission Canceled, Now application cannot access record audio.";

/// Shown when microphone access is granted
pub const PERMISSION_GRANTED_TEXT: &str =
    "Permission Granted, Now your application can record audio.";

/// Errors from the controller
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Button disabled: {0}")]
    ButtonDisabled(#[from] InvalidStateTransition),

    #[error("Microphone access was refused")]
    PermissionDenied,

    #[error("No recording to play")]
    NoRecording,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    InvalidFormat(#[from] InvalidFormatError),
}

/// Controller settings
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Format selected when the session opens
    pub initial_format: OutputFormat,
    /// Interval between progress samples while playing
    pub progress_period: Duration,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            initial_format: OutputFormat::default(),
            progress_period: PROGRESS_PERIOD,
        }
    }
}

/// Everything the screen shows, derived from the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub state: SessionState,
    pub buttons: ButtonStates,
    pub play_affordance: PlayAffordance,
    pub format_caption: String,
    /// Current file name, or the permission denial text
    pub file_label: Option<String>,
    pub progress_visible: bool,
}

/// Single-choice format dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDialog {
    pub choices: &'static [OutputFormat],
    pub selected: usize,
}

/// Recorder controller
pub struct RecorderController<C, P, G, R, N, S>
where
    C: CaptureService,
    P: PlaybackService + 'static,
    G: PermissionGate,
    R: RecordingStore,
    N: Notifier,
    S: ProgressSink + 'static,
{
    capture: C,
    playback: Arc<P>,
    permissions: G,
    store: R,
    notifier: N,
    progress_sink: Arc<S>,
    session: RecorderSession,
    formats: FormatSelector,
    current: Option<RecordingDescriptor>,
    progress: Option<ProgressTask>,
    pending_start: bool,
    file_label: Option<String>,
    progress_visible: bool,
    progress_period: Duration,
}

impl<C, P, G, R, N, S> RecorderController<C, P, G, R, N, S>
where
    C: CaptureService,
    P: PlaybackService + 'static,
    G: PermissionGate,
    R: RecordingStore,
    N: Notifier,
    S: ProgressSink + 'static,
{
    /// Create a controller in the idle state
    pub fn new(
        capture: C,
        playback: Arc<P>,
        permissions: G,
        store: R,
        notifier: N,
        progress_sink: Arc<S>,
        config: ControllerConfig,
    ) -> Self {
        Self {
            capture,
            playback,
            permissions,
            store,
            notifier,
            progress_sink,
            session: RecorderSession::new(),
            formats: FormatSelector::new(config.initial_format),
            current: None,
            progress: None,
            pending_start: false,
            file_label: None,
            progress_visible: false,
            progress_period: config.progress_period,
        }
    }

    /// Get current session state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Get button enablement
    pub fn buttons(&self) -> ButtonStates {
        self.session.buttons()
    }

    /// Get the selected output format
    pub fn format(&self) -> OutputFormat {
        self.formats.current()
    }

    /// Get the most recent recording, if any
    pub fn current_recording(&self) -> Option<&RecordingDescriptor> {
        self.current.as_ref()
    }

    /// Path of the recording in progress or last finished
    pub fn current_path(&self) -> Option<PathBuf> {
        self.current.as_ref().map(|d| d.file_path().to_path_buf())
    }

    /// Check if a permission answer is awaited for a Start press
    pub fn is_start_pending(&self) -> bool {
        self.pending_start
    }

    /// Snapshot of the screen
    pub fn view(&self) -> ViewState {
        let state = self.session.state();
        ViewState {
            state,
            buttons: ButtonStates::for_state(state),
            play_affordance: PlayAffordance::for_state(state),
            format_caption: self.formats.caption(),
            file_label: self.file_label.clone(),
            progress_visible: self.progress_visible,
        }
    }

    /// Start button.
    ///
    /// Without permission the session stays idle and a request is issued;
    /// the recording begins once `PermissionResult { granted: true }` arrives.
    pub async fn press_start(&mut self) -> Result<(), ControllerError> {
        self.session.check_start()?;

        if !self.permissions.is_granted() {
            self.session.permission_missing()?;
            if self.current.take().is_some() {
                self.file_label = None;
            }
            self.pending_start = true;
            debug!("Permission missing, requesting access");
            self.permissions.request();
            return Ok(());
        }

        self.pending_start = false;
        self.start_recording().await
    }

    async fn start_recording(&mut self) -> Result<(), ControllerError> {
        let format = self.formats.current();
        let path = match self.store.next_output_path(format) {
            Ok(path) => path,
            Err(e) => {
                warn!(error = %e, "Cannot choose an output path");
                self.toast(&e.to_string(), NotificationIcon::Error).await;
                return Err(e.into());
            }
        };
        let descriptor = RecordingDescriptor::new(path, format);

        self.session.start_recording()?;
        self.hide_progress();

        let config = CaptureConfig {
            source: AudioSource::Microphone,
            container: format.container(),
            codec: format.codec(),
            output_path: descriptor.file_path().to_path_buf(),
        };
        if let Err(e) = self.begin_capture(config).await {
            return Err(self.abandon_capture(e).await);
        }

        debug!(path = %descriptor.file_path().display(), format = %format, "Recording started");
        self.file_label = Some(descriptor.file_name());
        self.current = Some(descriptor);
        self.toast("Start Recording", NotificationIcon::Recording).await;
        Ok(())
    }

    async fn begin_capture(&self, config: CaptureConfig) -> Result<(), CaptureError> {
        self.capture.configure(config).await?;
        self.capture.prepare().await?;
        self.capture.start().await
    }

    /// Fall back to idle after a capture failure
    async fn abandon_capture(&mut self, err: CaptureError) -> ControllerError {
        warn!(error = %err, "Recording failed");
        let _ = self.capture.reset().await;
        let _ = self.capture.release().await;
        let _ = self.session.fail_capture();
        self.current = None;
        self.file_label = None;
        self.toast(&err.to_string(), NotificationIcon::Error).await;
        ControllerError::Capture(err)
    }

    /// Stop button: ends a recording or a playback
    pub async fn press_stop(&mut self) -> Result<(), ControllerError> {
        self.session.check_stop()?;
        if self.session.is_recording() {
            self.stop_recording().await
        } else {
            self.stop_playback().await
        }
    }

    async fn stop_recording(&mut self) -> Result<(), ControllerError> {
        let stopped = self.capture.stop().await;
        if let Err(e) = stopped {
            return Err(self.abandon_capture(e).await);
        }
        let _ = self.capture.reset().await;
        let _ = self.capture.release().await;

        self.session.stop_recording()?;
        self.hide_progress();
        debug!("Recording stopped");
        self.toast("Stop Recording", NotificationIcon::Info).await;
        Ok(())
    }

    async fn stop_playback(&mut self) -> Result<(), ControllerError> {
        self.cancel_progress();
        if let Err(e) = self.playback.stop().await {
            return Err(self.abandon_playback(e).await);
        }
        let _ = self.playback.reset().await;

        self.session.stop_playback()?;
        self.hide_progress();
        debug!("Playback stopped");
        Ok(())
    }

    /// Play button: plays, pauses or resumes depending on state
    pub async fn press_play(&mut self) -> Result<(), ControllerError> {
        match self.session.state() {
            SessionState::Playing => self.pause_playback().await,
            SessionState::Paused => self.resume_playback().await,
            _ => self.start_playback().await,
        }
    }

    async fn start_playback(&mut self) -> Result<(), ControllerError> {
        self.session.start_playback()?;

        let Some(path) = self.current.as_ref().map(|d| d.file_path().to_path_buf()) else {
            let _ = self.session.fail_playback();
            return Err(ControllerError::NoRecording);
        };

        if let Err(e) = self.load_and_start(&path).await {
            return Err(self.abandon_playback(e).await);
        }

        self.progress_sink.reset();
        self.progress_visible = true;
        self.spawn_progress();
        debug!(path = %path.display(), "Playback started");
        self.toast("Playing Recording", NotificationIcon::Playing).await;
        Ok(())
    }

    async fn load_and_start(&self, path: &Path) -> Result<(), PlaybackError> {
        self.playback.reset().await?;
        self.playback.set_source(path).await?;
        self.playback.prepare().await?;
        self.playback.start().await
    }

    async fn pause_playback(&mut self) -> Result<(), ControllerError> {
        self.session.pause_playback()?;
        self.cancel_progress();
        if let Err(e) = self.playback.pause().await {
            return Err(self.abandon_playback(e).await);
        }
        debug!("Playback paused");
        self.toast("Playback Paused", NotificationIcon::Info).await;
        Ok(())
    }

    async fn resume_playback(&mut self) -> Result<(), ControllerError> {
        self.session.resume_playback()?;
        if let Err(e) = self.playback.start().await {
            return Err(self.abandon_playback(e).await);
        }
        self.spawn_progress();
        debug!("Playback resumed");
        Ok(())
    }

    /// Fall back to Stopped(true) after a playback failure
    async fn abandon_playback(&mut self, err: PlaybackError) -> ControllerError {
        warn!(error = %err, "Playback failed");
        self.cancel_progress();
        let _ = self.playback.stop().await;
        let _ = self.playback.reset().await;
        let _ = self.session.fail_playback();
        self.toast(&err.to_string(), NotificationIcon::Error).await;
        ControllerError::Playback(err)
    }

    /// Format button: open the dialog with the current choice marked
    pub fn press_format(&self) -> Result<FormatDialog, ControllerError> {
        self.session.check_format()?;
        Ok(FormatDialog {
            choices: self.formats.choices(),
            selected: self.formats.index(),
        })
    }

    /// Dialog answer
    pub fn choose_format(&mut self, format: OutputFormat) -> Result<(), ControllerError> {
        self.session.check_format()?;
        self.formats.select(format);
        debug!(format = %format, "Format selected");
        Ok(())
    }

    /// Dialog answer given as a list index
    pub fn choose_format_index(&mut self, index: usize) -> Result<(), ControllerError> {
        self.session.check_format()?;
        self.formats.select_index(index)?;
        debug!(format = %self.formats.current(), "Format selected");
        Ok(())
    }

    /// React to a callback posted by one of the services
    pub async fn handle_event(&mut self, event: ServiceEvent) -> Result<(), ControllerError> {
        match event {
            ServiceEvent::CaptureError { code, detail } => {
                warn!(code, detail = %detail, "Capture error reported");
                let message = format!("Error: {}, {}", code, detail);
                self.toast(&message, NotificationIcon::Error).await;
                Ok(())
            }
            ServiceEvent::CaptureInfo { code, detail } => {
                debug!(code, detail = %detail, "Capture warning reported");
                let message = format!("Warning: {}, {}", code, detail);
                self.toast(&message, NotificationIcon::Warning).await;
                Ok(())
            }
            ServiceEvent::PlaybackCompleted => {
                if !self.session.is_playing() {
                    debug!(state = %self.session.state(), "Ignoring stale completion");
                    return Ok(());
                }
                self.cancel_progress();
                self.session.complete_playback()?;
                debug!("Playback completed");
                Ok(())
            }
            ServiceEvent::PermissionResult { granted: true } => {
                self.toast(PERMISSION_GRANTED_TEXT, NotificationIcon::Info).await;
                if std::mem::take(&mut self.pending_start) {
                    return self.press_start().await;
                }
                Ok(())
            }
            ServiceEvent::PermissionResult { granted: false } => {
                self.pending_start = false;
                self.file_label = Some(PERMISSION_DENIED_TEXT.to_string());
                self.toast(PERMISSION_DENIED_TEXT, NotificationIcon::Warning).await;
                Err(ControllerError::PermissionDenied)
            }
        }
    }

    /// Stop whatever is running and release the services
    pub async fn shutdown(&mut self) {
        self.cancel_progress();
        match self.session.state() {
            SessionState::Recording => {
                if let Err(e) = self.capture.stop().await {
                    warn!(error = %e, "Recording did not finish cleanly");
                }
                let _ = self.capture.reset().await;
                let _ = self.session.stop_recording();
            }
            SessionState::Playing | SessionState::Paused => {
                let _ = self.playback.stop().await;
                let _ = self.session.stop_playback();
            }
            _ => {}
        }
        let _ = self.playback.reset().await;
        let _ = self.capture.release().await;
        self.progress_sink.hide();
        debug!("Controller shut down");
    }

    fn spawn_progress(&mut self) {
        self.cancel_progress();
        self.progress = Some(ProgressTask::spawn(
            Arc::clone(&self.playback),
            Arc::clone(&self.progress_sink),
            self.progress_period,
        ));
    }

    fn cancel_progress(&mut self) {
        if let Some(task) = self.progress.take() {
            task.cancel();
        }
    }

    fn hide_progress(&mut self) {
        self.progress_sink.hide();
        self.progress_visible = false;
    }

    async fn toast(&self, message: &str, icon: NotificationIcon) {
        if let Err(e) = self.notifier.notify(TOAST_TITLE, message, icon).await {
            debug!(error = %e, "Toast not shown");
        }
    }
}
