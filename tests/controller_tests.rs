//! Recorder controller integration tests
//!
//! Drive the controller through whole sessions with the real filesystem
//! store and permission gate, and in-memory capture and playback services.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use pocket_recorder::application::ports::{
    event_channel, CaptureConfig, CaptureError, CaptureService, EventReceiver, NotificationError,
    NotificationIcon, Notifier, PlaybackError, PlaybackService, ProgressSink,
};
use pocket_recorder::application::{
    ControllerConfig, ControllerError, RecorderController, PERMISSION_DENIED_TEXT,
    PERMISSION_GRANTED_TEXT,
};
use pocket_recorder::domain::playback::ProgressDisplay;
use pocket_recorder::domain::recording::OutputFormat;
use pocket_recorder::domain::session::SessionState;
use pocket_recorder::infrastructure::{FsRecordingStore, PromptPermissionGate};

/// Writes an empty file on prepare and some bytes on stop
#[derive(Default)]
struct FileCapture {
    path: Mutex<Option<PathBuf>>,
}

#[async_trait]
impl CaptureService for FileCapture {
    async fn configure(&self, config: CaptureConfig) -> Result<(), CaptureError> {
        *self.path.lock().unwrap() = Some(config.output_path);
        Ok(())
    }

    async fn prepare(&self) -> Result<(), CaptureError> {
        let path = self.path.lock().unwrap().clone();
        let path = path.ok_or_else(|| CaptureError::InvalidState("not configured".into()))?;
        std::fs::write(&path, b"").map_err(|e| CaptureError::Io(e.to_string()))
    }

    async fn start(&self) -> Result<(), CaptureError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), CaptureError> {
        let path = self.path.lock().unwrap().clone();
        let path = path.ok_or_else(|| CaptureError::InvalidState("not recording".into()))?;
        std::fs::write(&path, b"audio").map_err(|e| CaptureError::Io(e.to_string()))
    }

    async fn reset(&self) -> Result<(), CaptureError> {
        Ok(())
    }

    async fn release(&self) -> Result<(), CaptureError> {
        *self.path.lock().unwrap() = None;
        Ok(())
    }
}

/// Three second clip whose position moves one second per query
#[derive(Default)]
struct ClipPlayback {
    position: AtomicU64,
    source: Mutex<Option<PathBuf>>,
}

const CLIP_MS: u64 = 3_000;

#[async_trait]
impl PlaybackService for ClipPlayback {
    async fn reset(&self) -> Result<(), PlaybackError> {
        self.position.store(0, Ordering::SeqCst);
        Ok(())
    }

    async fn set_source(&self, path: &Path) -> Result<(), PlaybackError> {
        if !path.exists() {
            return Err(PlaybackError::Source(path.display().to_string()));
        }
        *self.source.lock().unwrap() = Some(path.to_path_buf());
        Ok(())
    }

    async fn prepare(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn start(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn stop(&self) -> Result<(), PlaybackError> {
        Ok(())
    }

    async fn duration_ms(&self) -> Result<u64, PlaybackError> {
        Ok(CLIP_MS)
    }

    async fn position_ms(&self) -> Result<u64, PlaybackError> {
        let next = self.position.fetch_add(1_000, Ordering::SeqCst) + 1_000;
        Ok(next.min(CLIP_MS))
    }

    async fn is_playing(&self) -> bool {
        true
    }
}

#[derive(Clone, Default)]
struct ToastLog(Arc<Mutex<Vec<String>>>);

impl ToastLog {
    fn messages(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for ToastLog {
    async fn notify(
        &self,
        _title: &str,
        message: &str,
        _icon: NotificationIcon,
    ) -> Result<(), NotificationError> {
        self.0.lock().unwrap().push(message.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct CollectingSink {
    samples: Mutex<Vec<ProgressDisplay>>,
}

impl ProgressSink for CollectingSink {
    fn reset(&self) {}

    fn update(&self, progress: &ProgressDisplay) {
        self.samples.lock().unwrap().push(progress.clone());
    }

    fn hide(&self) {}
}

type Controller = RecorderController<
    FileCapture,
    ClipPlayback,
    Arc<PromptPermissionGate>,
    FsRecordingStore,
    ToastLog,
    CollectingSink,
>;

struct Session {
    controller: Controller,
    gate: Arc<PromptPermissionGate>,
    events: EventReceiver,
    toasts: ToastLog,
    sink: Arc<CollectingSink>,
    base: TempDir,
}

fn session(pre_granted: bool, format: OutputFormat) -> Session {
    let base = TempDir::new().unwrap();
    let (tx, events) = event_channel();
    let gate = Arc::new(if pre_granted {
        PromptPermissionGate::pre_granted(tx)
    } else {
        PromptPermissionGate::new(tx)
    });
    let toasts = ToastLog::default();
    let sink = Arc::new(CollectingSink::default());

    let controller = RecorderController::new(
        FileCapture::default(),
        Arc::new(ClipPlayback::default()),
        Arc::clone(&gate),
        FsRecordingStore::new(base.path()),
        toasts.clone(),
        Arc::clone(&sink),
        ControllerConfig {
            initial_format: format,
            ..Default::default()
        },
    );

    Session {
        controller,
        gate,
        events,
        toasts,
        sink,
        base,
    }
}

#[tokio::test(start_paused = true)]
async fn record_and_play_3gp_clip() {
    let mut s = session(false, OutputFormat::Mpeg4);

    s.controller.choose_format(OutputFormat::ThreeGpp).unwrap();
    assert_eq!(s.controller.view().format_caption, "Audio Format (.3gp)");

    // First Start only asks for access
    s.controller.press_start().await.unwrap();
    assert_eq!(s.controller.state(), SessionState::Idle);
    assert!(s.gate.is_pending());

    s.gate.answer(true);
    let event = s.events.recv().await.unwrap();
    s.controller.handle_event(event).await.unwrap();
    assert_eq!(s.controller.state(), SessionState::Recording);

    let path = s.controller.current_path().unwrap();
    assert_eq!(path.parent().unwrap(), s.base.path().join("AudioRecorder"));
    assert_eq!(path.extension().unwrap(), "3gp");
    assert!(path.exists());

    s.controller.press_stop().await.unwrap();
    assert_eq!(
        s.controller.state(),
        SessionState::Stopped {
            has_recording: true
        }
    );
    assert_eq!(std::fs::read(&path).unwrap(), b"audio");

    s.controller.press_play().await.unwrap();
    assert_eq!(s.controller.state(), SessionState::Playing);
    assert!(s.controller.view().progress_visible);

    tokio::time::sleep(Duration::from_millis(350)).await;
    s.controller.press_play().await.unwrap();
    assert_eq!(s.controller.state(), SessionState::Paused);

    let samples = s.sink.samples.lock().unwrap().clone();
    assert_eq!(samples.len(), 3);
    assert_eq!(samples[2].total, "0:03");
    assert_eq!(samples[2].percent, 100);

    s.controller.press_play().await.unwrap();
    assert_eq!(s.controller.state(), SessionState::Playing);

    s.controller
        .handle_event(pocket_recorder::application::ports::ServiceEvent::PlaybackCompleted)
        .await
        .unwrap();
    assert_eq!(
        s.controller.state(),
        SessionState::Stopped {
            has_recording: true
        }
    );

    let toasts = s.toasts.messages();
    assert_eq!(
        toasts,
        vec![
            PERMISSION_GRANTED_TEXT.to_string(),
            "Start Recording".to_string(),
            "Stop Recording".to_string(),
            "Playing Recording".to_string(),
            "Playback Paused".to_string(),
        ]
    );

    s.controller.shutdown().await;
}

#[tokio::test]
async fn denied_permission_keeps_session_idle() {
    let mut s = session(false, OutputFormat::Mpeg4);

    s.controller.press_start().await.unwrap();
    s.gate.answer(false);
    let event = s.events.recv().await.unwrap();

    let result = s.controller.handle_event(event).await;
    assert!(matches!(result, Err(ControllerError::PermissionDenied)));
    assert_eq!(s.controller.state(), SessionState::Idle);
    assert_eq!(
        s.controller.view().file_label.as_deref(),
        Some(PERMISSION_DENIED_TEXT)
    );
    assert!(matches!(
        s.controller.press_play().await,
        Err(ControllerError::ButtonDisabled(_))
    ));

    let dir = s.base.path().join("AudioRecorder");
    assert!(!dir.exists());
}

#[tokio::test]
async fn format_locked_while_recording() {
    let mut s = session(true, OutputFormat::Mpeg4);

    s.controller.press_start().await.unwrap();
    assert_eq!(s.controller.state(), SessionState::Recording);
    assert!(!s.gate.is_pending());

    let path = s.controller.current_path().unwrap();
    assert_eq!(path.extension().unwrap(), "mp4");

    assert!(matches!(
        s.controller.press_format(),
        Err(ControllerError::ButtonDisabled(_))
    ));
    assert!(matches!(
        s.controller.press_start().await,
        Err(ControllerError::ButtonDisabled(_))
    ));

    s.controller.press_stop().await.unwrap();
    let dialog = s.controller.press_format().unwrap();
    assert_eq!(dialog.selected, 0);
    assert_eq!(dialog.choices.len(), 2);
}
