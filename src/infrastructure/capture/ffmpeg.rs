//! FFmpeg-based capture service adapter

use std::path::Path;
use std::process::Stdio;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;
use tokio::fs;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, ChildStderr, Command};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::application::ports::{
    CaptureConfig, CaptureError, CaptureService, EventSender, ServiceEvent,
    CAPTURE_ERROR_SERVER_DIED, CAPTURE_ERROR_UNKNOWN, CAPTURE_INFO_UNKNOWN,
};
use crate::domain::recording::{AudioCodec, ContainerKind};

/// Where the capture service is in its lifecycle
#[derive(Debug)]
enum Phase {
    Idle,
    Configured(CaptureConfig),
    Prepared(CaptureConfig),
    Recording {
        config: CaptureConfig,
        child: Child,
        /// Set before a deliberate stop so the exit is not reported as a crash
        stopping: Arc<AtomicBool>,
    },
    Stopped(CaptureConfig),
    Released,
}

impl Phase {
    fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Configured(_) => "configured",
            Self::Prepared(_) => "prepared",
            Self::Recording { .. } => "recording",
            Self::Stopped(_) => "stopped",
            Self::Released => "released",
        }
    }
}

/// Records the microphone by running `ffmpeg` as a child process
pub struct FfmpegCaptureService {
    input_format: String,
    input_device: String,
    events: EventSender,
    phase: Mutex<Phase>,
}

impl FfmpegCaptureService {
    /// Create a capture service reading `input_device` through the
    /// `input_format` demuxer (e.g. `pulse` / `default`)
    pub fn new(
        input_format: impl Into<String>,
        input_device: impl Into<String>,
        events: EventSender,
    ) -> Self {
        Self {
            input_format: input_format.into(),
            input_device: input_device.into(),
            events,
            phase: Mutex::new(Phase::Idle),
        }
    }

    /// Spawn FFmpeg process
    fn spawn_ffmpeg(args: &[String]) -> Result<Child, CaptureError> {
        let mut command = Command::new("ffmpeg");
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Own process group, so a terminal Ctrl+C reaches only the session
        #[cfg(unix)]
        command.process_group(0);

        command.spawn().map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CaptureError::ToolNotFound
            } else {
                CaptureError::Failed(e.to_string())
            }
        })
    }

    /// Forward ffmpeg diagnostics as service events until the process exits
    fn watch_stderr(&self, stderr: ChildStderr, stopping: Arc<AtomicBool>) {
        let events = self.events.clone();

        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(line = %line, "ffmpeg");
                if let Some(event) = classify_log_line(&line) {
                    let _ = events.send(event);
                }
            }

            if !stopping.load(Ordering::SeqCst) {
                warn!("ffmpeg exited while recording");
                let _ = events.send(ServiceEvent::CaptureError {
                    code: CAPTURE_ERROR_SERVER_DIED,
                    detail: "ffmpeg exited unexpectedly".to_string(),
                });
            }
        });
    }

    /// Ask ffmpeg to finish the container and wait for it
    async fn interrupt(mut child: Child) -> Result<(), CaptureError> {
        Self::send_interrupt(&mut child)?;
        child
            .wait()
            .await
            .map_err(|e| CaptureError::Failed(format!("FFmpeg failed: {}", e)))?;
        Ok(())
    }

    #[cfg(unix)]
    fn send_interrupt(child: &mut Child) -> Result<(), CaptureError> {
        if let Some(id) = child.id() {
            signal::kill(Pid::from_raw(id as i32), Signal::SIGINT)
                .map_err(|e| CaptureError::Failed(format!("Signal failed: {}", e)))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn send_interrupt(child: &mut Child) -> Result<(), CaptureError> {
        child
            .start_kill()
            .map_err(|e| CaptureError::Failed(format!("Kill failed: {}", e)))
    }

    /// Kill a running process without waiting for the container to finish
    async fn abort(&self, phase: Phase) {
        if let Phase::Recording {
            mut child,
            stopping,
            ..
        } = phase
        {
            stopping.store(true, Ordering::SeqCst);
            let _ = child.start_kill();
            let _ = child.wait().await;
        }
    }

    /// Check the finished file has content
    async fn check_output(path: &Path) -> Result<(), CaptureError> {
        let metadata = fs::metadata(path)
            .await
            .map_err(|e| CaptureError::Io(e.to_string()))?;
        if metadata.len() == 0 {
            return Err(CaptureError::Failed("Recording file is empty".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CaptureService for FfmpegCaptureService {
    async fn configure(&self, config: CaptureConfig) -> Result<(), CaptureError> {
        let mut phase = self.phase.lock().await;
        if matches!(*phase, Phase::Recording { .. }) {
            return Err(CaptureError::InvalidState("configure".to_string()));
        }
        *phase = Phase::Configured(config);
        Ok(())
    }

    async fn prepare(&self) -> Result<(), CaptureError> {
        let mut phase = self.phase.lock().await;
        let config = match &*phase {
            Phase::Configured(config) => config.clone(),
            other => {
                return Err(CaptureError::InvalidState(format!(
                    "prepare while {}",
                    other.name()
                )))
            }
        };

        // Opening the file surfaces permission and missing-folder errors now
        fs::File::create(&config.output_path)
            .await
            .map_err(|e| CaptureError::Io(format!("{}: {}", config.output_path.display(), e)))?;

        *phase = Phase::Prepared(config);
        Ok(())
    }

    async fn start(&self) -> Result<(), CaptureError> {
        let mut phase = self.phase.lock().await;
        let config = match &*phase {
            Phase::Prepared(config) => config.clone(),
            other => {
                return Err(CaptureError::InvalidState(format!(
                    "start while {}",
                    other.name()
                )))
            }
        };

        let args = build_capture_args(&self.input_format, &self.input_device, &config);
        debug!(?args, "Spawning ffmpeg");
        let mut child = Self::spawn_ffmpeg(&args)?;
        let stopping = Arc::new(AtomicBool::new(false));

        if let Some(stderr) = child.stderr.take() {
            self.watch_stderr(stderr, Arc::clone(&stopping));
        }

        *phase = Phase::Recording {
            config,
            child,
            stopping,
        };
        Ok(())
    }

    async fn stop(&self) -> Result<(), CaptureError> {
        let mut phase = self.phase.lock().await;
        let (config, child, stopping) = match std::mem::replace(&mut *phase, Phase::Idle) {
            Phase::Recording {
                config,
                child,
                stopping,
            } => (config, child, stopping),
            other => {
                let name = other.name();
                *phase = other;
                return Err(CaptureError::InvalidState(format!("stop while {}", name)));
            }
        };

        stopping.store(true, Ordering::SeqCst);
        Self::interrupt(child).await?;
        Self::check_output(&config.output_path).await?;

        debug!(path = %config.output_path.display(), "Recording finalised");
        *phase = Phase::Stopped(config);
        Ok(())
    }

    async fn reset(&self) -> Result<(), CaptureError> {
        let mut phase = self.phase.lock().await;
        let previous = std::mem::replace(&mut *phase, Phase::Idle);
        self.abort(previous).await;
        Ok(())
    }

    async fn release(&self) -> Result<(), CaptureError> {
        let mut phase = self.phase.lock().await;
        let previous = std::mem::replace(&mut *phase, Phase::Released);
        self.abort(previous).await;
        Ok(())
    }
}

/// Build FFmpeg args for recording into `config.output_path`
pub fn build_capture_args(
    input_format: &str,
    input_device: &str,
    config: &CaptureConfig,
) -> Vec<String> {
    let mut args: Vec<String> = [
        "-hide_banner",
        "-nostdin",
        "-loglevel",
        "level+warning",
        "-f",
        input_format,
        "-i",
        input_device,
        "-ac",
        "1",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    match config.codec {
        AudioCodec::AmrNb => args.extend(
            ["-c:a", "libopencore_amrnb", "-ar", "8000", "-b:a", "12.2k"]
                .iter()
                .map(|s| s.to_string()),
        ),
        AudioCodec::Aac => args.extend(["-c:a", "aac"].iter().map(|s| s.to_string())),
    }

    args.extend([
        "-f".to_string(),
        container_muxer(config).to_string(),
        "-y".to_string(), // Overwrite the file created by prepare
        config.output_path.to_string_lossy().to_string(),
    ]);

    args
}

fn container_muxer(config: &CaptureConfig) -> &'static str {
    match config.container {
        ContainerKind::Mpeg4 => "mp4",
        ContainerKind::ThreeGpp => "3gp",
    }
}

/// Map one ffmpeg stderr line (printed with `-loglevel level+...`) to an event
pub fn classify_log_line(line: &str) -> Option<ServiceEvent> {
    let detail_after = |tag: &str| -> Option<String> {
        line.find(tag)
            .map(|pos| line[pos + tag.len()..].trim().to_string())
    };

    if let Some(detail) = detail_after("[warning]") {
        return Some(ServiceEvent::CaptureInfo {
            code: CAPTURE_INFO_UNKNOWN,
            detail,
        });
    }
    if let Some(detail) = detail_after("[error]").or_else(|| detail_after("[fatal]")) {
        return Some(ServiceEvent::CaptureError {
            code: CAPTURE_ERROR_UNKNOWN,
            detail,
        });
    }
    None
}
