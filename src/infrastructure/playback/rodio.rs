//! Rodio-based playback service adapter
//!
//! The recording is decoded to 16 kHz mono PCM by `ffmpeg` in `prepare`,
//! then played through a rodio `Sink`.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tokio::fs;
use tokio::process::Command;
use tokio::sync::Mutex;
use tracing::debug;

use crate::application::ports::{EventSender, PlaybackError, PlaybackService, ServiceEvent};

/// Sample rate the clip is decoded to
pub const DECODE_SAMPLE_RATE: u32 = 16_000;

/// Handle to the output stream living on its own thread.
///
/// `OutputStream` is not `Send`, so the thread keeps it alive until the
/// keepalive sender is dropped.
struct AudioOutput {
    handle: OutputStreamHandle,
    _keepalive: mpsc::Sender<()>,
}

impl AudioOutput {
    /// Open the default output device (blocking)
    fn open() -> Result<Self, PlaybackError> {
        let (handle_tx, handle_rx) = mpsc::channel();
        let (keepalive, keepalive_rx) = mpsc::channel::<()>();

        thread::Builder::new()
            .name("audio-output".to_string())
            .spawn(move || match OutputStream::try_default() {
                Ok((_stream, handle)) => {
                    let _ = handle_tx.send(Ok(handle));
                    // Returns once the sender side is dropped
                    let _ = keepalive_rx.recv();
                }
                Err(e) => {
                    let _ = handle_tx.send(Err(e.to_string()));
                }
            })
            .map_err(|e| PlaybackError::Device(e.to_string()))?;

        let handle = handle_rx
            .recv()
            .map_err(|e| PlaybackError::Device(e.to_string()))?
            .map_err(PlaybackError::Device)?;

        Ok(Self {
            handle,
            _keepalive: keepalive,
        })
    }
}

#[derive(Default)]
struct Inner {
    output: Option<AudioOutput>,
    source: Option<PathBuf>,
    samples: Option<Arc<Vec<i16>>>,
    sink: Option<Arc<Sink>>,
    /// Set while the sink is running
    resumed_at: Option<Instant>,
    /// Time played before the last resume
    played: Duration,
}

impl Inner {
    fn duration_ms(&self) -> Option<u64> {
        self.samples.as_ref().map(|s| samples_to_ms(s.len()))
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.resumed_at = None;
        self.played = Duration::ZERO;
    }
}

/// Playback service using rodio for output
pub struct RodioPlaybackService {
    inner: Mutex<Inner>,
    /// Bumped whenever the running clip is abandoned
    generation: Arc<AtomicU64>,
    events: EventSender,
}

impl RodioPlaybackService {
    /// Create a playback service; the output device is opened on first start
    pub fn new(events: EventSender) -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
            generation: Arc::new(AtomicU64::new(0)),
            events,
        }
    }

    /// Decode `path` into 16 kHz mono samples
    async fn decode(path: &Path) -> Result<Vec<i16>, PlaybackError> {
        let output = Command::new("ffmpeg")
            .args(decode_args(path))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PlaybackError::Preparation("ffmpeg not found. Please install ffmpeg.".to_string())
                } else {
                    PlaybackError::Preparation(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PlaybackError::Preparation(format!(
                "FFmpeg exited with error: {}",
                stderr.lines().last().unwrap_or("unknown error")
            )));
        }

        let samples = pcm_from_le_bytes(&output.stdout);
        if samples.is_empty() {
            return Err(PlaybackError::Preparation(
                "Recording contains no audio".to_string(),
            ));
        }
        Ok(samples)
    }

    /// Post completion once the sink drains, unless the clip was abandoned
    fn watch_completion(&self, sink: Arc<Sink>) {
        let generation = Arc::clone(&self.generation);
        let expected = generation.load(Ordering::SeqCst);
        let events = self.events.clone();

        thread::spawn(move || {
            sink.sleep_until_end();
            if generation.load(Ordering::SeqCst) == expected {
                let _ = events.send(ServiceEvent::PlaybackCompleted);
            } else {
                debug!("Dropping completion of an abandoned clip");
            }
        });
    }

    fn abandon(&self, inner: &mut Inner) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        inner.stop_sink();
    }
}

#[async_trait]
impl PlaybackService for RodioPlaybackService {
    async fn reset(&self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock().await;
        self.abandon(&mut inner);
        inner.source = None;
        inner.samples = None;
        Ok(())
    }

    async fn set_source(&self, path: &Path) -> Result<(), PlaybackError> {
        let metadata = fs::metadata(path)
            .await
            .map_err(|e| PlaybackError::Source(format!("{}: {}", path.display(), e)))?;
        if !metadata.is_file() {
            return Err(PlaybackError::Source(format!(
                "{} is not a file",
                path.display()
            )));
        }

        let mut inner = self.inner.lock().await;
        self.abandon(&mut inner);
        inner.source = Some(path.to_path_buf());
        inner.samples = None;
        Ok(())
    }

    async fn prepare(&self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock().await;
        let source = inner
            .source
            .clone()
            .ok_or_else(|| PlaybackError::InvalidState("prepare without a source".to_string()))?;

        let samples = Self::decode(&source).await?;
        debug!(
            path = %source.display(),
            duration_ms = samples_to_ms(samples.len()),
            "Clip decoded"
        );
        inner.samples = Some(Arc::new(samples));
        Ok(())
    }

    async fn start(&self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock().await;
        let samples = inner
            .samples
            .clone()
            .ok_or_else(|| PlaybackError::InvalidState("start before prepare".to_string()))?;

        if let Some(sink) = &inner.sink {
            if sink.is_paused() && !sink.empty() {
                sink.play();
                inner.resumed_at = Some(Instant::now());
                return Ok(());
            }
            if !sink.empty() {
                return Ok(());
            }
        }

        if inner.output.is_none() {
            let output = tokio::task::spawn_blocking(AudioOutput::open)
                .await
                .map_err(|e| PlaybackError::Device(format!("Task join error: {}", e)))??;
            inner.output = Some(output);
        }
        let handle = match &inner.output {
            Some(output) => output.handle.clone(),
            None => return Err(PlaybackError::Device("no output stream".to_string())),
        };

        self.abandon(&mut inner);
        let sink = Sink::try_new(&handle).map_err(|e| PlaybackError::Device(e.to_string()))?;
        sink.append(SamplesBuffer::new(1, DECODE_SAMPLE_RATE, samples.as_ref().clone()));
        let sink = Arc::new(sink);

        self.watch_completion(Arc::clone(&sink));
        inner.sink = Some(sink);
        inner.resumed_at = Some(Instant::now());
        Ok(())
    }

    async fn pause(&self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock().await;
        let Some(sink) = inner.sink.clone() else {
            return Err(PlaybackError::InvalidState("pause while stopped".to_string()));
        };

        sink.pause();
        if let Some(resumed_at) = inner.resumed_at.take() {
            inner.played += resumed_at.elapsed();
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), PlaybackError> {
        let mut inner = self.inner.lock().await;
        self.abandon(&mut inner);
        Ok(())
    }

    async fn duration_ms(&self) -> Result<u64, PlaybackError> {
        let inner = self.inner.lock().await;
        inner
            .duration_ms()
            .ok_or_else(|| PlaybackError::InvalidState("no clip loaded".to_string()))
    }

    async fn position_ms(&self) -> Result<u64, PlaybackError> {
        let inner = self.inner.lock().await;
        let duration_ms = inner
            .duration_ms()
            .ok_or_else(|| PlaybackError::InvalidState("no clip loaded".to_string()))?;

        let running = inner.resumed_at.map(|t| t.elapsed()).unwrap_or_default();
        let position_ms = (inner.played + running).as_millis() as u64;
        Ok(position_ms.min(duration_ms))
    }

    async fn is_playing(&self) -> bool {
        let inner = self.inner.lock().await;
        inner
            .sink
            .as_ref()
            .map(|sink| !sink.is_paused() && !sink.empty())
            .unwrap_or(false)
    }
}

/// FFmpeg args decoding `path` to raw 16-bit mono PCM on stdout
pub fn decode_args(path: &Path) -> Vec<String> {
    vec![
        "-v".to_string(),
        "error".to_string(),
        "-nostdin".to_string(),
        "-i".to_string(),
        path.to_string_lossy().to_string(),
        "-f".to_string(),
        "s16le".to_string(),
        "-ac".to_string(),
        "1".to_string(),
        "-ar".to_string(),
        DECODE_SAMPLE_RATE.to_string(),
        "-".to_string(),
    ]
}

/// Convert little-endian 16-bit PCM bytes to samples; a trailing odd byte is dropped
pub fn pcm_from_le_bytes(bytes: &[u8]) -> Vec<i16> {
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

/// Length in milliseconds of `count` mono samples at the decode rate
pub fn samples_to_ms(count: usize) -> u64 {
    count as u64 * 1000 / DECODE_SAMPLE_RATE as u64
}
