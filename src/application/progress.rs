//! Periodic progress sampling while a clip is playing

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::domain::playback::ProgressSample;

use super::ports::{PlaybackError, PlaybackService, ProgressSink};

/// Interval between progress samples
pub const PROGRESS_PERIOD: Duration = Duration::from_millis(100);

/// Progress sampling task tied to one Playing period.
///
/// Cancelled explicitly with [`ProgressTask::cancel`] or implicitly on drop.
#[derive(Debug)]
pub struct ProgressTask {
    handle: JoinHandle<()>,
}

impl ProgressTask {
    /// Start sampling `playback` every `period`, first sample one period from now
    pub fn spawn<P, S>(playback: Arc<P>, sink: Arc<S>, period: Duration) -> Self
    where
        P: PlaybackService + ?Sized + 'static,
        S: ProgressSink + ?Sized + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                match sample(playback.as_ref()).await {
                    Ok(sample) => sink.update(&sample.display()),
                    Err(e) => debug!(error = %e, "Skipping progress sample"),
                }
            }
        });

        Self { handle }
    }

    /// Stop sampling
    pub fn cancel(self) {
        self.handle.abort();
    }

    /// Check if the task has ended
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ProgressTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Read one position/duration pair
async fn sample<P>(playback: &P) -> Result<ProgressSample, PlaybackError>
where
    P: PlaybackService + ?Sized,
{
    let duration_ms = playback.duration_ms().await?;
    let position_ms = playback.position_ms().await?;
    Ok(ProgressSample::new(position_ms, duration_ms))
}
