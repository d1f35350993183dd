//! Terminal progress view

use std::sync::Mutex;

use indicatif::{ProgressBar, ProgressStyle};

use crate::application::ports::ProgressSink;
use crate::domain::playback::ProgressDisplay;

/// Bar length; the percentage is the position
const BAR_LENGTH: u64 = 100;

/// Progress sink drawing an indicatif bar on stderr
#[derive(Default)]
pub struct ProgressBarSink {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressBarSink {
    /// Create a sink with no bar shown
    pub fn new() -> Self {
        Self::default()
    }

    fn new_bar() -> ProgressBar {
        let bar = ProgressBar::new(BAR_LENGTH);
        let style = ProgressStyle::default_bar()
            .template("  {bar:30.cyan/blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(style);
        bar.set_message(progress_message(&ProgressDisplay {
            current: "0:00".to_string(),
            total: "0:00".to_string(),
            percent: 0,
        }));
        bar
    }

    /// Check if a bar is on screen
    pub fn is_visible(&self) -> bool {
        self.bar
            .lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }
}

impl ProgressSink for ProgressBarSink {
    fn reset(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(old) = guard.take() {
                old.finish_and_clear();
            }
            *guard = Some(Self::new_bar());
        }
    }

    fn update(&self, progress: &ProgressDisplay) {
        if let Ok(guard) = self.bar.lock() {
            if let Some(bar) = guard.as_ref() {
                bar.set_position(u64::from(progress.percent).min(BAR_LENGTH));
                bar.set_message(progress_message(progress));
            }
        }
    }

    fn hide(&self) {
        if let Ok(mut guard) = self.bar.lock() {
            if let Some(bar) = guard.take() {
                bar.finish_and_clear();
            }
        }
    }
}

/// Text shown next to the bar
pub fn progress_message(progress: &ProgressDisplay) -> String {
    format!("{} / {}", progress.current, progress.total)
}
