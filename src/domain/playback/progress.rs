//! Playback progress formatting

const MILLIS_PER_SECOND: u64 = 1000;
const MILLIS_PER_MINUTE: u64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: u64 = 60 * MILLIS_PER_MINUTE;

/// Format milliseconds as `[H:]M:SS`.
///
/// Hours appear only when non-zero. Minutes are never padded, seconds
/// always have two digits, so one hour is `"1:0:00"`.
pub fn format_duration(milliseconds: u64) -> String {
    let hours = milliseconds / MILLIS_PER_HOUR;
    let minutes = (milliseconds % MILLIS_PER_HOUR) / MILLIS_PER_MINUTE;
    let seconds = (milliseconds % MILLIS_PER_HOUR % MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;

    if hours > 0 {
        format!("{}:{}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Percentage of the clip played, from whole seconds only.
///
/// Both inputs are truncated to seconds before dividing, and the result is
/// truncated toward zero. It is not clamped to 100.
///
/// Precondition: `duration_ms >= 1000`. A zero whole-second duration makes
/// the division NaN or infinite; the saturating cast then yields `0` for a
/// zero position and `u32::MAX` otherwise.
pub fn progress_percentage(position_ms: u64, duration_ms: u64) -> u32 {
    let position_secs = position_ms / MILLIS_PER_SECOND;
    let duration_secs = duration_ms / MILLIS_PER_SECOND;

    let percentage = (position_secs as f64 / duration_secs as f64) * 100.0;
    percentage as u32
}

/// Position and total duration read from the playback service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSample {
    pub position_ms: u64,
    pub duration_ms: u64,
}

impl ProgressSample {
    /// Create a sample
    pub const fn new(position_ms: u64, duration_ms: u64) -> Self {
        Self {
            position_ms,
            duration_ms,
        }
    }

    /// Percentage played (see [`progress_percentage`])
    pub fn percentage(&self) -> u32 {
        progress_percentage(self.position_ms, self.duration_ms)
    }

    /// Strings and bar value for the progress view
    pub fn display(&self) -> ProgressDisplay {
        ProgressDisplay {
            current: format_duration(self.position_ms),
            total: format_duration(self.duration_ms),
            percent: self.percentage(),
        }
    }
}

/// What the progress view shows for one sample
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressDisplay {
    /// Elapsed time, `[H:]M:SS`
    pub current: String,
    /// Total time, `[H:]M:SS`
    pub total: String,
    /// Bar position out of 100
    pub percent: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_zero() {
        assert_eq!(format_duration(0), "0:00");
    }

    #[test]
    fn format_seconds_padded() {
        assert_eq!(format_duration(5_000), "0:05");
        assert_eq!(format_duration(65_000), "1:05");
        assert_eq!(format_duration(599_999), "9:59");
    }

    #[test]
    fn format_minutes_not_padded() {
        assert_eq!(format_duration(10 * 60_000), "10:00");
        assert_eq!(format_duration(59 * 60_000 + 59_000), "59:59");
    }

    #[test]
    fn format_hour_boundary() {
        assert_eq!(format_duration(3_600_000), "1:0:00");
        assert_eq!(format_duration(3_665_000), "1:1:05");
        assert_eq!(format_duration(2 * 3_600_000 + 30 * 60_000 + 9_000), "2:30:09");
    }

    #[test]
    fn format_discards_sub_second() {
        assert_eq!(format_duration(999), "0:00");
        assert_eq!(format_duration(1_999), "0:01");
    }

    #[test]
    fn format_shape_holds_for_many_values() {
        for ms in (0..7_300_000u64).step_by(12_345) {
            let text = format_duration(ms);
            let parts: Vec<&str> = text.split(':').collect();
            assert!(parts.len() == 2 || parts.len() == 3, "{}", text);
            assert_eq!(parts.last().unwrap().len(), 2, "{}", text);
            assert_eq!(parts.len() == 3, ms >= 3_600_000, "{}", text);
        }
    }

    #[test]
    fn percentage_endpoints() {
        assert_eq!(progress_percentage(0, 10_000), 0);
        assert_eq!(progress_percentage(10_000, 10_000), 100);
    }

    #[test]
    fn percentage_truncates_to_seconds() {
        assert_eq!(progress_percentage(5_500, 10_000), 50);
        assert_eq!(progress_percentage(999, 10_000), 0);
        assert_eq!(progress_percentage(9_999, 10_999), 90);
    }

    #[test]
    fn percentage_is_monotonic() {
        let duration = 37_000;
        let mut previous = 0;
        for position in (0..=duration).step_by(250) {
            let current = progress_percentage(position, duration);
            assert!(current >= previous, "{} < {} at {}", current, previous, position);
            previous = current;
        }
        assert_eq!(previous, 100);
    }

    #[test]
    fn percentage_not_clamped() {
        assert_eq!(progress_percentage(12_000, 10_000), 120);
    }

    #[test]
    fn percentage_with_sub_second_duration() {
        assert_eq!(progress_percentage(0, 500), 0);
        assert_eq!(progress_percentage(2_000, 500), u32::MAX);
    }

    #[test]
    fn sample_display() {
        let display = ProgressSample::new(65_000, 130_000).display();
        assert_eq!(display.current, "1:05");
        assert_eq!(display.total, "2:10");
        assert_eq!(display.percent, 50);
    }
}
