//! Recorder session state machine

use std::fmt;
use thiserror::Error;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Recording,
    Stopped { has_recording: bool },
    Playing,
    Paused,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopped { has_recording: true } => "stopped",
            Self::Stopped { has_recording: false } => "stopped (no recording)",
            Self::Playing => "playing",
            Self::Paused => "paused",
        }
    }

    /// Whether a finished recording can be played from this state
    pub const fn has_recording(&self) -> bool {
        matches!(
            self,
            Self::Stopped {
                has_recording: true
            } | Self::Playing
                | Self::Paused
        )
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which of the four buttons accept presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStates {
    pub start: bool,
    pub stop: bool,
    pub play: bool,
    pub format: bool,
}

impl ButtonStates {
    /// Button enablement as a pure function of the session state
    pub const fn for_state(state: SessionState) -> Self {
        match state {
            SessionState::Idle => Self {
                start: true,
                stop: false,
                play: false,
                format: true,
            },
            SessionState::Recording => Self {
                start: false,
                stop: true,
                play: false,
                format: false,
            },
            SessionState::Stopped { has_recording } => Self {
                start: true,
                stop: false,
                play: has_recording,
                format: true,
            },
            SessionState::Playing | SessionState::Paused => Self {
                start: false,
                stop: true,
                play: true,
                format: false,
            },
        }
    }
}

/// What pressing Play will do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAffordance {
    Play,
    Pause,
}

impl PlayAffordance {
    /// Affordance as a pure function of the session state
    pub const fn for_state(state: SessionState) -> Self {
        match state {
            SessionState::Playing => Self::Pause,
            _ => Self::Play,
        }
    }

    /// Button caption
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Play => "Play",
            Self::Pause => "Pause",
        }
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Recorder session entity.
/// Owns the state and rejects transitions the buttons would not allow.
///
/// State machine:
///   IDLE/STOPPED -> RECORDING (start_recording)
///   IDLE/STOPPED -> IDLE (permission_missing)
///   RECORDING -> STOPPED(true) (stop_recording)
///   RECORDING -> IDLE (fail_capture)
///   STOPPED(true) -> PLAYING (start_playback)
///   PLAYING <-> PAUSED (pause_playback / resume_playback)
///   PLAYING/PAUSED -> STOPPED(true) (stop_playback, fail_playback)
///   PLAYING -> STOPPED(true) (complete_playback)
#[derive(Debug, Default)]
pub struct RecorderSession {
    state: SessionState,
}

impl RecorderSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Get the button enablement for the current state
    pub fn buttons(&self) -> ButtonStates {
        ButtonStates::for_state(self.state)
    }

    /// Check if currently recording
    pub fn is_recording(&self) -> bool {
        self.state == SessionState::Recording
    }

    /// Check if currently playing (not paused)
    pub fn is_playing(&self) -> bool {
        self.state == SessionState::Playing
    }

    fn reject(&self, action: &str) -> InvalidStateTransition {
        InvalidStateTransition {
            current_state: self.state,
            action: action.to_string(),
        }
    }

    /// Fail unless the Start button is enabled
    pub fn check_start(&self) -> Result<(), InvalidStateTransition> {
        if !self.buttons().start {
            return Err(self.reject("start recording"));
        }
        Ok(())
    }

    /// Fail unless the Stop button is enabled
    pub fn check_stop(&self) -> Result<(), InvalidStateTransition> {
        if !self.buttons().stop {
            return Err(self.reject("stop"));
        }
        Ok(())
    }

    /// Fail unless the Format button is enabled
    pub fn check_format(&self) -> Result<(), InvalidStateTransition> {
        if !self.buttons().format {
            return Err(self.reject("change format"));
        }
        Ok(())
    }

    /// Transition from IDLE/STOPPED to RECORDING
    pub fn start_recording(&mut self) -> Result<(), InvalidStateTransition> {
        self.check_start()?;
        self.state = SessionState::Recording;
        Ok(())
    }

    /// Transition from IDLE/STOPPED to IDLE while permission is requested
    pub fn permission_missing(&mut self) -> Result<(), InvalidStateTransition> {
        if !self.buttons().start {
            return Err(self.reject("request permission"));
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Transition from RECORDING to STOPPED(true)
    pub fn stop_recording(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(self.reject("stop recording"));
        }
        self.state = SessionState::Stopped {
            has_recording: true,
        };
        Ok(())
    }

    /// Transition from RECORDING to IDLE after a capture failure
    pub fn fail_capture(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Recording {
            return Err(self.reject("abandon recording"));
        }
        self.state = SessionState::Idle;
        Ok(())
    }

    /// Transition from STOPPED(true) to PLAYING
    pub fn start_playback(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state
            != (SessionState::Stopped {
                has_recording: true,
            })
        {
            return Err(self.reject("play recording"));
        }
        self.state = SessionState::Playing;
        Ok(())
    }

    /// Transition from PLAYING to PAUSED
    pub fn pause_playback(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Playing {
            return Err(self.reject("pause playback"));
        }
        self.state = SessionState::Paused;
        Ok(())
    }

    /// Transition from PAUSED to PLAYING
    pub fn resume_playback(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Paused {
            return Err(self.reject("resume playback"));
        }
        self.state = SessionState::Playing;
        Ok(())
    }

    /// Transition from PLAYING/PAUSED to STOPPED(true)
    pub fn stop_playback(&mut self) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return Err(self.reject("stop playback"));
        }
        self.state = SessionState::Stopped {
            has_recording: true,
        };
        Ok(())
    }

    /// Transition from PLAYING/PAUSED to STOPPED(true) after a playback failure
    pub fn fail_playback(&mut self) -> Result<(), InvalidStateTransition> {
        if !matches!(self.state, SessionState::Playing | SessionState::Paused) {
            return Err(self.reject("abandon playback"));
        }
        self.state = SessionState::Stopped {
            has_recording: true,
        };
        Ok(())
    }

    /// Transition from PLAYING to STOPPED(true) when the clip ends
    pub fn complete_playback(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != SessionState::Playing {
            return Err(self.reject("complete playback"));
        }
        self.state = SessionState::Stopped {
            has_recording: true,
        };
        Ok(())
    }
}
