//! Session domain module

mod state;

pub use state::{ButtonStates, InvalidStateTransition, PlayAffordance, RecorderSession, SessionState};
