//! Playback infrastructure module

mod rodio;

pub use rodio::{decode_args, pcm_from_le_bytes, samples_to_ms, RodioPlaybackService};
