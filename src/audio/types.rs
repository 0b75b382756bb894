//! Audio-related small types and handles.
//!
//! Commands sent to the audio thread, the playback info it publishes and
//! the errors it can hit.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

use super::output::AudioEvent;

#[derive(Debug)]
pub enum AudioCmd {
    /// Open and decode the file, paused at the start. The number tags every
    /// event the file produces.
    Load(PathBuf, u64),
    /// Resume playback of the loaded file.
    Play,
    /// Pause playback, keeping the position.
    Pause,
    /// Jump to the given position in the loaded file.
    Seek(Duration),
    /// Set the user volume (0.0..=1.0).
    SetVolume(f32),
    /// Silence output without forgetting the user volume.
    SetMuted(bool),
    /// Stop playback and end the audio thread.
    Quit,
}

/// Playback information published by the audio thread.
#[derive(Debug, Clone, Default)]
pub struct PlaybackInfo {
    /// Length of the loaded file, when the decoder or tags report one.
    pub duration: Option<Duration>,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

/// An event together with the load it belongs to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TaggedEvent {
    pub load: u64,
    pub event: AudioEvent,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio output device: {0}")]
    Device(String),
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
