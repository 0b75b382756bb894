//! Audio output: the capability the playback controller drives, and its
//! rodio-backed implementation running on a dedicated thread.

mod output;
mod player;
mod sink;
mod thread;
mod types;

pub use output::{AudioEvent, AudioOutput};
pub use player::AudioPlayer;

#[cfg(test)]
mod tests;
