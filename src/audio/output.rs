use std::path::Path;

/// The playback primitive the controller issues commands to.
///
/// Implementations report progress back as [`AudioEvent`]s.
pub trait AudioOutput {
    /// Replace the current source with `file`. Any playing audio stops and
    /// the new source waits, paused, at position zero.
    fn load(&mut self, file: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    /// Move the playback position of the loaded source.
    fn set_current_time(&mut self, seconds: f64);
    /// Volume from 0.0 (silent) to 1.0 (full).
    fn set_volume(&mut self, volume: f32);
    fn set_muted(&mut self, muted: bool);
    /// Length of the loaded source in seconds, once known.
    fn duration(&self) -> Option<f64>;
}

/// Notifications emitted by an audio output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioEvent {
    /// Playback position moved. `duration` is NaN while unknown.
    TimeUpdate { current: f64, duration: f64 },
    /// The loaded source played to its end.
    Ended,
    /// The loaded source could not be opened or decoded, so playing it
    /// produced nothing.
    Failed,
}
