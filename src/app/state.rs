/// Coarse state of the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlayerStatus {
    /// No tracks loaded; every playback command is ignored.
    Empty,
    /// A track is loaded but not playing.
    Stopped,
    Playing,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self::Empty
    }
}

/// Playback state owned by the controller.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PlaybackState {
    /// Position of the loaded track in the current play order.
    pub current_index: usize,
    pub is_playing: bool,
    pub is_muted: bool,
    /// Played fraction of the loaded track, 0.0..=1.0.
    pub progress: f64,
}
