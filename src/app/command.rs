use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::playlist::Direction;

/// A request to the playback controller, whatever input it came from.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    TogglePlayPause,
    Play,
    Pause,
    Skip(Direction),
    ToggleMute,
    /// Jump to a fraction (0.0..=1.0) of the loaded track.
    Seek(f64),
    /// Jump to a playlist position and start playing it.
    SelectTrack(usize),
    /// Change the volume by a signed step.
    AdjustVolume(f32),
}

impl Command {
    /// Playback command bound to `key`, if any.
    ///
    /// Space toggles playback, Left/Right skip, `m` mutes and `+`/`-`
    /// step the volume by `volume_step`. Keys held with Ctrl or Alt are
    /// left to the caller.
    pub fn from_key(key: &KeyEvent, volume_step: f32) -> Option<Self> {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return None;
        }

        match key.code {
            KeyCode::Char(' ') => Some(Self::TogglePlayPause),
            KeyCode::Left => Some(Self::Skip(Direction::Previous)),
            KeyCode::Right => Some(Self::Skip(Direction::Next)),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(Self::ToggleMute),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Self::AdjustVolume(volume_step)),
            KeyCode::Char('-') => Some(Self::AdjustVolume(-volume_step)),
            _ => None,
        }
    }
}
