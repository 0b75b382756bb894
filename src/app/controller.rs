use log::{debug, info, warn};

use crate::audio::AudioOutput;
use crate::library::{FetchResult, Track};
use crate::playlist::{Direction, Playlist, PlaylistError, PlaylistManager};

use super::command::Command;
use super::state::{PlaybackState, PlayerStatus};

/// The playback state machine.
///
/// Every user command and every audio notification goes through here. The
/// controller is `Empty` until a non-empty track list is loaded; in that
/// state playback commands are silently ignored.
pub struct Controller<O: AudioOutput> {
    output: O,
    playlist: PlaylistManager,
    state: PlaybackState,
    loaded: bool,
    autoplay: bool,
    volume: f32,
    empty_message: Option<String>,
    // Tracks that failed to play in a row since something last played.
    failures: usize,
}

impl<O: AudioOutput> Controller<O> {
    /// Create an empty controller and apply the initial `volume` to `output`.
    pub fn new(mut output: O, playlist: PlaylistManager, volume: f32) -> Self {
        let volume = clamp_unit(volume as f64) as f32;
        output.set_volume(volume);

        Self {
            output,
            playlist,
            state: PlaybackState::default(),
            loaded: false,
            autoplay: false,
            volume,
            empty_message: None,
            failures: 0,
        }
    }

    /// Start playing as soon as a library loads.
    pub fn set_autoplay(&mut self, autoplay: bool) {
        self.autoplay = autoplay;
    }

    /// Take the result of the startup track fetch.
    ///
    /// A failed fetch or an empty listing leaves the controller `Empty` with
    /// an explanatory message and returns `EmptySource`. On success the first
    /// track of the shuffled order is loaded, paused, and the number of
    /// tracks is returned.
    pub fn initialize(&mut self, fetched: FetchResult) -> Result<usize, PlaylistError> {
        let tracks = match fetched {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!("track listing failed: {e}");
                self.enter_empty(format!("Could not load tracks: {e}"));
                return Err(PlaylistError::EmptySource);
            }
        };

        let playlist = match self.playlist.load(tracks) {
            Ok(playlist) => playlist,
            Err(e) => {
                warn!("track listing is empty");
                self.enter_empty("No songs found in the music folder.".to_string());
                return Err(e);
            }
        };

        self.loaded = true;
        self.empty_message = None;
        self.failures = 0;
        self.state = PlaybackState {
            is_muted: self.state.is_muted,
            ..PlaybackState::default()
        };
        self.load_track(0)?;
        info!("library ready with {} tracks", playlist.len());

        if self.autoplay {
            self.play();
        }
        Ok(playlist.len())
    }

    fn enter_empty(&mut self, message: String) {
        if self.state.is_playing {
            self.output.pause();
        }
        self.loaded = false;
        self.state = PlaybackState {
            is_muted: self.state.is_muted,
            ..PlaybackState::default()
        };
        self.empty_message = Some(message);
    }

    /// Dispatch `command` to the matching method.
    pub fn apply(&mut self, command: Command) -> Result<(), PlaylistError> {
        debug!("command {command:?}");
        match command {
            Command::TogglePlayPause => self.toggle_play_pause(),
            Command::Play => self.play(),
            Command::Pause => self.pause(),
            Command::Skip(direction) => self.skip(direction),
            Command::ToggleMute => self.toggle_mute(),
            Command::Seek(fraction) => self.seek(fraction),
            Command::SelectTrack(index) => return self.select_track(index),
            Command::AdjustVolume(delta) => self.adjust_volume(delta),
        }
        Ok(())
    }

    pub fn toggle_play_pause(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Start playback unless already playing.
    pub fn play(&mut self) {
        if !self.loaded || self.state.is_playing {
            return;
        }
        self.failures = 0;
        self.output.play();
        self.state.is_playing = true;
    }

    /// Pause playback unless already paused.
    pub fn pause(&mut self) {
        if !self.loaded || !self.state.is_playing {
            return;
        }
        self.output.pause();
        self.state.is_playing = false;
    }

    /// Move one track forward or back, keeping the current play/pause state.
    ///
    /// Wrapping forward from the last track to the first reshuffles the
    /// playlist first (when there is more than one track). Wrapping
    /// backwards never reshuffles.
    pub fn skip(&mut self, direction: Direction) {
        if !self.loaded {
            return;
        }

        let next = self
            .playlist
            .index_after(self.state.current_index, direction);
        if direction == Direction::Next && next == 0 && self.playlist.len() > 1 {
            self.playlist.reshuffle();
        }

        if let Err(e) = self.load_track(next) {
            warn!("skip {direction:?} failed: {e}");
            return;
        }
        if self.state.is_playing {
            self.output.play();
        }
    }

    /// The loaded track played to its end: advance and keep playing.
    pub fn on_track_ended(&mut self) {
        if !self.loaded {
            return;
        }
        self.state.is_playing = true;
        self.skip(Direction::Next);
    }

    /// The loaded track could not be played. Moves on like `on_track_ended`,
    /// but once every track of the playlist has failed in a row playback
    /// stops instead of cycling through unplayable files forever.
    pub fn on_track_failed(&mut self) {
        if !self.loaded {
            return;
        }
        self.failures += 1;
        if self.failures >= self.playlist.len() {
            warn!("{} tracks in a row failed to play, stopping", self.failures);
            self.failures = 0;
            if self.state.is_playing {
                self.output.pause();
                self.state.is_playing = false;
            }
            return;
        }
        self.on_track_ended();
    }

    /// Recompute progress from a position report. Reports without a usable
    /// duration (zero, negative, NaN, infinite) are ignored.
    pub fn on_time_update(&mut self, current: f64, duration: f64) {
        if !self.loaded || !current.is_finite() || !duration.is_finite() || duration <= 0.0 {
            return;
        }
        self.state.progress = clamp_unit(current / duration);
        self.failures = 0;
    }

    /// Jump to `fraction` of the loaded track, clamped to 0.0..=1.0.
    ///
    /// Ignored while the output does not know the track's duration yet.
    pub fn seek(&mut self, fraction: f64) {
        if !self.loaded {
            return;
        }
        let fraction = clamp_unit(fraction);

        match self.output.duration() {
            Some(duration) if duration.is_finite() && duration > 0.0 => {
                self.output.set_current_time(fraction * duration);
            }
            _ => debug!("seek to {fraction} ignored, duration unknown"),
        }
    }

    pub fn toggle_mute(&mut self) {
        if !self.loaded {
            return;
        }
        self.state.is_muted = !self.state.is_muted;
        self.output.set_muted(self.state.is_muted);
    }

    /// Load the track at `index` of the play order and start playing it,
    /// whatever the previous play state was.
    pub fn select_track(&mut self, index: usize) -> Result<(), PlaylistError> {
        if !self.loaded {
            return Ok(());
        }
        self.load_track(index)?;
        self.failures = 0;
        self.output.play();
        self.state.is_playing = true;
        Ok(())
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = clamp_unit(volume as f64) as f32;
        self.output.set_volume(self.volume);
    }

    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    fn load_track(&mut self, index: usize) -> Result<(), PlaylistError> {
        let track = self.playlist.track_at(index)?;
        self.output.load(&track.file);
        debug!("loaded #{index}: {}", track.title);

        self.state.current_index = index;
        self.state.progress = 0.0;
        Ok(())
    }

    pub fn status(&self) -> PlayerStatus {
        match (self.loaded, self.state.is_playing) {
            (false, _) => PlayerStatus::Empty,
            (true, false) => PlayerStatus::Stopped,
            (true, true) => PlayerStatus::Playing,
        }
    }

    pub fn current_index(&self) -> Option<usize> {
        self.loaded.then_some(self.state.current_index)
    }

    pub fn current_track(&self) -> Option<&Track> {
        if !self.loaded {
            return None;
        }
        self.playlist.track_at(self.state.current_index).ok()
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_muted(&self) -> bool {
        self.state.is_muted
    }

    pub fn progress(&self) -> f64 {
        self.state.progress
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Current play order; empty while nothing is loaded.
    pub fn playlist(&self) -> Playlist {
        if self.loaded {
            self.playlist.playlist()
        } else {
            Playlist::default()
        }
    }

    pub fn reshuffle_count(&self) -> u64 {
        self.playlist.reshuffle_count()
    }

    /// Why the library is empty, once a load attempt has failed.
    pub fn empty_message(&self) -> Option<&str> {
        self.empty_message.as_deref()
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}

/// Clamp into 0.0..=1.0, mapping NaN to 0.0.
fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
