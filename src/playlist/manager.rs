use std::ops::Deref;
use std::sync::Arc;

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::library::Track;

use super::shuffle::fisher_yates;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaylistError {
    /// The source produced no tracks (or could not be read at all).
    #[error("no tracks to play")]
    EmptySource,
    /// Index arithmetic went outside the playlist. Indicates a bug.
    #[error("track index {index} is out of range for a playlist of {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// A snapshot of the play order.
///
/// Cloning is cheap and a clone keeps its order even after the manager
/// reshuffles, since reshuffling swaps in a new list instead of editing
/// this one.
#[derive(Debug, Clone)]
pub struct Playlist(Arc<[Track]>);

impl Playlist {
    /// Whether both snapshots are the very same list.
    pub fn same_list(&self, other: &Playlist) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl Deref for Playlist {
    type Target = [Track];

    fn deref(&self) -> &[Track] {
        &self.0
    }
}

impl From<Vec<Track>> for Playlist {
    fn from(tracks: Vec<Track>) -> Self {
        Self(Arc::from(tracks))
    }
}

/// Owns the play order and decides how it changes.
pub struct PlaylistManager {
    order: Playlist,
    rng: StdRng,
    reshuffles: u64,
}

impl Default for PlaylistManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaylistManager {
    /// Create an empty manager shuffling with fresh entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create an empty manager whose shuffles are reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            order: Playlist::default(),
            rng,
            reshuffles: 0,
        }
    }

    /// Replace the playlist with a random permutation of `tracks`.
    ///
    /// Fails with `EmptySource` when `tracks` is empty; the current order is
    /// left untouched in that case.
    pub fn load(&mut self, mut tracks: Vec<Track>) -> Result<Playlist, PlaylistError> {
        if tracks.is_empty() {
            return Err(PlaylistError::EmptySource);
        }

        fisher_yates(&mut tracks, &mut self.rng);
        self.order = Playlist::from(tracks);
        self.reshuffles = 0;
        info!("loaded {} tracks in shuffled order", self.order.len());

        Ok(self.order.clone())
    }

    /// Shuffle the current tracks into a fresh order. Indices held by the
    /// caller are not adjusted.
    pub fn reshuffle(&mut self) -> Playlist {
        let mut tracks = self.order.to_vec();
        fisher_yates(&mut tracks, &mut self.rng);
        self.order = Playlist::from(tracks);
        self.reshuffles += 1;
        info!("playlist reshuffled for continuous play");

        self.order.clone()
    }

    /// The index one step from `current` in `direction`, wrapping at both ends.
    pub fn index_after(&self, current: usize, direction: Direction) -> usize {
        let len = self.order.len();
        if len == 0 {
            return 0;
        }

        let next = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current % len + len - 1) % len,
        };
        debug!("index_after({current}, {direction:?}) = {next}");
        next
    }

    pub fn track_at(&self, index: usize) -> Result<&Track, PlaylistError> {
        self.order.get(index).ok_or(PlaylistError::IndexOutOfRange {
            index,
            len: self.order.len(),
        })
    }

    /// Current play order.
    pub fn playlist(&self) -> Playlist {
        self.order.clone()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of reshuffles since the last successful `load`.
    pub fn reshuffle_count(&self) -> u64 {
        self.reshuffles
    }
}
