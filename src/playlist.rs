//! Play order: the shuffled track list, reshuffle-on-loop and wrap-around
//! index arithmetic.

mod manager;
mod shuffle;

pub use manager::{Direction, Playlist, PlaylistError, PlaylistManager};

#[cfg(test)]
mod tests;
