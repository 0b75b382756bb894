use std::path::PathBuf;

/// A playable item. Built by a track source and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Track {
    pub file: PathBuf,
    pub title: String,
    pub artist: Option<String>,
}

impl Track {
    pub fn new(file: impl Into<PathBuf>, title: impl Into<String>, artist: Option<String>) -> Self {
        Self {
            file: file.into(),
            title: title.into(),
            artist,
        }
    }

    /// The artist name, or `fallback` when the track has none.
    pub fn artist_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.artist.as_deref().unwrap_or(fallback)
    }
}
