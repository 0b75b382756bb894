//! JSON track manifests in the shape served by the original songs endpoint:
//! `{ "songs": [ { "file": "...", "title": "...", "artist": "..." } ], "count": N }`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::display::split_artist_title;
use super::model::Track;
use super::source::{FetchResult, LibraryError, TrackSource};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Manifest {
    songs: Vec<ManifestEntry>,
}

#[derive(Debug, Deserialize)]
struct ManifestEntry {
    file: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    artist: Option<String>,
}

/// Reads the track listing from a JSON manifest file.
///
/// Relative `file` entries are resolved against the manifest's directory.
pub struct ManifestSource {
    path: PathBuf,
}

impl ManifestSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TrackSource for ManifestSource {
    fn describe(&self) -> String {
        format!("manifest {}", self.path.display())
    }

    fn fetch(&self) -> FetchResult {
        let text = fs::read_to_string(&self.path).map_err(|source| LibraryError::Io {
            path: self.path.clone(),
            source,
        })?;
        let base = self.path.parent().unwrap_or(Path::new(""));
        parse_manifest(&text, base).map_err(|source| LibraryError::Manifest {
            path: self.path.clone(),
            source,
        })
    }
}

fn parse_manifest(text: &str, base: &Path) -> Result<Vec<Track>, serde_json::Error> {
    let manifest: Manifest = serde_json::from_str(text)?;

    let tracks = manifest
        .songs
        .into_iter()
        .filter(|entry| !entry.file.trim().is_empty())
        .map(|entry| {
            let file = Path::new(&entry.file);
            let file = if file.is_absolute() {
                file.to_path_buf()
            } else {
                base.join(file)
            };

            let (stem_title, stem_artist) = split_artist_title(
                file.file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("UNKNOWN"),
            );
            let title = entry
                .title
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .unwrap_or(stem_title);
            let artist = match entry.artist {
                Some(a) => Some(a.trim().to_string()).filter(|a| !a.is_empty()),
                None => stem_artist,
            };

            Track::new(file, title, artist)
        })
        .collect();

    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_manifest_resolves_relative_files_against_base() {
        let text = r#"{
            "songs": [
                { "file": "music/Band - Song.mp3", "title": "Song", "artist": "Band", "filename": "Band - Song.mp3" },
                { "file": "/abs/solo.ogg", "title": "Solo" }
            ],
            "count": 2
        }"#;

        let tracks = parse_manifest(text, Path::new("/srv/player")).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].file, PathBuf::from("/srv/player/music/Band - Song.mp3"));
        assert_eq!(tracks[0].artist.as_deref(), Some("Band"));
        assert_eq!(tracks[1].file, PathBuf::from("/abs/solo.ogg"));
        assert_eq!(tracks[1].title, "Solo");
        assert_eq!(tracks[1].artist, None);
    }

    #[test]
    fn parse_manifest_falls_back_to_file_stem_and_blank_artist_is_absent() {
        let text = r#"{ "songs": [
            { "file": "Artist - Title.mp3" },
            { "file": "x.mp3", "title": "  ", "artist": "  " }
        ] }"#;

        let tracks = parse_manifest(text, Path::new("")).unwrap();
        assert_eq!(tracks[0].title, "Title");
        assert_eq!(tracks[0].artist.as_deref(), Some("Artist"));
        assert_eq!(tracks[1].title, "x");
        assert_eq!(tracks[1].artist, None);
    }

    #[test]
    fn parse_manifest_without_songs_is_empty() {
        assert!(parse_manifest("{}", Path::new("")).unwrap().is_empty());
        assert!(parse_manifest("[1, 2]", Path::new("")).is_err());
    }
}
