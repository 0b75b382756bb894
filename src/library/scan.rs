use std::borrow::Cow;
use std::path::{Path, PathBuf};

use lofty::prelude::*;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::display::split_artist_title;
use super::model::Track;
use super::source::{FetchResult, LibraryError, TrackSource};

/// Lists the audio files of a music folder.
pub struct DirectorySource {
    dir: PathBuf,
    settings: LibrarySettings,
}

impl DirectorySource {
    pub fn new(dir: impl Into<PathBuf>, settings: LibrarySettings) -> Self {
        Self {
            dir: dir.into(),
            settings,
        }
    }
}

impl TrackSource for DirectorySource {
    fn describe(&self) -> String {
        format!("music folder {}", self.dir.display())
    }

    fn fetch(&self) -> FetchResult {
        if !self.dir.is_dir() {
            return Err(LibraryError::MissingDir(self.dir.clone()));
        }
        Ok(scan(&self.dir, &self.settings))
    }
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Title and artist from the file's tags, when present and non-blank.
fn read_tags(path: &Path) -> (Option<String>, Option<String>) {
    let Ok(tagged) = lofty::read_from_path(path) else {
        return (None, None);
    };
    let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) else {
        return (None, None);
    };

    (non_blank(tag.title()), non_blank(tag.artist()))
}

fn non_blank(value: Option<Cow<'_, str>>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Scan `dir` for audio files, naming them after their `Artist - Title`
/// file stem. Results are ordered by path relative to `dir`.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Track> {
    let mut found: Vec<(String, Track)> = Vec::new();

    let mut walker = WalkDir::new(dir)
        .follow_links(settings.follow_links)
        .min_depth(1);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, settings) {
            continue;
        }

        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN");
        let (mut title, mut artist) = split_artist_title(stem);

        if settings.read_tags {
            let (tag_title, tag_artist) = read_tags(path);
            if let Some(t) = tag_title {
                title = t;
            }
            if tag_artist.is_some() {
                artist = tag_artist;
            }
        }

        let key = path
            .strip_prefix(dir)
            .unwrap_or(path)
            .to_string_lossy()
            .into_owned();
        found.push((key, Track::new(path, title, artist)));
    }

    found.sort_by(|a, b| a.0.cmp(&b.0));
    found.into_iter().map(|(_, track)| track).collect()
}
