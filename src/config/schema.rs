use std::path::PathBuf;

use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/shuffler/config.toml` or `~/.config/shuffler/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SHUFFLER__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub audio: AudioSettings,
    pub playback: PlaybackSettings,
    pub library: LibrarySettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Output volume applied at startup, from 0.0 to 1.0.
    pub volume: f32,
    /// How often the audio thread reports playback position (milliseconds).
    pub tick_ms: u64,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            volume: 0.7,
            tick_ms: 250,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Start playing the first track as soon as the library loads.
    pub autoplay: bool,
    /// Fixed seed for the shuffle order. Unset = fresh entropy per run.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Music folder to scan when no directory is passed on the command line.
    pub dir: PathBuf,
    /// JSON track manifest to read instead of scanning a folder.
    pub manifest: Option<PathBuf>,
    /// File extensions to treat as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
    /// Whether to recurse into subdirectories.
    pub recursive: bool,
    /// Optional cap on directory recursion depth.
    pub max_depth: Option<usize>,
    /// Prefer title/artist tags over the `Artist - Title` file name.
    pub read_tags: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("music"),
            manifest: None,
            extensions: ["mp3", "wav", "ogg", "m4a", "flac", "aac"]
                .into_iter()
                .map(String::from)
                .collect(),
            follow_links: true,
            include_hidden: false,
            recursive: false,
            max_depth: None,
            read_tags: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change per `+` / `-` key press.
    pub volume_step: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { volume_step: 0.05 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Shown in place of the artist for tracks that have none.
    pub unknown_artist: String,
    /// Whether the playlist cursor jumps to each newly loaded track.
    pub follow_playback: bool,
    /// Expose the player on the session bus as an MPRIS service.
    pub mpris: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ shuffler ~ ".to_string(),
            unknown_artist: "Unknown Artist".to_string(),
            follow_playback: true,
            mpris: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`. Logs go to stderr,
    /// so redirect it (`2>shuffler.log`) when raising this.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
        }
    }
}
