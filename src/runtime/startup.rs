use std::io;
use std::path::PathBuf;

use crossterm::event::DisableMouseCapture;
use crossterm::execute;
use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
use log::{LevelFilter, info};

use crate::config;
use crate::library::{DirectorySource, ManifestSource, TrackSource};
use crate::playlist::PlaylistManager;

/// Load settings, falling back to defaults when the file or the environment
/// is unusable. Runs before logging is set up, so problems go to stderr.
pub fn load_settings() -> config::Settings {
    let loaded = config::Settings::load()
        .map_err(|e| e.to_string())
        .and_then(|s| s.validate().map(|()| s));

    loaded.unwrap_or_else(|msg| {
        eprintln!("shuffler: ignoring config ({msg}), using defaults");
        config::Settings::default()
    })
}

/// Send `log` output to stderr at the configured level and log panics.
pub fn init_logging(settings: &config::LoggingSettings) {
    let level = settings.level.parse().unwrap_or(LevelFilter::Off);
    let mut clog = colog::default_builder();
    clog.filter(None, level);
    // A second init (tests, embedding) keeps the first logger.
    let _ = clog.try_init();

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        let current_thread = std::thread::current();
        let thread_name = current_thread.name().unwrap_or("unnamed");
        log::error!("panic in thread '{}': {}", thread_name, panic_info);
        default_hook(panic_info);
    }));
}

/// Leave raw mode and the alternate screen. Safe to call more than once.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
}

/// Where the tracks come from: the configured manifest, or else the folder
/// given on the command line, or else `library.dir`.
pub fn track_source(settings: &config::LibrarySettings, dir_arg: Option<String>) -> Box<dyn TrackSource> {
    if let Some(manifest) = &settings.manifest {
        return Box::new(ManifestSource::new(manifest.clone()));
    }

    let dir = dir_arg
        .map(PathBuf::from)
        .unwrap_or_else(|| settings.dir.clone());
    Box::new(DirectorySource::new(dir, settings.clone()))
}

pub fn playlist_manager(settings: &config::PlaybackSettings) -> PlaylistManager {
    match settings.seed {
        Some(seed) => {
            info!("shuffling with fixed seed {seed}");
            PlaylistManager::seeded(seed)
        }
        None => PlaylistManager::new(),
    }
}
