use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_shuffler_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("SHUFFLER_CONFIG_PATH", "/tmp/shuffler-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/shuffler-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/xdg-config-home")
            .join("shuffler")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    let p = default_config_path().unwrap();
    assert_eq!(
        p,
        std::path::PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("shuffler")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_web_player() {
    let s = Settings::default();
    assert!((s.audio.volume - 0.7).abs() < f32::EPSILON);
    assert!(!s.playback.autoplay);
    assert_eq!(s.playback.seed, None);
    assert_eq!(s.library.dir, std::path::PathBuf::from("music"));
    assert_eq!(s.library.extensions.len(), 6);
    assert!(!s.library.recursive);
    assert_eq!(s.ui.unknown_artist, "Unknown Artist");
    assert_eq!(s.logging.level, "off");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.4
tick_ms = 100

[playback]
autoplay = true
seed = 42

[library]
dir = "/srv/music"
manifest = "/srv/songs.json"
extensions = ["mp3"]
recursive = true
include_hidden = true
read_tags = true

[controls]
volume_step = 0.1

[ui]
header_text = "hello"
unknown_artist = "?"
follow_playback = false
mpris = false

[logging]
level = "debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SHUFFLER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("SHUFFLER__AUDIO__VOLUME");

    let s = Settings::load().unwrap();
    assert!((s.audio.volume - 0.4).abs() < 1e-6);
    assert_eq!(s.audio.tick_ms, 100);
    assert!(s.playback.autoplay);
    assert_eq!(s.playback.seed, Some(42));
    assert_eq!(s.library.dir, std::path::PathBuf::from("/srv/music"));
    assert_eq!(
        s.library.manifest,
        Some(std::path::PathBuf::from("/srv/songs.json"))
    );
    assert_eq!(s.library.extensions, vec!["mp3".to_string()]);
    assert!(s.library.recursive);
    assert!(s.library.include_hidden);
    assert!(s.library.read_tags);
    assert!((s.controls.volume_step - 0.1).abs() < 1e-6);
    assert_eq!(s.ui.header_text, "hello");
    assert_eq!(s.ui.unknown_artist, "?");
    assert!(!s.ui.follow_playback);
    assert!(!s.ui.mpris);
    assert_eq!(s.logging.level, "debug");
    assert!(s.validate().is_ok());
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[audio]
volume = 0.9
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("SHUFFLER_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("SHUFFLER__AUDIO__VOLUME", "0.25");

    let s = Settings::load().unwrap();
    assert!((s.audio.volume - 0.25).abs() < 1e-6);
}

#[test]
fn validate_rejects_out_of_range_values() {
    let mut s = Settings::default();
    s.audio.volume = 1.5;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.controls.volume_step = 0.0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.logging.level = "loud".to_string();
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.audio.tick_ms = 0;
    assert!(s.validate().is_err());
}
