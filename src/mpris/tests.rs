use super::*;
use std::sync::mpsc;

fn iface() -> (PlayerIface, MprisHandle, mpsc::Receiver<ControlCmd>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };
    (iface, MprisHandle { state }, rx)
}

#[test]
fn set_track_sets_and_clears_shared_state() {
    let (_iface, handle, _rx) = iface();

    let track = Track::new(
        "/tmp/music/Test Artist - Test Title.mp3",
        "Test Title",
        Some("Test Artist".to_string()),
    );
    handle.set_track(Some(&track));
    {
        let s = handle.state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Test Title"));
        assert_eq!(s.artist.as_deref(), Some("Test Artist"));
        assert!(s.url.as_deref().unwrap().starts_with("file:///tmp/music/"));
    }

    handle.set_track(None);
    {
        let s = handle.state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.artist, None);
        assert_eq!(s.url, None);
    }
}

#[test]
fn playback_status_maps_player_status() {
    let (iface, handle, _rx) = iface();

    assert_eq!(iface.playback_status(), "Stopped");
    assert!(!iface.can_play());

    handle.set_status(PlayerStatus::Stopped);
    assert_eq!(iface.playback_status(), "Paused");
    assert!(iface.can_go_next());

    handle.set_status(PlayerStatus::Playing);
    assert_eq!(iface.playback_status(), "Playing");
}

#[test]
fn metadata_omits_missing_artist() {
    let (iface, handle, _rx) = iface();
    assert!(iface.metadata().is_empty());

    handle.set_track(Some(&Track::new("/m/a.mp3", "Solo", None)));
    let map = iface.metadata();
    assert!(map.contains_key("xesam:title"));
    assert!(map.contains_key("xesam:url"));
    assert!(!map.contains_key("xesam:artist"));

    handle.set_track(Some(&Track::new("/m/b.mp3", "Duet", Some("Band".to_string()))));
    assert!(iface.metadata().contains_key("xesam:artist"));
}

#[test]
fn player_methods_forward_commands() {
    let (iface, _handle, rx) = iface();

    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop
        ]
    );
}
