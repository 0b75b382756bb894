use std::collections::HashMap;
use std::sync::{Arc, Mutex, mpsc::Sender};
use std::time::Duration;

use async_io::{Timer, block_on};
use log::{info, warn};
use zbus::{connection, interface};
use zvariant::{OwnedValue, Value};

use crate::app::PlayerStatus;
use crate::library::Track;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.shuffler";

/// Requests coming from desktop media controls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

#[derive(Debug, Default)]
struct SharedState {
    status: PlayerStatus,
    title: Option<String>,
    artist: Option<String>,
    url: Option<String>,
}

/// Publishes player state to the D-Bus service thread.
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
}

impl MprisHandle {
    pub fn set_status(&self, status: PlayerStatus) {
        if let Ok(mut s) = self.state.lock() {
            s.status = status;
        }
    }

    /// Replace the now-playing metadata; `None` clears it.
    pub fn set_track(&self, track: Option<&Track>) {
        let Ok(mut s) = self.state.lock() else {
            return;
        };
        s.title = track.map(|t| t.title.clone());
        s.artist = track.and_then(|t| t.artist.clone());
        s.url = track.map(|t| format!("file://{}", t.file.display()));
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "shuffler"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

impl PlayerIface {
    fn status(&self) -> PlayerStatus {
        self.state.lock().map(|s| s.status).unwrap_or_default()
    }

    fn has_track(&self) -> bool {
        self.status() != PlayerStatus::Empty
    }
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    /// A loaded but paused track reports `Paused`; only an empty player is
    /// `Stopped`.
    #[zbus(property)]
    fn playback_status(&self) -> &str {
        match self.status() {
            PlayerStatus::Empty => "Stopped",
            PlayerStatus::Stopped => "Paused",
            PlayerStatus::Playing => "Playing",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        self.has_track()
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        self.has_track()
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        self.has_track()
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        self.has_track()
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(title) = &s.title {
            insert(&mut map, "xesam:title", Value::from(title.as_str()));
        }
        if let Some(artist) = &s.artist {
            insert(&mut map, "xesam:artist", Value::from(vec![artist.as_str()]));
        }
        if let Some(url) = &s.url {
            insert(&mut map, "xesam:url", Value::from(url.as_str()));
        }
        map
    }
}

fn insert(map: &mut HashMap<String, OwnedValue>, key: &str, value: Value<'_>) {
    match OwnedValue::try_from(value) {
        Ok(v) => {
            map.insert(key.to_string(), v);
        }
        Err(e) => warn!("MPRIS: dropping {key}: {e}"),
    }
}

/// Serve the MPRIS interfaces on the session bus from a background thread.
///
/// Failing to reach the bus only disables media-key support; the returned
/// handle keeps working either way.
pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        if let Err(e) = block_on(serve(tx, state_for_thread)) {
            warn!("MPRIS: service unavailable: {e}");
        }
    });

    MprisHandle { state }
}

async fn serve(tx: Sender<ControlCmd>, state: Arc<Mutex<SharedState>>) -> zbus::Result<()> {
    let root = RootIface { tx: tx.clone() };
    let player = PlayerIface { tx, state };

    let _connection = connection::Builder::session()?
        .name(BUS_NAME)?
        .serve_at(OBJECT_PATH, root)?
        .serve_at(OBJECT_PATH, player)?
        .build()
        .await?;
    info!("MPRIS: serving {BUS_NAME}");

    // The service lives as long as the connection does.
    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}

#[cfg(test)]
mod tests;
