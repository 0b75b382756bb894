use std::path::Path;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use log::warn;

use super::output::{AudioEvent, AudioOutput};
use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo, TaggedEvent};

/// Handle to the audio thread. Commands are fire-and-forget; progress comes
/// back through [`AudioPlayer::events`].
pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    events: Receiver<TaggedEvent>,
    playback: PlaybackHandle,
    // Bumped on every `load`; events tagged with an older value are stale.
    loads: u64,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    /// Spawn the audio thread, reporting the position every `tick`.
    pub fn new(tick: Duration) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (event_tx, event_rx) = mpsc::channel::<TaggedEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(rx, event_tx, playback_info.clone(), tick);

        Self {
            tx,
            events: event_rx,
            playback: playback_info,
            loads: 0,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    /// Events emitted since the last call, without blocking. Events left
    /// over from a previously loaded file are dropped.
    pub fn events(&self) -> impl Iterator<Item = AudioEvent> + '_ {
        current_only(self.events.try_iter(), self.loads)
    }

    /// Stop playback and wait for the audio thread to finish.
    pub fn quit(&self) {
        let _ = self.send(AudioCmd::Quit);

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }

    fn dispatch(&self, cmd: AudioCmd) {
        if let Err(e) = self.send(cmd) {
            warn!("audio thread is not running, dropped {:?}", e.0);
        }
    }
}

impl AudioOutput for AudioPlayer {
    fn load(&mut self, file: &Path) {
        // Forget the previous file's length right away so a seek issued
        // before the thread catches up is not scaled by it.
        if let Ok(mut info) = self.playback.lock() {
            *info = PlaybackInfo::default();
        }
        self.loads += 1;
        self.dispatch(AudioCmd::Load(file.to_path_buf(), self.loads));
    }

    fn play(&mut self) {
        self.dispatch(AudioCmd::Play);
    }

    fn pause(&mut self) {
        self.dispatch(AudioCmd::Pause);
    }

    fn set_current_time(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.dispatch(AudioCmd::Seek(Duration::from_secs_f64(seconds.max(0.0))));
    }

    fn set_volume(&mut self, volume: f32) {
        self.dispatch(AudioCmd::SetVolume(volume));
    }

    fn set_muted(&mut self, muted: bool) {
        self.dispatch(AudioCmd::SetMuted(muted));
    }

    fn duration(&self) -> Option<f64> {
        let info = self.playback.lock().ok()?;
        info.duration.map(|d| d.as_secs_f64())
    }
}

/// Keep only events produced by load number `load`.
pub(super) fn current_only(
    tagged: impl Iterator<Item = TaggedEvent>,
    load: u64,
) -> impl Iterator<Item = AudioEvent> {
    tagged.filter(move |t| t.load == load).map(|t| t.event)
}
