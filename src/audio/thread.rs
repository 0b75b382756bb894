use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error};
use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::output::AudioEvent;
use super::sink::{create_sink_at, probe_duration};
use super::types::{AudioCmd, AudioError, PlaybackHandle, TaggedEvent};

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<TaggedEvent>,
    playback_info: PlaybackHandle,
    tick: Duration,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                error!("{}", AudioError::Device(e.to_string()));
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped. That's useful in debugging,
        // but noisy for a TUI app.
        stream.log_on_drop(false);

        let mut deck = Deck::new(playback_info);
        let mut last_tick = Instant::now();

        loop {
            match rx.recv_timeout(tick) {
                Ok(cmd) => match cmd {
                    AudioCmd::Load(file, load) => deck.load(&stream, file, load),
                    AudioCmd::Play => deck.play(&events),
                    AudioCmd::Pause => deck.pause(),
                    AudioCmd::Seek(to) => {
                        deck.seek(&stream, to);
                        deck.report_time(&events);
                    }
                    AudioCmd::SetVolume(volume) => deck.set_volume(volume),
                    AudioCmd::SetMuted(muted) => deck.set_muted(muted),
                    AudioCmd::Quit => {
                        deck.stop();
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // A steady stream of commands must not starve progress reports.
            if last_tick.elapsed() >= tick {
                deck.tick(&events);
                last_tick = Instant::now();
            }
        }
    })
}

/// Everything the audio thread knows about the loaded file.
struct Deck {
    info: PlaybackHandle,
    sink: Option<Sink>,
    file: Option<PathBuf>,
    // Tag of the current load, echoed on every event.
    load: u64,
    // Loaded file could not be opened or decoded.
    failed: bool,
    paused: bool,
    // Start time and accumulated position while paused.
    started_at: Option<Instant>,
    accumulated: Duration,
    duration: Option<Duration>,
    volume: f32,
    muted: bool,
}

impl Deck {
    fn new(info: PlaybackHandle) -> Self {
        Self {
            info,
            sink: None,
            file: None,
            load: 0,
            failed: false,
            paused: true,
            started_at: None,
            accumulated: Duration::ZERO,
            duration: None,
            volume: 1.0,
            muted: false,
        }
    }

    fn load(&mut self, stream: &OutputStream, file: PathBuf, load: u64) {
        self.stop();
        self.load = load;

        match create_sink_at(stream, &file, Duration::ZERO) {
            Ok((sink, total)) => {
                sink.set_volume(effective_volume(self.volume, self.muted));
                self.duration = total.or_else(|| probe_duration(&file));
                self.sink = Some(sink);
                self.failed = false;
                debug!("loaded {} ({:?})", file.display(), self.duration);
            }
            Err(e) => {
                error!("{e}");
                self.duration = None;
                self.failed = true;
            }
        }

        self.file = Some(file);
        self.publish();
    }

    fn play(&mut self, events: &Sender<TaggedEvent>) {
        if self.failed {
            self.emit(events, AudioEvent::Failed);
            return;
        }

        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            sink.play();
            self.paused = false;
            self.started_at = Some(Instant::now());
        }
    }

    fn pause(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if !self.paused {
            sink.pause();
            self.accumulated = self.position();
            self.started_at = None;
            self.paused = true;
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    /// Rebuild the sink at `to`. Decoders only skip forward, so every seek
    /// reopens the file.
    fn seek(&mut self, stream: &OutputStream, to: Duration) {
        if self.failed {
            return;
        }
        let Some(file) = self.file.clone() else {
            return;
        };
        let to = clamp_seek(to, self.duration);

        if let Some(sink) = self.sink.take() {
            sink.stop();
        }

        match create_sink_at(stream, &file, to) {
            Ok((sink, _)) => {
                sink.set_volume(effective_volume(self.volume, self.muted));
                if self.paused {
                    self.started_at = None;
                } else {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(sink);
                self.accumulated = to;
            }
            Err(e) => {
                error!("{e}");
                self.failed = true;
                self.paused = true;
                self.started_at = None;
            }
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_volume();
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }

    fn apply_volume(&self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(effective_volume(self.volume, self.muted));
        }
    }

    fn tick(&mut self, events: &Sender<TaggedEvent>) {
        if self.paused {
            return;
        }
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if sink.empty() {
            self.accumulated = self.position();
            self.started_at = None;
            self.paused = true;
            self.emit(events, AudioEvent::Ended);
            return;
        }

        self.report_time(events);
    }

    fn report_time(&self, events: &Sender<TaggedEvent>) {
        let current = self.position().as_secs_f64();
        let duration = self.duration.map_or(f64::NAN, |d| d.as_secs_f64());
        self.emit(events, AudioEvent::TimeUpdate { current, duration });
    }

    fn emit(&self, events: &Sender<TaggedEvent>, event: AudioEvent) {
        let _ = events.send(TaggedEvent {
            load: self.load,
            event,
        });
    }

    fn position(&self) -> Duration {
        let pos = elapsed(self.accumulated, self.started_at, Instant::now());
        clamp_seek(pos, self.duration)
    }

    fn publish(&self) {
        if let Ok(mut info) = self.info.lock() {
            info.duration = self.duration;
        }
    }
}

/// Position given what was played before the last resume and when it resumed.
pub(super) fn elapsed(accumulated: Duration, started_at: Option<Instant>, now: Instant) -> Duration {
    accumulated + started_at.map_or(Duration::ZERO, |st| now.saturating_duration_since(st))
}

pub(super) fn effective_volume(volume: f32, muted: bool) -> f32 {
    if muted { 0.0 } else { volume.clamp(0.0, 1.0) }
}

pub(super) fn clamp_seek(to: Duration, duration: Option<Duration>) -> Duration {
    match duration {
        Some(total) => to.min(total),
        None => to,
    }
}
