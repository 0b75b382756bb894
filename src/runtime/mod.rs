use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::EnableMouseCapture;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, enable_raw_mode};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::Controller;
use crate::audio::AudioPlayer;
use crate::library::spawn_fetch;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = startup::load_settings();
    startup::init_logging(&settings.logging);

    let source = startup::track_source(&settings.library, env::args().nth(1));
    info!("loading tracks from {}", source.describe());
    let fetch = spawn_fetch(source);

    let audio_player = AudioPlayer::new(Duration::from_millis(settings.audio.tick_ms));
    let mut controller = Controller::new(
        audio_player,
        startup::playlist_manager(&settings.playback),
        settings.audio.volume,
    );
    controller.set_autoplay(settings.playback.autoplay);

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = settings
        .ui
        .mpris
        .then(|| crate::mpris::spawn_mpris(control_tx));

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(fetch);

        event_loop::run(
            &mut terminal,
            &settings,
            &mut controller,
            mpris.as_ref(),
            &control_rx,
            &mut state,
        )
    })();

    startup::restore_terminal();
    terminal.show_cursor()?;
    controller.output().quit();

    run_result
}
