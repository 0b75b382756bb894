use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::warn;
use ratatui::widgets::ListState;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{Command, Controller, PlayerStatus};
use crate::audio::{AudioEvent, AudioPlayer};
use crate::config;
use crate::library::{FetchResult, LibraryError};
use crate::mpris::{ControlCmd, MprisHandle};
use crate::playlist::Direction;
use crate::runtime::mpris_sync::update_mpris;
use crate::ui::{self, UiLayout};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Startup track listing, until it arrives.
    pub fetch: Option<mpsc::Receiver<FetchResult>>,
    /// Playlist cursor and scroll offset.
    pub list_state: ListState,
    /// Screen regions of the last drawn frame.
    pub layout: UiLayout,
    /// Last track index published to MPRIS.
    last_mpris_index: Option<usize>,
    /// Last status published to MPRIS.
    last_mpris_status: PlayerStatus,
    /// Index the cursor last followed, so manual moves stick until the next track.
    followed_index: Option<usize>,
}

impl EventLoopState {
    pub fn new(fetch: mpsc::Receiver<FetchResult>) -> Self {
        Self {
            fetch: Some(fetch),
            list_state: ListState::default(),
            layout: UiLayout::default(),
            last_mpris_index: None,
            last_mpris_status: PlayerStatus::Empty,
            followed_index: None,
        }
    }

    fn loading(&self) -> bool {
        self.fetch.is_some()
    }
}

/// Main terminal event loop: handles input, UI drawing, audio notifications
/// and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut Controller<AudioPlayer>,
    mpris: Option<&MprisHandle>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        poll_fetch(controller, state);

        // Collect first: handling an event borrows the controller mutably.
        let events: Vec<AudioEvent> = controller.output().events().collect();
        for ev in events {
            match ev {
                AudioEvent::TimeUpdate { current, duration } => {
                    controller.on_time_update(current, duration)
                }
                AudioEvent::Ended => controller.on_track_ended(),
                AudioEvent::Failed => controller.on_track_failed(),
            }
        }

        follow_playback(controller, state, settings.ui.follow_playback);

        // Keep MPRIS in sync even when playback changes come from media keys or auto-advance.
        if let Some(mpris) = mpris {
            let index = controller.current_index();
            let status = controller.status();
            if index != state.last_mpris_index || status != state.last_mpris_status {
                update_mpris(mpris, controller);
                state.last_mpris_index = index;
                state.last_mpris_status = status;
            }
        }

        let loading = state.loading();
        terminal.draw(|f| {
            state.layout = ui::draw(f, controller, &mut state.list_state, loading, &settings.ui);
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, controller) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            let quit = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, settings, controller, state)
                }
                Event::Mouse(mouse) => {
                    handle_mouse_event(mouse, controller, state);
                    false
                }
                _ => false,
            };
            if quit {
                break;
            }
        }
    }

    Ok(())
}

fn poll_fetch(controller: &mut Controller<AudioPlayer>, state: &mut EventLoopState) {
    let Some(rx) = &state.fetch else {
        return;
    };
    let fetched = match rx.try_recv() {
        Ok(fetched) => fetched,
        Err(TryRecvError::Empty) => return,
        Err(TryRecvError::Disconnected) => Err(LibraryError::Disconnected),
    };
    state.fetch = None;

    if controller.initialize(fetched).is_ok() {
        state.list_state.select(Some(0));
    } else {
        state.list_state.select(None);
    }
    state.followed_index = None;
}

/// Move the cursor onto the loaded track whenever a different one loads.
fn follow_playback(
    controller: &Controller<AudioPlayer>,
    state: &mut EventLoopState,
    enabled: bool,
) {
    let current = controller.current_index();
    if !enabled || current == state.followed_index {
        return;
    }
    state.followed_index = current;
    if current.is_some() {
        state.list_state.select(current);
    }
}

fn handle_control_cmd(cmd: ControlCmd, controller: &mut Controller<AudioPlayer>) -> bool {
    let command = match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => Command::Play,
        ControlCmd::Pause | ControlCmd::Stop => Command::Pause,
        ControlCmd::PlayPause => Command::TogglePlayPause,
        ControlCmd::Next => Command::Skip(Direction::Next),
        ControlCmd::Prev => Command::Skip(Direction::Previous),
    };
    apply(controller, command);
    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut Controller<AudioPlayer>,
    state: &mut EventLoopState,
) -> bool {
    let len = controller.playlist().len();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('j') | KeyCode::Down => move_cursor(state, len, 1),
        KeyCode::Char('k') | KeyCode::Up => move_cursor(state, len, -1),
        KeyCode::Enter => {
            if let Some(index) = state.list_state.selected().filter(|i| *i < len) {
                apply(controller, Command::SelectTrack(index));
            }
        }
        _ => {
            if let Some(command) = Command::from_key(&key, settings.controls.volume_step) {
                apply(controller, command);
            }
        }
    }

    false
}

fn handle_mouse_event(
    mouse: MouseEvent,
    controller: &mut Controller<AudioPlayer>,
    state: &mut EventLoopState,
) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }

    if let Some(fraction) = state.layout.seek_fraction(mouse.column, mouse.row) {
        apply(controller, Command::Seek(fraction));
        return;
    }

    let offset = state.list_state.offset();
    if let Some(index) = state.layout.playlist_row(mouse.column, mouse.row, offset) {
        if index < controller.playlist().len() {
            state.list_state.select(Some(index));
            apply(controller, Command::SelectTrack(index));
        }
    }
}

fn move_cursor(state: &mut EventLoopState, len: usize, delta: isize) {
    if len == 0 {
        return;
    }
    let current = state.list_state.selected().unwrap_or(0);
    let next = current.saturating_add_signed(delta).min(len - 1);
    state.list_state.select(Some(next));
}

fn apply(controller: &mut Controller<AudioPlayer>, command: Command) {
    if let Err(e) = controller.apply(command) {
        warn!("{command:?} rejected: {e}");
    }
}
