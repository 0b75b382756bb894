//! UI rendering helpers for the terminal user interface.
//!
//! `draw` renders the controller state with `ratatui` and returns the screen
//! regions the event loop needs for mouse hit-testing.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{Controller, PlayerStatus};
use crate::audio::AudioOutput;
use crate::config::UiSettings;

const CONTROLS: &str = "[space] play/pause | [←/→] prev/next | [m] mute | [+/-] volume | \
                        [j/k] move | [enter] play selected | click bar to seek | [q] quit";
const EMPTY_CONTROLS: &str = "[q] quit";
const NAMING_TIP: &str = "Name your files as `Artist - Title.mp3` and they will show up here.";

/// Screen regions from the last frame, used to map mouse clicks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiLayout {
    /// Inside of the progress bar block.
    pub progress: Rect,
    /// Inside of the playlist block, where the first row is drawn.
    pub playlist: Rect,
}

impl UiLayout {
    /// Fraction of the track a click at (`column`, `row`) points to, if it
    /// landed on the progress bar. The first cell is the start and the last
    /// cell the end.
    pub fn seek_fraction(&self, column: u16, row: u16) -> Option<f64> {
        let area = self.progress;
        if area.width == 0 || !area.contains(Position::new(column, row)) {
            return None;
        }
        let span = area.width.saturating_sub(1).max(1);
        Some((f64::from(column - area.x) / f64::from(span)).min(1.0))
    }

    /// Visible playlist row under (`column`, `row`), shifted by the list's
    /// scroll `offset`. The caller checks it against the playlist length.
    pub fn playlist_row(&self, column: u16, row: u16, offset: usize) -> Option<usize> {
        let area = self.playlist;
        if !area.contains(Position::new(column, row)) {
            return None;
        }
        Some(usize::from(row - area.y) + offset)
    }
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// `elapsed / total` label for the progress bar.
fn progress_label(progress: f64, duration: Option<f64>) -> String {
    match duration.filter(|d| d.is_finite() && *d > 0.0) {
        Some(total) => {
            let elapsed = Duration::from_secs_f64((progress * total).max(0.0));
            format!(
                "{} / {}",
                format_mmss(elapsed),
                format_mmss(Duration::from_secs_f64(total))
            )
        }
        None => "--:-- / --:--".to_string(),
    }
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into `frame`.
///
/// `list_state` carries the playlist cursor and scroll offset between frames;
/// `loading` is set while the startup track fetch is still running.
pub fn draw<O: AudioOutput>(
    frame: &mut Frame,
    controller: &Controller<O>,
    list_state: &mut ListState,
    loading: bool,
    ui_settings: &UiSettings,
) -> UiLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    // Now playing
    let now_playing = match controller.current_track() {
        Some(track) => {
            let play = if controller.is_playing() { "▶ Playing" } else { "⏸ Paused" };
            let mute = if controller.is_muted() { "  🔇 Muted" } else { "" };
            let volume = (controller.volume() * 100.0).round() as u32;
            vec![
                Line::from(Span::styled(
                    track.title.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::raw(track.artist_or(&ui_settings.unknown_artist).to_string()),
                    Span::styled(
                        format!("   {play}{mute}  vol {volume}%"),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            ]
        }
        None if loading => vec![Line::from("Loading tracks...")],
        None => vec![Line::from("Nothing to play")],
    };
    frame.render_widget(
        Paragraph::new(now_playing).block(padded_block(" now playing ")),
        chunks[1],
    );

    // Progress
    let progress_block = Block::default().borders(Borders::ALL);
    let progress_area = progress_block.inner(chunks[2]);
    let gauge = Gauge::default()
        .block(progress_block)
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(controller.progress().clamp(0.0, 1.0))
        .label(progress_label(
            controller.progress(),
            controller.output().duration(),
        ));
    frame.render_widget(gauge, chunks[2]);

    // Playlist
    let list_block = Block::default().borders(Borders::ALL).title(" playlist ");
    let playlist_area = list_block.inner(chunks[3]);

    if controller.status() == PlayerStatus::Empty {
        let text = if loading {
            "Loading tracks...".to_string()
        } else {
            let reason = controller
                .empty_message()
                .unwrap_or("No songs found in the music folder.");
            format!("{reason}\n\n{NAMING_TIP}")
        };
        frame.render_widget(
            Paragraph::new(text)
                .block(list_block)
                .wrap(Wrap { trim: true }),
            chunks[3],
        );
    } else {
        let playlist = controller.playlist();
        let current = controller.current_index();
        let items: Vec<ListItem> = playlist
            .iter()
            .enumerate()
            .map(|(i, track)| {
                let text = format!(
                    "{:>3}. {} · {}",
                    i + 1,
                    track.title,
                    track.artist_or(&ui_settings.unknown_artist)
                );
                if Some(i) == current {
                    ListItem::new(text).style(
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ListItem::new(text)
                }
            })
            .collect();

        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, chunks[3], list_state);
    }

    let controls = if controller.status() == PlayerStatus::Empty {
        EMPTY_CONTROLS
    } else {
        CONTROLS
    };
    frame.render_widget(
        Paragraph::new(controls)
            .block(padded_block(" controls "))
            .wrap(Wrap { trim: true }),
        chunks[4],
    );

    UiLayout {
        progress: progress_area,
        playlist: playlist_area,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_mmss_pads_minutes_and_seconds() {
        assert_eq!(format_mmss(Duration::from_secs(0)), "00:00");
        assert_eq!(format_mmss(Duration::from_secs(65)), "01:05");
        assert_eq!(format_mmss(Duration::from_millis(600_999)), "10:00");
    }

    #[test]
    fn progress_label_needs_a_duration() {
        assert_eq!(progress_label(0.5, Some(120.0)), "01:00 / 02:00");
        assert_eq!(progress_label(0.5, None), "--:-- / --:--");
        assert_eq!(progress_label(0.5, Some(f64::NAN)), "--:-- / --:--");
    }

    #[test]
    fn seek_fraction_maps_columns_inside_the_bar() {
        let layout = UiLayout {
            progress: Rect::new(10, 5, 101, 1),
            playlist: Rect::default(),
        };
        assert_eq!(layout.seek_fraction(10, 5), Some(0.0));
        assert_eq!(layout.seek_fraction(60, 5), Some(0.5));
        assert_eq!(layout.seek_fraction(9, 5), None);
        assert_eq!(layout.seek_fraction(111, 5), None);
        assert_eq!(layout.seek_fraction(60, 6), None);
    }

    #[test]
    fn last_cell_of_the_bar_seeks_to_the_end() {
        let layout = UiLayout {
            progress: Rect::new(0, 0, 40, 1),
            playlist: Rect::default(),
        };
        assert_eq!(layout.seek_fraction(39, 0), Some(1.0));

        let single = UiLayout {
            progress: Rect::new(3, 0, 1, 1),
            playlist: Rect::default(),
        };
        assert_eq!(single.seek_fraction(3, 0), Some(0.0));
    }

    #[test]
    fn playlist_row_accounts_for_scroll_offset() {
        let layout = UiLayout {
            progress: Rect::default(),
            playlist: Rect::new(1, 11, 40, 10),
        };
        assert_eq!(layout.playlist_row(5, 11, 0), Some(0));
        assert_eq!(layout.playlist_row(5, 14, 0), Some(3));
        assert_eq!(layout.playlist_row(5, 14, 7), Some(10));
        assert_eq!(layout.playlist_row(5, 10, 0), None);
        assert_eq!(layout.playlist_row(0, 12, 0), None);
    }
}
